//! Terminal front-end: plays the proposal sequence with real timers and
//! sends the answer to a running relay.

pub mod app;
pub mod ui;

pub use app::App;
