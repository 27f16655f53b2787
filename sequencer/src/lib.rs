//! Presentation sequencer for the proposal experience.
//!
//! The sequence is intro → typewriter letter → yes/no proposal → result.
//! [`Session`] is the pure state machine: every operation checks its guard,
//! mutates the logical screen and returns [`Effect`]s. [`Player`] interprets
//! those effects against a virtual-time [`Timeline`] and keeps a [`Stage`]
//! view model that a front-end can render. Nothing in this crate reads the
//! wall clock; callers pass elapsed time in.

pub mod error;
pub mod letter;
pub mod particles;
pub mod player;
pub mod relay_client;
pub mod screen;
pub mod session;
pub mod timeline;
pub mod timings;
pub mod typewriter;

pub use error::SequenceError;
pub use player::Notice;
pub use player::Phase;
pub use player::Player;
pub use player::Stage;
pub use relay_client::HttpRelay;
pub use relay_client::Relay;
pub use relay_client::RelayClientError;
pub use relay_client::deliver;
pub use screen::Screen;
pub use session::Effect;
pub use session::Event;
pub use session::ResultMessage;
pub use session::Session;
pub use session::SubmitOutcome;
pub use timeline::Timeline;
pub use timings::Timings;
pub use typewriter::Typewriter;

pub use confession_protocol::Choice;
pub use confession_protocol::Submission;
