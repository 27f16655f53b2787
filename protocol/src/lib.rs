pub mod messages;
pub mod submission;

pub use submission::Choice;
pub use submission::Submission;

/// Path the relay accepts submissions on.
pub const SUBMIT_PATH: &str = "/submit-response";
