use serde::Deserialize;
use serde::Serialize;
use strum_macros::AsRefStr;
use strum_macros::Display;
use strum_macros::EnumString;

/// The answer picked on the proposal screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn is_yes(self) -> bool {
        matches!(self, Choice::Yes)
    }
}

/// One answer sent from the proposal screen to the relay.
///
/// Built once per interaction and never mutated after it is sent. On the
/// wire this is `{"choice":"yes"|"no","feedback":string|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub choice: Choice,
    pub feedback: Option<String>,
}

impl Submission {
    /// Trims the feedback and drops it entirely when nothing is left.
    pub fn new(choice: Choice, feedback: &str) -> Self {
        let trimmed = feedback.trim();
        let feedback = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Self { choice, feedback }
    }
}
