//! What the client hears back.
//!
//! Every path through the submit handler ends in a [`RelayOutcome`], and
//! [`acknowledge`] is the only place that decides the HTTP reply. Internal
//! failures are logged by the caller and answered with a friendly 200.

use std::fmt;

use axum::http::StatusCode;
use confession_protocol::Choice;
use confession_protocol::messages;

use crate::error::RelayError;

/// A non-empty choice as received, which may not be one we know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedChoice {
    Known(Choice),
    Other(String),
}

impl ReceivedChoice {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Choice>() {
            Ok(choice) => Self::Known(choice),
            Err(_) => Self::Other(raw.to_string()),
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Known(Choice::Yes))
    }
}

impl fmt::Display for ReceivedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(choice) => write!(f, "{choice}"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug)]
pub enum RelayOutcome {
    /// Submission accepted. Spreadsheet delivery is reported separately
    /// and never changes the reply.
    Acknowledged(ReceivedChoice),
    /// No usable `choice` field.
    MissingChoice,
    /// Processing failed; `yes_hint` says whether the body looked like a yes.
    Failed { yes_hint: bool, error: RelayError },
}

pub fn acknowledge(outcome: &RelayOutcome) -> (StatusCode, &'static str) {
    match outcome {
        RelayOutcome::Acknowledged(ReceivedChoice::Known(Choice::Yes)) => {
            (StatusCode::OK, messages::ACK_YES)
        }
        RelayOutcome::Acknowledged(ReceivedChoice::Known(Choice::No)) => {
            (StatusCode::OK, messages::ACK_NO)
        }
        RelayOutcome::Acknowledged(ReceivedChoice::Other(_)) => {
            (StatusCode::OK, messages::ACK_OTHER)
        }
        RelayOutcome::MissingChoice => (StatusCode::BAD_REQUEST, messages::INVALID_CHOICE),
        RelayOutcome::Failed { yes_hint: true, .. } => {
            (StatusCode::OK, messages::RELAY_FALLBACK_YES)
        }
        RelayOutcome::Failed { yes_hint: false, .. } => {
            (StatusCode::OK, messages::RELAY_FALLBACK_OTHER)
        }
    }
}
