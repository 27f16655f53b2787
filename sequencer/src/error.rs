use thiserror::Error;

use crate::screen::Screen;

/// A sequencer operation was invoked while its guard did not hold.
///
/// State is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("expected screen {expected}, but {actual} is active")]
    WrongScreen { expected: Screen, actual: Screen },

    #[error("the letter has already been revealed")]
    AlreadyRevealed,

    #[error("the typewriter has already run in this session")]
    AlreadyTyping,

    #[error("the typewriter is not running")]
    NotTyping,

    #[error("the letter is still being typed")]
    TypingUnfinished,

    #[error("choice inputs are disabled")]
    InputsDisabled,

    #[error("no submission is in flight")]
    NothingInFlight,
}
