use strum_macros::Display;

/// One mutually-exclusive panel of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Screen {
    Intro,
    Letter,
    Proposal,
    Result,
}

impl Screen {
    /// The screen that follows this one. `Result` is terminal.
    pub fn next(self) -> Option<Screen> {
        match self {
            Screen::Intro => Some(Screen::Letter),
            Screen::Letter => Some(Screen::Proposal),
            Screen::Proposal => Some(Screen::Result),
            Screen::Result => None,
        }
    }
}
