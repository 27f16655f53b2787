use crate::error::SequenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingState {
    Idle,
    Running,
    Finished,
}

/// Reveals a fixed text one character at a time.
///
/// A typewriter runs at most once; starting it again, even after it has
/// finished, is rejected.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
    position: usize,
    state: TypingState,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            position: 0,
            state: TypingState::Idle,
        }
    }

    pub fn start(&mut self) -> Result<(), SequenceError> {
        match self.state {
            TypingState::Idle => {
                self.state = TypingState::Running;
                Ok(())
            }
            TypingState::Running | TypingState::Finished => Err(SequenceError::AlreadyTyping),
        }
    }

    /// Reveals the next character, or finishes the run once the buffer is
    /// exhausted and returns `Ok(None)`.
    pub fn advance(&mut self) -> Result<Option<char>, SequenceError> {
        if self.state != TypingState::Running {
            return Err(SequenceError::NotTyping);
        }
        match self.text.get(self.position).copied() {
            Some(c) => {
                self.position += 1;
                Ok(Some(c))
            }
            None => {
                self.state = TypingState::Finished;
                Ok(None)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TypingState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TypingState::Finished
    }

    /// Text revealed so far.
    pub fn revealed(&self) -> String {
        self.text[..self.position].iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_one_char_per_advance() {
        let mut tw = Typewriter::new("Gửi");
        tw.start().unwrap();
        assert_eq!(tw.advance().unwrap(), Some('G'));
        assert_eq!(tw.revealed(), "G");
        assert_eq!(tw.advance().unwrap(), Some('ử'));
        assert_eq!(tw.advance().unwrap(), Some('i'));
        assert!(tw.is_running());
        assert_eq!(tw.advance().unwrap(), None);
        assert!(tw.is_finished());
        assert_eq!(tw.revealed(), "Gửi");
    }

    #[test]
    fn second_start_is_rejected() {
        let mut tw = Typewriter::new("abc");
        tw.start().unwrap();
        assert_eq!(tw.start(), Err(SequenceError::AlreadyTyping));
        tw.advance().unwrap();
        assert_eq!(tw.revealed(), "a");
    }

    #[test]
    fn restart_after_finish_is_rejected() {
        let mut tw = Typewriter::new("");
        tw.start().unwrap();
        assert_eq!(tw.advance().unwrap(), None);
        assert_eq!(tw.start(), Err(SequenceError::AlreadyTyping));
    }

    #[test]
    fn advance_before_start_fails() {
        let mut tw = Typewriter::new("abc");
        assert_eq!(tw.advance(), Err(SequenceError::NotTyping));
    }
}
