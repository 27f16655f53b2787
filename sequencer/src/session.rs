use std::time::Duration;

use confession_protocol::Choice;
use confession_protocol::Submission;
use confession_protocol::messages;

use crate::error::SequenceError;
use crate::letter::LETTER;
use crate::screen::Screen;
use crate::timings::Timings;
use crate::typewriter::Typewriter;

/// Timed events the session schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    DwellElapsed,
}

/// Instructions for whoever drives the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The reveal control switches to its loading label and is disabled.
    RevealLoading,
    /// Cosmetic two-phase transition. After `lead_in`, `from` fades out for
    /// `Timings::fade_out`; then `to` is shown and becomes active after
    /// `Timings::fade_in`, at which point the driver calls
    /// [`Session::on_shown`].
    Animate {
        from: Screen,
        to: Screen,
        lead_in: Duration,
    },
    Schedule {
        after: Duration,
        event: Event,
    },
    TypeChar(char),
    CursorOn,
    CursorOff,
    DisableInputs,
    EnableInputs,
    Shake {
        duration: Duration,
    },
    /// Hand the submission to the relay once `after` has passed.
    Send {
        submission: Submission,
        after: Duration,
    },
    ShowMessage(ResultMessage),
    /// Play the confetti burst.
    Celebrate,
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay answered with a 2xx and this body.
    Delivered(String),
    /// Network error or non-2xx; the string is for logs only.
    Failed(String),
}

/// Text shown on the result screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub text: String,
    pub choice: Choice,
}

impl ResultMessage {
    /// Failures read exactly like successes to the person answering.
    pub fn for_outcome(choice: Choice, outcome: SubmitOutcome) -> Self {
        let text = match outcome {
            SubmitOutcome::Delivered(body) if !body.trim().is_empty() => body,
            SubmitOutcome::Delivered(_) | SubmitOutcome::Failed(_) => match choice {
                Choice::Yes => messages::CLIENT_FALLBACK_YES.to_string(),
                Choice::No => messages::CLIENT_FALLBACK_NO.to_string(),
            },
        };
        Self { text, choice }
    }
}

/// The screen state machine.
///
/// Transitions are one-directional: Intro → Letter on reveal, Letter →
/// Proposal once the letter is fully typed and the dwell has passed,
/// Proposal → Result once the submit attempt has resolved.
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    timings: Timings,
    typewriter: Typewriter,
    reveal_pressed: bool,
    inputs_enabled: bool,
    in_flight: Option<Submission>,
    result: Option<ResultMessage>,
}

impl Session {
    pub fn new(timings: Timings) -> Self {
        Self::with_letter(timings, LETTER)
    }

    pub fn with_letter(timings: Timings, letter: &str) -> Self {
        Self {
            screen: Screen::Intro,
            timings,
            typewriter: Typewriter::new(letter),
            reveal_pressed: false,
            inputs_enabled: true,
            in_flight: None,
            result: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn inputs_enabled(&self) -> bool {
        self.inputs_enabled
    }

    pub fn in_flight(&self) -> Option<&Submission> {
        self.in_flight.as_ref()
    }

    pub fn result(&self) -> Option<&ResultMessage> {
        self.result.as_ref()
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), SequenceError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(SequenceError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }

    /// Intro → Letter.
    pub fn reveal(&mut self) -> Result<Vec<Effect>, SequenceError> {
        self.expect_screen(Screen::Intro)?;
        if self.reveal_pressed {
            return Err(SequenceError::AlreadyRevealed);
        }
        self.reveal_pressed = true;
        self.screen = Screen::Letter;
        tracing::debug!("reveal pressed");
        Ok(vec![
            Effect::RevealLoading,
            Effect::Animate {
                from: Screen::Intro,
                to: Screen::Letter,
                lead_in: self.timings.reveal_lead_in,
            },
        ])
    }

    /// Called by the driver once the fade-in of `shown` has completed.
    ///
    /// A stale notification for a screen that is no longer active is ignored.
    pub fn on_shown(&mut self, shown: Screen) -> Result<Vec<Effect>, SequenceError> {
        if shown != self.screen {
            return Ok(Vec::new());
        }
        match shown {
            Screen::Letter => self.start_typing(),
            Screen::Result => {
                let Some(message) = self.result.clone() else {
                    return Ok(Vec::new());
                };
                let celebrate = message.choice.is_yes();
                let mut effects = vec![Effect::ShowMessage(message)];
                if celebrate {
                    effects.push(Effect::Celebrate);
                }
                Ok(effects)
            }
            Screen::Intro | Screen::Proposal => Ok(Vec::new()),
        }
    }

    /// Starts the one typewriter run of this session and types the first
    /// character immediately.
    pub fn start_typing(&mut self) -> Result<Vec<Effect>, SequenceError> {
        self.expect_screen(Screen::Letter)?;
        self.typewriter.start()?;
        tracing::debug!(chars = self.typewriter.len(), "typewriter started");
        let mut effects = vec![Effect::CursorOn];
        effects.extend(self.tick()?);
        Ok(effects)
    }

    /// Types one character, or finishes the run and schedules the dwell.
    pub fn tick(&mut self) -> Result<Vec<Effect>, SequenceError> {
        match self.typewriter.advance()? {
            Some(c) => Ok(vec![
                Effect::TypeChar(c),
                Effect::Schedule {
                    after: self.timings.type_interval,
                    event: Event::Tick,
                },
            ]),
            None => {
                tracing::debug!("typing finished; proposal follows after dwell");
                Ok(vec![
                    Effect::CursorOff,
                    Effect::Schedule {
                        after: self.timings.dwell,
                        event: Event::DwellElapsed,
                    },
                ])
            }
        }
    }

    /// Letter → Proposal.
    pub fn dwell_elapsed(&mut self) -> Result<Vec<Effect>, SequenceError> {
        self.expect_screen(Screen::Letter)?;
        if !self.typewriter.is_finished() {
            return Err(SequenceError::TypingUnfinished);
        }
        self.screen = Screen::Proposal;
        Ok(vec![Effect::Animate {
            from: Screen::Letter,
            to: Screen::Proposal,
            lead_in: Duration::ZERO,
        }])
    }

    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, SequenceError> {
        match event {
            Event::Tick => self.tick(),
            Event::DwellElapsed => self.dwell_elapsed(),
        }
    }

    /// Locks both inputs and produces the submission to send.
    pub fn choose(&mut self, choice: Choice, feedback: &str) -> Result<Vec<Effect>, SequenceError> {
        self.expect_screen(Screen::Proposal)?;
        if !self.inputs_enabled || self.in_flight.is_some() {
            return Err(SequenceError::InputsDisabled);
        }
        self.inputs_enabled = false;
        let submission = Submission::new(choice, feedback);
        self.in_flight = Some(submission.clone());
        tracing::info!(%choice, has_feedback = submission.feedback.is_some(), "answer chosen");

        let mut effects = vec![Effect::DisableInputs];
        let after = match choice {
            Choice::Yes => Duration::ZERO,
            Choice::No => {
                effects.push(Effect::Shake {
                    duration: self.timings.shake,
                });
                self.timings.shake
            }
        };
        effects.push(Effect::Send { submission, after });
        Ok(effects)
    }

    /// Proposal → Result, whatever the outcome was.
    pub fn resolve(&mut self, outcome: SubmitOutcome) -> Result<Vec<Effect>, SequenceError> {
        self.expect_screen(Screen::Proposal)?;
        let submission = self.in_flight.take().ok_or(SequenceError::NothingInFlight)?;
        if let SubmitOutcome::Failed(reason) = &outcome {
            tracing::warn!(%reason, "submission failed; showing fallback message");
        }
        self.result = Some(ResultMessage::for_outcome(submission.choice, outcome));
        self.inputs_enabled = true;
        self.screen = Screen::Result;
        Ok(vec![
            Effect::EnableInputs,
            Effect::Animate {
                from: Screen::Proposal,
                to: Screen::Result,
                lead_in: Duration::ZERO,
            },
        ])
    }
}
