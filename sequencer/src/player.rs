use std::time::Duration;

use confession_protocol::Choice;
use confession_protocol::Submission;

use crate::error::SequenceError;
use crate::screen::Screen;
use crate::session::Effect;
use crate::session::Event;
use crate::session::ResultMessage;
use crate::session::Session;
use crate::session::SubmitOutcome;
use crate::timeline::Timeline;

/// Where the visible screen is in its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Steady,
    FadingOut,
    FadingIn,
}

/// What a front-end should draw right now.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// The panel on screen. Lags the logical screen while animating.
    pub visible: Screen,
    pub phase: Phase,
    pub letter: String,
    pub cursor: bool,
    pub reveal_loading: bool,
    pub inputs_enabled: bool,
    pub shaking: bool,
    pub message: Option<ResultMessage>,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            visible: Screen::Intro,
            phase: Phase::Steady,
            letter: String::new(),
            cursor: false,
            reveal_loading: false,
            inputs_enabled: true,
            shaking: false,
            message: None,
        }
    }
}

/// Work the front-end has to do outside the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Send this to the relay and report back through [`Player::resolve`].
    Dispatch(Submission),
    Celebrate,
}

#[derive(Debug, Clone)]
enum Cue {
    Core(Event),
    FadeOut(Screen),
    Swap(Screen),
    Shown(Screen),
    ShakeEnd,
    Dispatch(Submission),
}

/// Runs a [`Session`] against a virtual clock.
///
/// All times are offsets from the start of the session. Follow-up work is
/// scheduled relative to the instant the triggering cue was due, so the
/// outcome does not depend on how often the caller polls.
pub struct Player {
    session: Session,
    timeline: Timeline<Cue>,
    stage: Stage,
}

impl Player {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            timeline: Timeline::new(),
            stage: Stage::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Nothing left to fire.
    pub fn is_idle(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn reveal(&mut self, now: Duration) -> Result<Vec<Notice>, SequenceError> {
        let effects = self.session.reveal()?;
        let mut notices = Vec::new();
        self.apply(effects, now, &mut notices);
        Ok(notices)
    }

    pub fn choose(
        &mut self,
        choice: Choice,
        feedback: &str,
        now: Duration,
    ) -> Result<Vec<Notice>, SequenceError> {
        let effects = self.session.choose(choice, feedback)?;
        let mut notices = Vec::new();
        self.apply(effects, now, &mut notices);
        Ok(notices)
    }

    pub fn resolve(
        &mut self,
        outcome: SubmitOutcome,
        now: Duration,
    ) -> Result<Vec<Notice>, SequenceError> {
        let effects = self.session.resolve(outcome)?;
        let mut notices = Vec::new();
        self.apply(effects, now, &mut notices);
        Ok(notices)
    }

    /// Fires every cue due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some((at, cue)) = self.timeline.pop_due(now) {
            self.fire(cue, at, &mut notices);
        }
        notices
    }

    fn fire(&mut self, cue: Cue, at: Duration, notices: &mut Vec<Notice>) {
        let result = match cue {
            Cue::Core(event) => self.session.handle(event),
            Cue::FadeOut(from) => {
                self.stage.visible = from;
                self.stage.phase = Phase::FadingOut;
                Ok(Vec::new())
            }
            Cue::Swap(to) => {
                self.stage.visible = to;
                self.stage.phase = Phase::FadingIn;
                Ok(Vec::new())
            }
            Cue::Shown(screen) => {
                self.stage.phase = Phase::Steady;
                self.session.on_shown(screen)
            }
            Cue::ShakeEnd => {
                self.stage.shaking = false;
                Ok(Vec::new())
            }
            Cue::Dispatch(submission) => {
                notices.push(Notice::Dispatch(submission));
                Ok(Vec::new())
            }
        };
        match result {
            Ok(effects) => self.apply(effects, at, notices),
            Err(err) => tracing::warn!("scheduled step rejected: {err}"),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>, at: Duration, notices: &mut Vec<Notice>) {
        let timings = *self.session.timings();
        for effect in effects {
            match effect {
                Effect::RevealLoading => self.stage.reveal_loading = true,
                Effect::Animate { from, to, lead_in } => {
                    let start = at + lead_in;
                    self.timeline.schedule(start, Cue::FadeOut(from));
                    self.timeline.schedule(start + timings.fade_out, Cue::Swap(to));
                    self.timeline
                        .schedule(start + timings.transition(), Cue::Shown(to));
                }
                Effect::Schedule { after, event } => {
                    self.timeline.schedule(at + after, Cue::Core(event));
                }
                Effect::TypeChar(c) => self.stage.letter.push(c),
                Effect::CursorOn => self.stage.cursor = true,
                Effect::CursorOff => self.stage.cursor = false,
                Effect::DisableInputs => self.stage.inputs_enabled = false,
                Effect::EnableInputs => self.stage.inputs_enabled = true,
                Effect::Shake { duration } => {
                    self.stage.shaking = true;
                    self.timeline.schedule(at + duration, Cue::ShakeEnd);
                }
                Effect::Send { submission, after } => {
                    if after.is_zero() {
                        notices.push(Notice::Dispatch(submission));
                    } else {
                        self.timeline.schedule(at + after, Cue::Dispatch(submission));
                    }
                }
                Effect::ShowMessage(message) => self.stage.message = Some(message),
                Effect::Celebrate => notices.push(Notice::Celebrate),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timings::Timings;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn transition_has_two_cosmetic_phases() {
        let mut player = Player::new(Session::with_letter(Timings::default(), "ab"));
        player.reveal(ms(0)).unwrap();
        assert!(player.stage().reveal_loading);
        assert_eq!(player.session().screen(), Screen::Letter);
        assert_eq!(player.stage().visible, Screen::Intro);

        player.advance(ms(1000));
        assert_eq!(player.stage().phase, Phase::FadingOut);
        assert_eq!(player.stage().visible, Screen::Intro);

        player.advance(ms(1400));
        assert_eq!(player.stage().phase, Phase::FadingIn);
        assert_eq!(player.stage().visible, Screen::Letter);
        assert_eq!(player.stage().letter, "");

        player.advance(ms(1450));
        assert_eq!(player.stage().phase, Phase::Steady);
        assert_eq!(player.stage().letter, "a");
        assert!(player.stage().cursor);
    }

    #[test]
    fn late_polling_yields_same_result() {
        let mut player = Player::new(Session::with_letter(Timings::default(), "ab"));
        player.reveal(ms(0)).unwrap();
        player.advance(ms(60_000));
        assert_eq!(player.session().screen(), Screen::Proposal);
        assert_eq!(player.stage().visible, Screen::Proposal);
        assert_eq!(player.stage().letter, "ab");
        assert!(!player.stage().cursor);
        assert!(player.is_idle());
    }

    #[test]
    fn no_dispatch_waits_for_shake() {
        let mut player = Player::new(Session::with_letter(Timings::default(), ""));
        player.reveal(ms(0)).unwrap();
        player.advance(ms(60_000));

        let notices = player.choose(Choice::No, "", ms(60_000)).unwrap();
        assert_eq!(notices, Vec::new());
        assert!(player.stage().shaking);
        assert!(!player.stage().inputs_enabled);

        let notices = player.advance(ms(60_500));
        assert_eq!(
            notices,
            vec![Notice::Dispatch(Submission {
                choice: Choice::No,
                feedback: None,
            })]
        );
        assert!(!player.stage().shaking);
    }
}
