use std::sync::Arc;
use std::time::Duration;

use confession_sequencer::Choice;
use confession_sequencer::Notice;
use confession_sequencer::Phase;
use confession_sequencer::Player;
use confession_sequencer::Relay;
use confession_sequencer::Screen;
use confession_sequencer::SequenceError;
use confession_sequencer::Session;
use confession_sequencer::Stage;
use confession_sequencer::SubmitOutcome;
use confession_sequencer::Timings;
use confession_sequencer::deliver;
use confession_sequencer::particles::ConfettiPiece;
use confession_sequencer::particles::Heart;
use confession_sequencer::particles::confetti_burst;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use rand::rngs::StdRng;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Redraw cadence while something is animating.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// One confetti burst, timed from when it started.
#[derive(Debug, Clone)]
pub struct Burst {
    pub started: Duration,
    pub pieces: Vec<ConfettiPiece>,
}

/// Terminal state around a [`Player`]: particles, the feedback field and
/// the yes/no selection. All methods take the session-relative `now`.
pub struct App {
    player: Player,
    relay: Arc<dyn Relay>,
    runtime: Handle,
    outcomes_tx: mpsc::UnboundedSender<SubmitOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
    rng: StdRng,
    hearts: Vec<Heart>,
    next_heart_at: Duration,
    confetti: Option<Burst>,
    selected: Choice,
    feedback: String,
    quit: bool,
}

impl App {
    pub fn new(relay: Arc<dyn Relay>, runtime: Handle, timings: Timings, rng: StdRng) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            player: Player::new(Session::new(timings)),
            relay,
            runtime,
            outcomes_tx,
            outcomes_rx,
            rng,
            hearts: Vec::new(),
            next_heart_at: Duration::ZERO,
            confetti: None,
            selected: Choice::Yes,
            feedback: String::new(),
            quit: false,
        }
    }

    pub fn stage(&self) -> &Stage {
        self.player.stage()
    }

    pub fn screen(&self) -> Screen {
        self.player.session().screen()
    }

    pub fn selected(&self) -> Choice {
        self.selected
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Choice currently being sent, if any.
    pub fn sending(&self) -> Option<Choice> {
        self.player.session().in_flight().map(|s| s.choice)
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn confetti(&self) -> Option<&Burst> {
        self.confetti.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Duration) {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.quit = true;
            return;
        }

        match self.screen() {
            Screen::Intro => {
                if key.code == KeyCode::Enter {
                    let result = self.player.reveal(now);
                    self.after(result, now);
                }
            }
            Screen::Letter => {}
            Screen::Proposal => self.handle_proposal_key(key, now),
            Screen::Result => {
                if key.code == KeyCode::Enter && self.settled_on(Screen::Result) {
                    self.quit = true;
                }
            }
        }
    }

    /// True once `screen` is on display and its fade-in has finished.
    fn settled_on(&self, screen: Screen) -> bool {
        let stage = self.stage();
        stage.visible == screen && stage.phase == Phase::Steady
    }

    fn handle_proposal_key(&mut self, key: KeyEvent, now: Duration) {
        if !self.settled_on(Screen::Proposal) || !self.stage().inputs_enabled {
            return;
        }
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = match self.selected {
                    Choice::Yes => Choice::No,
                    Choice::No => Choice::Yes,
                };
            }
            KeyCode::Enter => {
                let result = self.player.choose(self.selected, &self.feedback, now);
                self.after(result, now);
            }
            KeyCode::Backspace => {
                self.feedback.pop();
            }
            KeyCode::Char(c) => self.feedback.push(c),
            _ => {}
        }
    }

    fn after(&mut self, result: Result<Vec<Notice>, SequenceError>, now: Duration) {
        match result {
            Ok(notices) => self.handle_notices(notices, now),
            Err(err) => tracing::debug!("ignored input: {err}"),
        }
    }

    /// Collects finished submissions, fires due cues and moves particles.
    pub fn tick(&mut self, now: Duration) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            let result = self.player.resolve(outcome, now);
            self.after(result, now);
        }

        let notices = self.player.advance(now);
        self.handle_notices(notices, now);

        let timings = *self.player.session().timings();
        if !timings.heart_spawn.is_zero() {
            while self.next_heart_at <= now {
                let heart = Heart::spawn(&mut self.rng, self.next_heart_at, &timings);
                self.hearts.push(heart);
                self.next_heart_at += timings.heart_spawn;
            }
        }
        self.hearts.retain(|heart| heart.progress(now).is_some());

        if let Some(burst) = &self.confetti
            && now.saturating_sub(burst.started) > timings.confetti_container_lifetime
        {
            self.confetti = None;
        }
    }

    fn handle_notices(&mut self, notices: Vec<Notice>, now: Duration) {
        for notice in notices {
            match notice {
                Notice::Dispatch(submission) => {
                    tracing::info!(choice = %submission.choice, "sending response");
                    let relay = Arc::clone(&self.relay);
                    let tx = self.outcomes_tx.clone();
                    self.runtime.spawn(async move {
                        let outcome = deliver(relay.as_ref(), &submission).await;
                        let _ = tx.send(outcome);
                    });
                }
                Notice::Celebrate => {
                    let timings = *self.player.session().timings();
                    self.confetti = Some(Burst {
                        started: now,
                        pieces: confetti_burst(&mut self.rng, &timings),
                    });
                }
            }
        }
    }

    /// How long the event loop may block before the next tick is needed.
    pub fn poll_timeout(&self, now: Duration) -> Duration {
        match self.player.next_deadline() {
            Some(deadline) => deadline.saturating_sub(now).min(FRAME_INTERVAL),
            None => FRAME_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use confession_protocol::messages;
    use confession_sequencer::RelayClientError;
    use confession_sequencer::Submission;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use std::sync::Mutex;

    struct FixedRelay {
        sent: Mutex<Vec<Submission>>,
    }

    #[async_trait]
    impl Relay for FixedRelay {
        async fn submit(&self, submission: &Submission) -> Result<String, RelayClientError> {
            self.sent.lock().unwrap().push(submission.clone());
            Ok(messages::ACK_YES.to_string())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(runtime: &tokio::runtime::Runtime) -> (App, Arc<FixedRelay>) {
        let relay = Arc::new(FixedRelay {
            sent: Mutex::new(Vec::new()),
        });
        let app = App::new(
            relay.clone(),
            runtime.handle().clone(),
            Timings::instant(),
            StdRng::seed_from_u64(7),
        );
        (app, relay)
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn typing_and_toggling_on_the_proposal() {
        let rt = runtime();
        let (mut app, _) = app(&rt);
        let zero = Duration::ZERO;

        // Keys before the proposal do nothing to the form.
        app.handle_key(key(KeyCode::Char('x')), zero);
        assert_eq!(app.feedback(), "");

        app.handle_key(key(KeyCode::Enter), zero);
        app.tick(zero);
        assert_eq!(app.screen(), Screen::Proposal);

        for c in "hi!".chars() {
            app.handle_key(key(KeyCode::Char(c)), zero);
        }
        app.handle_key(key(KeyCode::Backspace), zero);
        app.handle_key(key(KeyCode::Right), zero);
        assert_eq!(app.feedback(), "hi");
        assert_eq!(app.selected(), Choice::No);
    }

    #[test]
    fn keys_wait_for_the_proposal_to_settle() {
        let rt = runtime();
        let relay = Arc::new(FixedRelay {
            sent: Mutex::new(Vec::new()),
        });
        let mut app = App::new(
            relay.clone(),
            rt.handle().clone(),
            Timings::default(),
            StdRng::seed_from_u64(7),
        );
        let step = Duration::from_millis(10);
        let mut now = Duration::ZERO;

        app.handle_key(key(KeyCode::Enter), now);
        while app.screen() != Screen::Proposal {
            now += step;
            assert!(now < Duration::from_secs(60), "proposal never reached");
            app.tick(now);
        }

        // The letter is still fading out.
        assert_ne!(app.stage().visible, Screen::Proposal);
        app.handle_key(key(KeyCode::Char('x')), now);
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.sending(), None);
        assert_eq!(app.feedback(), "");
        assert_eq!(app.selected(), Choice::Yes);

        while app.stage().visible != Screen::Proposal || app.stage().phase != Phase::Steady {
            now += step;
            assert!(now < Duration::from_secs(60), "proposal never settled");
            app.tick(now);
        }

        app.handle_key(key(KeyCode::Char('x')), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.feedback(), "x");
        assert_eq!(app.sending(), Some(Choice::Yes));
    }

    #[test]
    fn yes_is_sent_once_and_celebrated() {
        let rt = runtime();
        let (mut app, relay) = app(&rt);
        let zero = Duration::ZERO;

        app.handle_key(key(KeyCode::Enter), zero);
        app.tick(zero);
        app.handle_key(key(KeyCode::Enter), zero);
        // Inputs are disabled while in flight.
        app.handle_key(key(KeyCode::Enter), zero);
        assert_eq!(app.sending(), Some(Choice::Yes));

        let mut now = zero;
        while app.screen() != Screen::Result {
            now += FRAME_INTERVAL;
            assert!(now < Duration::from_secs(5), "relay reply never arrived");
            std::thread::sleep(Duration::from_millis(5));
            app.tick(now);
        }
        app.tick(now);

        assert_eq!(relay.sent.lock().unwrap().len(), 1);
        assert_eq!(
            app.stage().message.as_ref().map(|m| m.text.as_str()),
            Some(messages::ACK_YES)
        );
        assert!(app.confetti().is_some());
    }

    #[test]
    fn escape_quits_anywhere() {
        let rt = runtime();
        let (mut app, _) = app(&rt);
        app.handle_key(key(KeyCode::Esc), Duration::ZERO);
        assert!(app.should_quit());
    }
}
