#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Drives a whole session through the player in virtual time:
//!   1. Intro stays put until reveal is pressed
//!   2. The letter is typed exactly once, in full
//!   3. The proposal appears only after the full letter plus the dwell
//!   4. The result appears only after the submit attempt resolves

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use confession_protocol::messages;
use confession_sequencer::Choice;
use confession_sequencer::Notice;
use confession_sequencer::Phase;
use confession_sequencer::Player;
use confession_sequencer::Relay;
use confession_sequencer::RelayClientError;
use confession_sequencer::Screen;
use confession_sequencer::SequenceError;
use confession_sequencer::Session;
use confession_sequencer::Submission;
use confession_sequencer::Timings;
use confession_sequencer::deliver;
use confession_sequencer::letter::LETTER;
use pretty_assertions::assert_eq;

/// Relay double that records what it was sent.
struct RecordingRelay {
    reply: Result<String, u16>,
    sent: Mutex<Vec<Submission>>,
}

impl RecordingRelay {
    fn answering(body: &str) -> Self {
        Self {
            reply: Ok(body.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Relay for RecordingRelay {
    async fn submit(&self, submission: &Submission) -> Result<String, RelayClientError> {
        self.sent.lock().unwrap().push(submission.clone());
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(RelayClientError::Status {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Default timings put the proposal on screen well within this.
fn letter_done_at() -> Duration {
    let t = Timings::default();
    let chars = LETTER.chars().count() as u32;
    t.reveal_lead_in + t.transition() + t.type_interval * (chars + 1) + t.dwell + t.transition()
}

#[test]
fn intro_waits_for_reveal() {
    let mut player = Player::new(Session::new(Timings::default()));
    assert!(player.advance(secs(3600)).is_empty());
    assert_eq!(player.session().screen(), Screen::Intro);
    assert_eq!(player.stage().visible, Screen::Intro);
}

#[test]
fn letter_is_typed_once_even_when_reveal_is_repeated() {
    let mut player = Player::new(Session::new(Timings::default()));
    player.reveal(Duration::ZERO).unwrap();
    assert!(matches!(
        player.reveal(Duration::from_millis(10)),
        Err(SequenceError::WrongScreen { .. })
    ));

    player.advance(letter_done_at());
    assert_eq!(player.stage().letter, LETTER);
    assert_eq!(player.session().typewriter().revealed(), LETTER);
}

#[test]
fn proposal_only_after_full_letter_and_dwell() {
    let timings = Timings::default();
    let mut player = Player::new(Session::new(timings));
    player.reveal(Duration::ZERO).unwrap();

    let chars = LETTER.chars().count() as u32;
    // Last character lands here; the typewriter finishes one interval later.
    let last_char =
        timings.reveal_lead_in + timings.transition() + timings.type_interval * (chars - 1);
    player.advance(last_char);
    assert_eq!(player.stage().letter, LETTER);
    assert_eq!(player.session().screen(), Screen::Letter);

    let finished = last_char + timings.type_interval;
    player.advance(finished + timings.dwell - Duration::from_millis(1));
    assert_eq!(player.session().screen(), Screen::Letter);
    assert!(player.session().typewriter().is_finished());

    player.advance(finished + timings.dwell);
    assert_eq!(player.session().screen(), Screen::Proposal);
    assert_eq!(player.stage().phase, Phase::FadingOut);

    player.advance(finished + timings.dwell + timings.transition());
    assert_eq!(player.stage().visible, Screen::Proposal);
    assert_eq!(player.stage().phase, Phase::Steady);
}

#[tokio::test]
async fn result_only_after_submit_resolves() {
    let relay = RecordingRelay::answering(messages::ACK_YES);
    let mut player = Player::new(Session::new(Timings::default()));
    player.reveal(Duration::ZERO).unwrap();
    let now = letter_done_at();
    player.advance(now);

    let notices = player.choose(Choice::Yes, "Em đồng ý!", now).unwrap();
    let [Notice::Dispatch(submission)] = notices.as_slice() else {
        panic!("expected a single dispatch, got {notices:?}");
    };

    // Time passes while the request is outstanding; nothing moves.
    player.advance(now + secs(30));
    assert_eq!(player.session().screen(), Screen::Proposal);
    assert!(!player.stage().inputs_enabled);

    let outcome = deliver(&relay, submission).await;
    let resolved_at = now + secs(31);
    player.resolve(outcome, resolved_at).unwrap();
    assert_eq!(player.session().screen(), Screen::Result);
    assert!(player.stage().inputs_enabled);
    assert_eq!(player.stage().message, None);

    let notices = player.advance(resolved_at + Timings::default().transition());
    assert_eq!(notices, vec![Notice::Celebrate]);
    assert_eq!(
        player.stage().message.as_ref().map(|m| m.text.as_str()),
        Some(messages::ACK_YES)
    );
    assert_eq!(
        relay.sent.lock().unwrap().as_slice(),
        &[Submission {
            choice: Choice::Yes,
            feedback: Some("Em đồng ý!".to_string()),
        }]
    );
}

#[tokio::test]
async fn failed_submit_reads_as_success() {
    let relay = RecordingRelay::failing(503);
    let mut player = Player::new(Session::with_letter(Timings::instant(), "hi"));
    player.reveal(Duration::ZERO).unwrap();
    player.advance(Duration::ZERO);
    assert_eq!(player.session().screen(), Screen::Proposal);

    // With zero timings the shake is over before it starts, so the
    // dispatch comes straight back from choose.
    let notices = player.choose(Choice::No, "", Duration::ZERO).unwrap();
    let [Notice::Dispatch(submission)] = notices.as_slice() else {
        panic!("expected a single dispatch, got {notices:?}");
    };

    let outcome = deliver(&relay, submission).await;
    player.resolve(outcome, Duration::ZERO).unwrap();
    let notices = player.advance(Duration::ZERO);
    assert!(notices.is_empty(), "no confetti for a no");
    assert_eq!(
        player.stage().message.as_ref().map(|m| m.text.as_str()),
        Some(messages::CLIENT_FALLBACK_NO)
    );
}
