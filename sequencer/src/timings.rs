use std::time::Duration;

/// Every delay the sequence uses. Injected so tests can run in zero time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Loading pause between pressing reveal and the first fade.
    pub reveal_lead_in: Duration,
    /// First phase of a transition: the current screen fades out.
    pub fade_out: Duration,
    /// Second phase: the next screen is shown, then activated.
    pub fade_in: Duration,
    /// Time between two typed characters.
    pub type_interval: Duration,
    /// How long the finished letter stays before the proposal appears.
    pub dwell: Duration,
    /// Shake played on the "no" button before its answer is sent.
    pub shake: Duration,
    pub heart_spawn: Duration,
    pub heart_lifetime: Duration,
    pub confetti_stagger: Duration,
    pub confetti_lifetime: Duration,
    pub confetti_container_lifetime: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_lead_in: Duration::from_millis(1000),
            fade_out: Duration::from_millis(400),
            fade_in: Duration::from_millis(50),
            type_interval: Duration::from_millis(50),
            dwell: Duration::from_millis(6000),
            shake: Duration::from_millis(500),
            heart_spawn: Duration::from_millis(300),
            heart_lifetime: Duration::from_millis(6000),
            confetti_stagger: Duration::from_millis(100),
            confetti_lifetime: Duration::from_millis(5000),
            confetti_container_lifetime: Duration::from_millis(6000),
        }
    }
}

impl Timings {
    /// All delays zero.
    pub fn instant() -> Self {
        Self {
            reveal_lead_in: Duration::ZERO,
            fade_out: Duration::ZERO,
            fade_in: Duration::ZERO,
            type_interval: Duration::ZERO,
            dwell: Duration::ZERO,
            shake: Duration::ZERO,
            heart_spawn: Duration::ZERO,
            heart_lifetime: Duration::ZERO,
            confetti_stagger: Duration::ZERO,
            confetti_lifetime: Duration::ZERO,
            confetti_container_lifetime: Duration::ZERO,
        }
    }

    /// Default timings sped up by `factor`. A factor below 1 is treated as 1.
    pub fn scaled(factor: u32) -> Self {
        let factor = factor.max(1);
        let d = Self::default();
        Self {
            reveal_lead_in: d.reveal_lead_in / factor,
            fade_out: d.fade_out / factor,
            fade_in: d.fade_in / factor,
            type_interval: d.type_interval / factor,
            dwell: d.dwell / factor,
            shake: d.shake / factor,
            heart_spawn: d.heart_spawn / factor,
            heart_lifetime: d.heart_lifetime / factor,
            confetti_stagger: d.confetti_stagger / factor,
            confetti_lifetime: d.confetti_lifetime / factor,
            confetti_container_lifetime: d.confetti_container_lifetime / factor,
        }
    }

    /// Total time a transition takes once its lead-in has passed.
    pub fn transition(&self) -> Duration {
        self.fade_out + self.fade_in
    }
}
