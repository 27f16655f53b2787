//! Decorative hearts and confetti.
//!
//! Particles carry their own spawn time so a renderer can compute where each
//! one is at any instant. Randomness is supplied by the caller.

use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::timings::Timings;

pub const CONFETTI_COLORS: [&str; 5] = ["#ff6b9d", "#c44569", "#4CAF50", "#8bc34a", "#FFD700"];
pub const CONFETTI_PIECES: usize = 50;
pub const CONFETTI_SIZE_PX: u16 = 10;

/// A heart floating up the background.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    /// Horizontal position, 0–100 % of the width.
    pub left_pct: f32,
    /// Time to float from bottom to top, 3–6 s.
    pub rise: Duration,
    /// Glyph size, 15–25 px.
    pub font_px: f32,
    pub spawned_at: Duration,
    pub lifetime: Duration,
}

impl Heart {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, now: Duration, timings: &Timings) -> Self {
        Self {
            left_pct: rng.random_range(0.0..100.0),
            rise: Duration::from_secs_f32(rng.random_range(3.0..6.0)),
            font_px: rng.random_range(15.0..25.0),
            spawned_at: now,
            lifetime: timings.heart_lifetime,
        }
    }

    /// Fraction of the rise completed at `now`, clamped to 1. `None` once
    /// the heart has outlived its lifetime.
    pub fn progress(&self, now: Duration) -> Option<f32> {
        let age = now.checked_sub(self.spawned_at)?;
        if age >= self.lifetime {
            return None;
        }
        Some((age.as_secs_f32() / self.rise.as_secs_f32()).min(1.0))
    }
}

/// One piece of a confetti burst.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub color: &'static str,
    pub left_pct: f32,
    /// Time to fall the full height, 2–5 s.
    pub fall: Duration,
    /// Offset from the start of the burst before this piece appears.
    pub delay: Duration,
    pub lifetime: Duration,
}

impl ConfettiPiece {
    /// Fraction of the fall completed `since_burst` after the burst began.
    /// `None` before the piece appears and after it is removed.
    pub fn progress(&self, since_burst: Duration) -> Option<f32> {
        let age = since_burst.checked_sub(self.delay)?;
        if age >= self.lifetime {
            return None;
        }
        Some((age.as_secs_f32() / self.fall.as_secs_f32()).min(1.0))
    }
}

/// The celebration played after a "yes".
pub fn confetti_burst<R: Rng + ?Sized>(rng: &mut R, timings: &Timings) -> Vec<ConfettiPiece> {
    (0..CONFETTI_PIECES)
        .map(|i| ConfettiPiece {
            color: CONFETTI_COLORS.choose(rng).copied().unwrap_or(CONFETTI_COLORS[0]),
            left_pct: rng.random_range(0.0..100.0),
            fall: Duration::from_secs_f32(rng.random_range(2.0..5.0)),
            delay: timings.confetti_stagger * i as u32,
            lifetime: timings.confetti_lifetime,
        })
        .collect()
}
