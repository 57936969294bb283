//! Shared animation clock
//!
//! Animated designs do not keep per-ball state: every blinking ball blinks in
//! step, every spinning ball shares one phase, and all noise balls show the
//! same four grays until the next regeneration.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::surface::Color;

/// Blink toggle interval
pub const BLINK_PERIOD_MS: f64 = 150.0;
/// Gray regeneration interval
pub const NOISE_PERIOD_MS: f64 = 500.0;
/// Spinning designs turn this many times per second
pub const SPIN_REVS_PER_SEC: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct AnimationClock {
    elapsed_ms: f64,
    blink_acc: f64,
    blink_on: bool,
    noise_acc: f64,
    noise_generation: u64,
    grays: [Color; 4],
    rng: Pcg32,
}

impl AnimationClock {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grays = random_grays(&mut rng);
        Self {
            elapsed_ms: 0.0,
            blink_acc: 0.0,
            blink_on: false,
            noise_acc: 0.0,
            noise_generation: 0,
            grays,
            rng,
        }
    }

    /// Advance by a frame's wall-clock delta
    pub fn advance(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.max(0.0);
        self.elapsed_ms += dt_ms;

        self.blink_acc += dt_ms;
        while self.blink_acc >= BLINK_PERIOD_MS {
            self.blink_acc -= BLINK_PERIOD_MS;
            self.blink_on = !self.blink_on;
        }

        self.noise_acc += dt_ms;
        if self.noise_acc >= NOISE_PERIOD_MS {
            // Skipped periods collapse into one regeneration
            self.noise_acc %= NOISE_PERIOD_MS;
            self.grays = random_grays(&mut self.rng);
            self.noise_generation += 1;
        }
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    /// Spin phase in [0, TAU)
    pub fn rotation(&self) -> f32 {
        let turns = self.elapsed_ms / 1000.0 * SPIN_REVS_PER_SEC;
        (turns.fract() as f32) * TAU
    }

    pub fn grays(&self) -> &[Color; 4] {
        &self.grays
    }

    /// Number of gray regenerations so far
    pub fn noise_generation(&self) -> u64 {
        self.noise_generation
    }
}

fn random_grays(rng: &mut Pcg32) -> [Color; 4] {
    std::array::from_fn(|_| Color::gray(rng.random::<u8>()))
}
