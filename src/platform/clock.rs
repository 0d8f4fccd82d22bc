//! Interval clocks
//!
//! Each clock fires every `period_ms` of frame time, the first time one full
//! period after it starts, and reports the frame-relative offset of each
//! firing so a frame's events can be merged in time order.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::queue::Timed;
use crate::sim::Event;
use crate::tuning::Tuning;

/// Fixed-period interval counter
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period_ms: f64,
    /// Time since the last firing (or since start)
    phase_ms: f64,
    fired: u64,
}

impl IntervalClock {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            phase_ms: 0.0,
            fired: 0,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Number of firings so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Advance by `dt_ms`, returning `(offset_ms, index)` per firing
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(f64, u64)> {
        let mut fires = Vec::new();
        let mut offset = self.period_ms - self.phase_ms;
        while offset <= dt_ms {
            fires.push((offset, self.fired));
            self.fired += 1;
            offset += self.period_ms;
        }
        self.phase_ms = self.period_ms - offset + dt_ms;
        fires
    }
}

/// Game clock producing `Tick(elapsed)` with an increasing counter
#[derive(Debug, Clone)]
pub struct TickClock {
    clock: IntervalClock,
}

impl TickClock {
    pub fn for_level(tuning: &Tuning, level: u32) -> Self {
        Self {
            clock: IntervalClock::new(tuning.tick_period_ms(level)),
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.clock.period_ms()
    }

    pub fn advance(&mut self, dt_ms: f64) -> Vec<Timed> {
        self.clock
            .advance(dt_ms)
            .into_iter()
            .map(|(at, elapsed)| Timed::new(at, Event::Tick(elapsed)))
            .collect()
    }
}

/// Probabilistic enemy fire clock
///
/// Rolls once per period and emits `EnemyShoot` when the roll clears the
/// tuning threshold, independent of the game state.
#[derive(Debug, Clone)]
pub struct EnemyFireClock {
    clock: IntervalClock,
    tuning: Tuning,
    rng: Pcg32,
}

impl EnemyFireClock {
    pub fn for_level(tuning: &Tuning, level: u32, seed: u64) -> Self {
        Self {
            clock: IntervalClock::new(tuning.enemy_fire_period_ms(level)),
            tuning: tuning.clone(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.clock.period_ms()
    }

    pub fn advance(&mut self, dt_ms: f64) -> Vec<Timed> {
        let mut out = Vec::new();
        for (at, _) in self.clock.advance(dt_ms) {
            let roll: f32 = self.rng.random();
            if self.tuning.enemy_fires(roll) {
                out.push(Timed::new(at, Event::EnemyShoot));
            }
        }
        out
    }
}
