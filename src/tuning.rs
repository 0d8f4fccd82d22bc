//! Data-driven timing and difficulty knobs
//!
//! These values were settled by playtesting rather than derived, so they
//! load from JSON with every field optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level_bonus;

/// No clock may fire more often than once per millisecond
pub const MIN_PERIOD_FLOOR_MS: f64 = 1.0;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Timing and difficulty tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Game clock period at level 0 (ms)
    pub tick_base_period_ms: f64,
    /// Clock period shrinks by `factor * ln(level + 1)` ms
    pub tick_level_factor: f64,
    /// Enemy fire roll period at level 0 (ms)
    pub enemy_fire_base_period_ms: f64,
    pub enemy_fire_level_factor: f64,
    /// An enemy fires when a uniform roll exceeds this
    pub enemy_fire_threshold: f32,
    /// Floor for every clock period
    pub min_period_ms: f64,
    /// Ship nudge per keyboard repeat
    pub keyboard_move_speed: f32,
    /// Repeat interval while an arrow key is held (ms)
    pub move_repeat_ms: f64,
    /// Repeat interval while the fire key is held (ms)
    pub shoot_repeat_ms: f64,
    /// Pause between clearing a level and starting the next (ms)
    pub level_countdown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_base_period_ms: 10.0,
            tick_level_factor: 2.0,
            enemy_fire_base_period_ms: 1000.0,
            enemy_fire_level_factor: 120.0,
            enemy_fire_threshold: 0.55,
            min_period_ms: 1.0,
            keyboard_move_speed: 6.5,
            move_repeat_ms: 5.0,
            shoot_repeat_ms: 1.0,
            level_countdown_ms: 4000.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.enemy_fire_threshold) {
            return Err(TuningError::Invalid {
                field: "enemy_fire_threshold",
                reason: "must be within [0, 1]",
            });
        }
        if self.min_period_ms.is_nan() || self.min_period_ms < MIN_PERIOD_FLOOR_MS {
            return Err(TuningError::Invalid {
                field: "min_period_ms",
                reason: "must be at least 1 ms",
            });
        }
        let periods = [
            ("tick_base_period_ms", self.tick_base_period_ms),
            ("enemy_fire_base_period_ms", self.enemy_fire_base_period_ms),
            ("move_repeat_ms", self.move_repeat_ms),
            ("shoot_repeat_ms", self.shoot_repeat_ms),
        ];
        for (field, value) in periods {
            if value.is_nan() || value < self.min_period_ms {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be at least min_period_ms",
                });
            }
        }
        if self.keyboard_move_speed.is_nan() || self.keyboard_move_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "keyboard_move_speed",
                reason: "must be positive",
            });
        }
        if self.level_countdown_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "level_countdown_ms",
                reason: "must not be negative",
            });
        }
        Ok(())
    }

    /// Game clock period for a level; faster as levels climb
    pub fn tick_period_ms(&self, level: u32) -> f64 {
        let period =
            self.tick_base_period_ms - level_bonus(level) as f64 * self.tick_level_factor;
        period.max(self.min_period_ms)
    }

    /// Enemy fire roll period for a level
    pub fn enemy_fire_period_ms(&self, level: u32) -> f64 {
        let period = self.enemy_fire_base_period_ms
            - level_bonus(level) as f64 * self.enemy_fire_level_factor;
        period.max(self.min_period_ms)
    }

    /// Whether a roll in [0, 1) lets an enemy fire
    pub fn enemy_fires(&self, roll: f32) -> bool {
        roll > self.enemy_fire_threshold
    }
}
