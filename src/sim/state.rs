//! Game state and core simulation types
//!
//! Everything the reducer threads from one event to the next lives here,
//! including the formation flip-flops and the RNG cursor, so a state plus an
//! event sequence fully determines the game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::{create_enemy_grid, create_ship};
use crate::enemy_count_for_level;

/// Ship, bullet or enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Tick at which the entity was spawned
    pub create_time: u64,
    /// Grid rank for enemies, sentinel row for the ship, `None` for bullets
    pub row: Option<u32>,
    /// Grid column (enemies only)
    pub col: Option<u32>,
}

/// Shared movement state of the enemy grid
///
/// Two independent flip-flops: one alternates sideways and downward steps,
/// the other alternates left and right among the sideways steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Formation {
    pub descend_next: bool,
    pub sweep_right_next: bool,
}

/// Formation step chosen for a cadence tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    Down,
    Left,
    Right,
}

impl Formation {
    /// Flip the toggles and report which way the grid moves this time
    pub fn advance(&mut self) -> FormationStep {
        let step = if self.descend_next {
            FormationStep::Down
        } else {
            let side = if self.sweep_right_next {
                FormationStep::Right
            } else {
                FormationStep::Left
            };
            self.sweep_right_next = !self.sweep_right_next;
            side
        };
        self.descend_next = !self.descend_next;
        step
    }
}

/// RNG state wrapper for serialization
///
/// Samples are drawn by re-seeding and skipping ahead `draws` steps, so the
/// state stays a plain value that clones and serializes cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }

    /// Uniform sample in [0, 1)
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.to_rng().random::<f32>();
        self.draws += 1;
        sample
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (0-based)
    pub level: u32,
    /// Last elapsed tick seen
    pub time: u64,
    pub ship: Entity,
    pub score: u64,
    /// Player bullets
    pub bullets: Vec<Entity>,
    pub enemy_bullets: Vec<Entity>,
    pub enemies: Vec<Entity>,
    /// Entities removed during the last tick, for render cleanup
    pub exit: Vec<Entity>,
    /// Spawn counter behind bullet ids
    pub obj_count: u64,
    pub game_over: bool,
    pub formation: Formation,
    pub rng_state: RngState,
}

impl GameState {
    /// Fresh session at level 0
    pub fn new(seed: u64) -> Self {
        Self::for_level(0, seed)
    }

    /// Fresh state for an arbitrary level with a new ship and zero score
    pub fn for_level(level: u32, seed: u64) -> Self {
        let enemies = create_enemy_grid(enemy_count_for_level(level));
        log::info!("Level {}: {} enemies", level, enemies.len());
        Self {
            level,
            time: 0,
            ship: create_ship(),
            score: 0,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies,
            exit: Vec::new(),
            obj_count: 0,
            game_over: false,
            formation: Formation::default(),
            rng_state: RngState::new(seed),
        }
    }

    /// State for `level + 1`
    ///
    /// Ship, score, spawn counter and RNG cursor carry over; bullets are
    /// cleared and the grid is regenerated with two more enemies. The clock
    /// restarts, so `time` goes back to zero.
    pub fn next_level(&self) -> Self {
        let level = self.level + 1;
        let enemies = create_enemy_grid(enemy_count_for_level(level));
        log::info!(
            "Level {}: {} enemies, score carried {}",
            level,
            enemies.len(),
            self.score
        );
        Self {
            level,
            time: 0,
            ship: self.ship.clone(),
            score: self.score,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies,
            exit: Vec::new(),
            obj_count: self.obj_count,
            game_over: false,
            formation: Formation::default(),
            rng_state: self.rng_state.clone(),
        }
    }

    /// All enemies destroyed
    pub fn level_complete(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Ids of every live entity, ship first
    pub fn live_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.ship.id.as_str()).chain(
            self.bullets
                .iter()
                .chain(&self.enemy_bullets)
                .chain(&self.enemies)
                .map(|e| e.id.as_str()),
        )
    }
}
