//! Entity constructors
//!
//! All constructors are pure: they read a state and return a new entity,
//! leaving id bookkeeping (`obj_count`) to the reducer.

use glam::Vec2;

use super::state::{Entity, GameState};
use super::vec::unit_vec_in_direction;
use crate::consts::*;
use crate::level_bonus;

/// Player ship at its start position
pub fn create_ship() -> Entity {
    Entity {
        id: "ship".to_string(),
        pos: Vec2::new(SHIP_START_X, SHIP_START_Y),
        vel: Vec2::ZERO,
        radius: SHIP_RADIUS,
        create_time: 0,
        row: Some(SHIP_ROW),
        col: None,
    }
}

/// Bullet leaving the ship's nose, always fired straight up
pub fn create_bullet_from_ship(state: &GameState) -> Entity {
    let d = unit_vec_in_direction(0.0);
    let ship = &state.ship;
    Entity {
        id: format!("bullet{}", state.obj_count),
        pos: ship.pos + d * ship.radius + Vec2::from(SHIP_MUZZLE_OFFSET),
        // Bullets move by `pos - vel`, so a downward velocity travels up
        vel: ship.vel + d * -BULLET_VELOCITY,
        radius: BULLET_RADIUS,
        create_time: state.time,
        row: None,
        col: None,
    }
}

/// Index of the enemy picked by a uniform sample in [0, 1)
///
/// `ceil(len * r) - 1`, saturated so a sample of exactly 0 picks the first
/// enemy instead of underflowing.
pub fn shooter_index(enemy_count: usize, random_value: f32) -> usize {
    let idx = (enemy_count as f32 * random_value).ceil() as usize;
    idx.saturating_sub(1).min(enemy_count.saturating_sub(1))
}

/// Bullet fired downward by a randomly picked enemy
///
/// Speed grows with `ln(level + 1)`. Returns `None` when no enemy is left
/// to shoot.
pub fn create_bullet_from_enemy(state: &GameState, random_value: f32) -> Option<Entity> {
    if state.enemies.is_empty() {
        return None;
    }
    let d = unit_vec_in_direction(0.0);
    let enemy = &state.enemies[shooter_index(state.enemies.len(), random_value)];
    let speed = BULLET_VELOCITY - ENEMY_BULLET_SLOWDOWN + level_bonus(state.level);
    Some(Entity {
        id: format!("bullet{}", state.obj_count),
        pos: enemy.pos + d * enemy.radius + Vec2::from(ENEMY_MUZZLE_OFFSET),
        vel: enemy.vel + d * speed,
        radius: BULLET_RADIUS,
        create_time: state.time,
        row: None,
        col: None,
    })
}

/// Lay out `count` enemies in a five-column grid
///
/// Slot `i` lands at column `(i + 1) % 5`, row `ceil((i + 1) / 5)`, so the
/// fifth enemy of every row wraps to column 0.
pub fn create_enemy_grid(count: usize) -> Vec<Entity> {
    (0..count as u32)
        .map(|i| {
            let slot = i + 1;
            let col = slot % GRID_COLUMNS;
            let row = slot.div_ceil(GRID_COLUMNS);
            Entity {
                id: format!("enemy{}", i),
                pos: Vec2::from(GRID_ORIGIN)
                    + Vec2::new(
                        GRID_COLUMN_SPACING * col as f32,
                        GRID_ROW_SPACING * row as f32,
                    ),
                vel: Vec2::ZERO,
                radius: ENEMY_RADIUS,
                create_time: 0,
                row: Some(row),
                col: Some(col),
            }
        })
        .collect()
}
