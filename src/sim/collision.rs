//! Collision detection and scoring
//!
//! Everything here is circle-vs-circle. The ship sprite origin is its top
//! left corner, so ship tests shift to the hitbox center first.

use glam::Vec2;

use super::state::{Entity, GameState};
use crate::consts::SHIP_HITBOX_OFFSET;

/// Circle overlap on raw positions
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    (a_pos - b_pos).length() < a_radius + b_radius
}

/// Bullet/enemy overlap
#[inline]
pub fn bodies_collided(a: &Entity, b: &Entity) -> bool {
    circles_overlap(a.pos, a.radius, b.pos, b.radius)
}

/// Ship/bullet overlap, measured from the ship's hitbox center
#[inline]
pub fn ship_collided(ship: &Entity, bullet: &Entity) -> bool {
    circles_overlap(
        ship.pos + Vec2::from(SHIP_HITBOX_OFFSET),
        ship.radius,
        bullet.pos,
        bullet.radius,
    )
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Player bullet / enemy pairs that overlapped
    pub hits: usize,
    pub ship_hit: bool,
    pub enemies_reached_ship: bool,
}

/// Resolve collisions in place
///
/// Every overlapping player-bullet/enemy pair removes both entities (by id)
/// and adds one point; both are appended to `exit`. The game ends if an enemy
/// bullet hits the ship or a surviving enemy reaches the ship's row, and
/// stays ended.
pub fn handle_collisions(state: &mut GameState) -> CollisionReport {
    let pairs: Vec<(&Entity, &Entity)> = state
        .bullets
        .iter()
        .flat_map(|b| state.enemies.iter().map(move |e| (b, e)))
        .filter(|(b, e)| bodies_collided(b, e))
        .collect();

    let hit_bullets: Vec<Entity> = pairs.iter().map(|(b, _)| (*b).clone()).collect();
    let hit_enemies: Vec<Entity> = pairs.iter().map(|(_, e)| (*e).clone()).collect();
    let hits = pairs.len();

    let ship_hit = state
        .enemy_bullets
        .iter()
        .any(|b| ship_collided(&state.ship, b));

    let removed = |e: &Entity, hit: &[Entity]| hit.iter().any(|h| h.id == e.id);
    state.bullets.retain(|b| !removed(b, &hit_bullets));
    state.enemies.retain(|e| !removed(e, &hit_enemies));

    state.score += hits as u64;
    state.exit.extend(hit_bullets);
    state.exit.extend(hit_enemies);

    let enemies_reached_ship = state.enemies.iter().any(|e| e.row == state.ship.row);
    state.game_over = state.game_over || ship_hit || enemies_reached_ship;

    CollisionReport {
        hits,
        ship_hit,
        enemies_reached_ship,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHIP_ROW;

    fn body(id: &str, x: f32, y: f32, radius: f32) -> Entity {
        Entity {
            id: id.to_string(),
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            create_time: 0,
            row: None,
            col: None,
        }
    }

    fn empty_state() -> GameState {
        let mut state = GameState::new(1);
        state.enemies.clear();
        state
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 2.0, Vec2::new(3.9, 0.0), 2.0));
        assert!(!circles_overlap(Vec2::ZERO, 2.0, Vec2::new(4.0, 0.0), 2.0));
    }

    #[test]
    fn test_ship_hitbox_is_offset() {
        let ship = body("ship", 100.0, 100.0, 25.0);
        // At the sprite origin but far from the hitbox center
        let at_origin = body("b", 100.0, 70.0, 3.0);
        assert!(!ship_collided(&ship, &at_origin));
        let at_center = body("b", 128.0, 143.0, 3.0);
        assert!(ship_collided(&ship, &at_center));
    }

    #[test]
    fn test_bullet_enemy_hit_scores_once() {
        let mut state = empty_state();
        state.bullets.push(body("bullet0", 200.0, 200.0, 3.0));
        let mut enemy = body("enemy0", 205.0, 200.0, 20.0);
        enemy.row = Some(1);
        state.enemies.push(enemy);

        let report = handle_collisions(&mut state);
        assert_eq!(report.hits, 1);
        assert_eq!(state.score, 1);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        let exit: Vec<_> = state.exit.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(exit, vec!["bullet0", "enemy0"]);
        assert!(!state.game_over);
    }

    #[test]
    fn test_score_counts_pairs_not_entities() {
        let mut state = empty_state();
        state.bullets.push(body("bullet0", 200.0, 200.0, 3.0));
        for (i, x) in [190.0, 210.0].into_iter().enumerate() {
            let mut enemy = body(&format!("enemy{i}"), x, 200.0, 20.0);
            enemy.row = Some(1);
            state.enemies.push(enemy);
        }

        handle_collisions(&mut state);
        assert_eq!(state.score, 2);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        // The bullet shows up once per pair
        assert_eq!(state.exit.iter().filter(|e| e.id == "bullet0").count(), 2);
    }

    #[test]
    fn test_enemy_bullet_hits_ship() {
        let mut state = empty_state();
        let hitbox = state.ship.pos + Vec2::from(SHIP_HITBOX_OFFSET);
        state.enemy_bullets.push(body("bullet3", hitbox.x, hitbox.y, 3.0));

        let report = handle_collisions(&mut state);
        assert!(report.ship_hit);
        assert!(state.game_over);
    }

    #[test]
    fn test_enemy_on_ship_row_ends_game() {
        let mut state = empty_state();
        let mut enemy = body("enemy0", 10.0, 10.0, 20.0);
        enemy.row = Some(SHIP_ROW);
        state.enemies.push(enemy);

        let report = handle_collisions(&mut state);
        assert!(report.enemies_reached_ship);
        assert!(state.game_over);
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut state = empty_state();
        state.game_over = true;
        handle_collisions(&mut state);
        assert!(state.game_over);
    }
}
