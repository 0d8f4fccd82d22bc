//! Clock tick: bullet expiry and motion, formation cadence, collisions
//!
//! Motion is a fixed displacement per tick; the engine assumes the clock
//! runs at its nominal rate and never scales by real elapsed time.

use glam::Vec2;

use super::collision::handle_collisions;
use super::state::{Entity, FormationStep, GameState};
use crate::consts::*;

/// Player bullets older than this many ticks are removed
pub fn player_bullet_expired(bullet: &Entity, elapsed: u64) -> bool {
    elapsed.saturating_sub(bullet.create_time) > BULLET_LIFETIME
}

/// Enemy bullets last longer than player bullets
pub fn enemy_bullet_expired(bullet: &Entity, elapsed: u64) -> bool {
    elapsed.saturating_sub(bullet.create_time) > BULLET_LIFETIME + ENEMY_BULLET_EXTRA_LIFETIME
}

/// Advance the game state to tick `elapsed`
///
/// Expired player bullets become this tick's `exit` list; expired enemy
/// bullets are dropped without being reported. Collisions run last, against
/// the moved positions.
pub fn tick(state: &mut GameState, elapsed: u64) {
    let (expired, active): (Vec<Entity>, Vec<Entity>) = state
        .bullets
        .drain(..)
        .partition(|b| player_bullet_expired(b, elapsed));
    state.bullets = active.into_iter().map(move_bullet).collect();

    state
        .enemy_bullets
        .retain(|b| !enemy_bullet_expired(b, elapsed));
    for bullet in &mut state.enemy_bullets {
        bullet.pos -= bullet.vel;
    }

    if elapsed % FORMATION_CADENCE == 0 {
        let step = state.formation.advance();
        move_formation(&mut state.enemies, step);
    }

    state.exit = expired;
    state.time = elapsed;

    let report = handle_collisions(state);
    if report.hits > 0 {
        log::debug!("Tick {}: {} hit(s), score {}", elapsed, report.hits, state.score);
    }
    if state.game_over && (report.ship_hit || report.enemies_reached_ship) {
        log::info!(
            "Game over at tick {} (ship hit: {}, enemies landed: {}), score {}",
            elapsed,
            report.ship_hit,
            report.enemies_reached_ship,
            state.score
        );
    }
}

fn move_bullet(mut bullet: Entity) -> Entity {
    bullet.pos -= bullet.vel;
    bullet
}

fn move_formation(enemies: &mut [Entity], step: FormationStep) {
    let delta = match step {
        FormationStep::Down => Vec2::new(0.0, GRID_ROW_SPACING),
        FormationStep::Left => Vec2::new(-FORMATION_SIDE_STEP, 0.0),
        FormationStep::Right => Vec2::new(FORMATION_SIDE_STEP, 0.0),
    };
    for enemy in enemies {
        enemy.pos += delta;
        if step == FormationStep::Down {
            enemy.row = enemy.row.map(|r| r + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::create_bullet_from_ship;

    #[test]
    fn test_bullets_move_by_velocity() {
        let mut state = GameState::new(1);
        let bullet = create_bullet_from_ship(&state);
        let start = bullet.pos;
        state.bullets.push(bullet);

        tick(&mut state, 1);
        assert_eq!(state.bullets[0].pos, start - Vec2::new(0.0, 15.0));
        assert_eq!(state.time, 1);
    }

    #[test]
    fn test_player_bullet_expiry_reports_exit() {
        let mut state = GameState::new(1);
        state.time = 10;
        let bullet = create_bullet_from_ship(&state);
        state.bullets.push(bullet);

        tick(&mut state, 10 + BULLET_LIFETIME);
        assert_eq!(state.bullets.len(), 1, "lifetime boundary is inclusive");

        tick(&mut state, 10 + BULLET_LIFETIME + 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.exit.len(), 1);
        assert_eq!(state.exit[0].id, "bullet0");
    }

    #[test]
    fn test_exit_is_replaced_each_tick() {
        let mut state = GameState::new(1);
        state.exit.push(state.ship.clone());
        tick(&mut state, 1);
        assert!(state.exit.is_empty());
    }

    #[test]
    fn test_formation_moves_only_on_cadence() {
        let mut state = GameState::new(1);
        let start: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();

        tick(&mut state, 99);
        assert!(state.enemies.iter().zip(&start).all(|(e, p)| e.pos == *p));

        tick(&mut state, 100);
        assert!(
            state
                .enemies
                .iter()
                .zip(&start)
                .all(|(e, p)| e.pos == *p - Vec2::new(30.0, 0.0))
        );

        tick(&mut state, 200);
        assert!(state.enemies.iter().all(|e| e.row == Some(2)));
        assert!(
            state
                .enemies
                .iter()
                .zip(&start)
                .all(|(e, p)| e.pos == *p + Vec2::new(-30.0, 50.0))
        );

        tick(&mut state, 300);
        assert!(
            state
                .enemies
                .iter()
                .zip(&start)
                .all(|(e, p)| e.pos == *p + Vec2::new(0.0, 50.0))
        );
    }

    #[test]
    fn test_tick_zero_advances_formation() {
        let mut state = GameState::new(1);
        tick(&mut state, 0);
        assert!(state.formation.descend_next);
    }
}
