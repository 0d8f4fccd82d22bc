//! State reducer
//!
//! `reduce` is the only entry point the rest of the game uses to change a
//! `GameState`. It never mutates its input.

use super::event::Event;
use super::spawn::{create_bullet_from_enemy, create_bullet_from_ship};
use super::state::GameState;
use super::tick::tick;
use crate::consts::{CANVAS_SIZE, MOUSE_RECENTER_OFFSET, SHIP_RIGHT_MARGIN};

/// Apply one event and return the next state
///
/// Once `game_over` is set the state is frozen and every event is ignored.
pub fn reduce(state: &GameState, event: Event) -> GameState {
    let mut next = state.clone();
    if next.game_over {
        return next;
    }
    apply(&mut next, event);
    next
}

/// Fold a sequence of events onto a state
pub fn replay<I>(state: &GameState, events: I) -> GameState
where
    I: IntoIterator<Item = Event>,
{
    events
        .into_iter()
        .fold(state.clone(), |s, event| reduce(&s, event))
}

fn apply(state: &mut GameState, event: Event) {
    match event {
        Event::Move(delta) => {
            let x = state.ship.pos.x + delta;
            if (0.0..=CANVAS_SIZE - SHIP_RIGHT_MARGIN).contains(&x) {
                state.ship.pos.x = x;
            }
        }
        // Mouse positioning is deliberately unclamped
        Event::ChangePosition(x) => {
            state.ship.pos.x = x - MOUSE_RECENTER_OFFSET;
        }
        Event::Shoot => {
            if !state.bullets.is_empty() {
                log::debug!("Shoot ignored, player bullet still live");
                return;
            }
            let bullet = create_bullet_from_ship(state);
            state.bullets.push(bullet);
            state.obj_count += 1;
        }
        Event::EnemyShoot => {
            let sample = state.rng_state.next_sample();
            match create_bullet_from_enemy(state, sample) {
                Some(bullet) => {
                    state.enemy_bullets.push(bullet);
                    state.obj_count += 1;
                }
                None => log::debug!("EnemyShoot with no enemies left"),
            }
        }
        Event::Tick(elapsed) => tick(state, elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_move_within_bounds() {
        let state = GameState::new(1);
        let next = reduce(&state, Event::Move(6.5));
        assert_eq!(next.ship.pos.x, state.ship.pos.x + 6.5);
        assert_eq!(next.ship.pos.y, state.ship.pos.y);
        // Input untouched
        assert_eq!(state.ship.pos.x, SHIP_START_X);
    }

    #[test]
    fn test_move_rejected_past_edges() {
        let mut state = GameState::new(1);
        state.ship.pos.x = 2.0;
        assert_eq!(reduce(&state, Event::Move(-6.5)).ship.pos.x, 2.0);

        state.ship.pos.x = CANVAS_SIZE - SHIP_RIGHT_MARGIN - 1.0;
        assert_eq!(
            reduce(&state, Event::Move(6.5)).ship.pos.x,
            CANVAS_SIZE - SHIP_RIGHT_MARGIN - 1.0
        );
    }

    #[test]
    fn test_change_position_is_unclamped() {
        let state = GameState::new(1);
        assert_eq!(reduce(&state, Event::ChangePosition(100.0)).ship.pos.x, 68.0);
        assert_eq!(reduce(&state, Event::ChangePosition(2000.0)).ship.pos.x, 1968.0);
    }

    #[test]
    fn test_shoot_rate_limited() {
        let state = GameState::new(1);
        let next = replay(&state, [Event::Shoot, Event::Shoot]);
        assert_eq!(next.bullets.len(), 1);
        assert_eq!(next.obj_count, 1);
    }

    #[test]
    fn test_enemy_shoot_unbounded() {
        let state = GameState::new(1);
        let next = replay(&state, std::iter::repeat_n(Event::EnemyShoot, 12));
        assert_eq!(next.enemy_bullets.len(), 12);
        assert_eq!(next.obj_count, 12);
        assert_eq!(next.rng_state.draws, 12);
    }

    #[test]
    fn test_bullet_ids_unique_across_kinds() {
        let state = GameState::new(1);
        let next = replay(
            &state,
            [Event::EnemyShoot, Event::Shoot, Event::EnemyShoot, Event::Shoot],
        );
        let mut ids: Vec<_> = next.live_ids().collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(next.bullets[0].id, "bullet1");
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = GameState::new(1);
        state.game_over = true;
        for event in [
            Event::Move(5.0),
            Event::ChangePosition(10.0),
            Event::Shoot,
            Event::EnemyShoot,
            Event::Tick(100),
        ] {
            assert_eq!(reduce(&state, event), state);
        }
    }
}
