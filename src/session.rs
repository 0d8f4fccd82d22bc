//! Session orchestration
//!
//! Owns the running `GameState`, feeds it events from the platform
//! producers, and acts on the two terminal signals: a cleared level starts a
//! countdown into the next one, a game over waits for a retry click.

use crate::platform::{CanvasBounds, EnemyFireClock, EventQueue, Key, Keyboard, TickClock};
use crate::sim::{Entity, Event, GameState, reduce};
use crate::tuning::Tuning;

/// Longest frame the session will simulate in one `update` (ms)
pub const MAX_FRAME_MS: f64 = 100.0;

/// Where the session is in the level flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    /// Level cleared, next level starts when the countdown runs out
    LevelComplete { remaining_ms: f64 },
    GameOver,
}

/// Terminal condition raised while folding events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    LevelComplete,
    GameOver,
}

/// Check a state for a terminal condition
pub fn terminal_signal(state: &GameState) -> Option<Signal> {
    if state.game_over {
        Some(Signal::GameOver)
    } else if state.level_complete() {
        Some(Signal::LevelComplete)
    } else {
        None
    }
}

/// A single play session
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    bounds: CanvasBounds,
    seed: u64,
    state: GameState,
    phase: Phase,
    queue: EventQueue,
    keyboard: Keyboard,
    tick_clock: TickClock,
    fire_clock: EnemyFireClock,
    /// Entities removed since the renderer last asked
    pending_exits: Vec<Entity>,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(seed);
        log::info!(
            "Session started (seed {}, tick {:.2} ms, enemy fire {:.0} ms)",
            seed,
            tuning.tick_period_ms(0),
            tuning.enemy_fire_period_ms(0)
        );
        Self {
            bounds: CanvasBounds::default(),
            seed,
            phase: Phase::Playing,
            queue: EventQueue::new(),
            keyboard: Keyboard::new(&tuning),
            tick_clock: TickClock::for_level(&tuning, 0),
            fire_clock: EnemyFireClock::for_level(&tuning, 0, fire_seed(seed, 0)),
            pending_exits: Vec::new(),
            state,
            tuning,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left shown during the level countdown (3, 2, 1, 0)
    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            Phase::LevelComplete { remaining_ms } => {
                let shown = (remaining_ms / 1000.0).ceil() as i64 - 1;
                Some(shown.clamp(0, 3) as u32)
            }
            _ => None,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.phase == Phase::Playing {
            self.keyboard.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keyboard.key_up(key);
    }

    /// Mouse moved to page coordinates `(x, y)`
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.phase == Phase::Playing && self.bounds.contains(x, y) {
            self.queue.push(Event::ChangePosition(x));
        }
    }

    /// Mouse pressed at page coordinates `(x, y)`
    ///
    /// Fires while playing; after a game over it starts a new session.
    pub fn mouse_down(&mut self, x: f32, y: f32) {
        if !self.bounds.contains(x, y) {
            return;
        }
        match self.phase {
            Phase::Playing => self.queue.push(Event::Shoot),
            Phase::GameOver => self.retry(),
            Phase::LevelComplete { .. } => {}
        }
    }

    /// Queue an event directly (scripted input, tests)
    pub fn push(&mut self, event: Event) {
        if self.phase == Phase::Playing {
            self.queue.push(event);
        }
    }

    /// Advance wall-clock time by `dt_ms` and process every resulting event
    pub fn update(&mut self, dt_ms: f64) -> Option<Signal> {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        match self.phase {
            Phase::Playing => {
                let mut batch = self.keyboard.advance(dt_ms);
                batch.extend(self.tick_clock.advance(dt_ms));
                batch.extend(self.fire_clock.advance(dt_ms));
                self.queue.push_batch(batch);
                self.drain()
            }
            Phase::LevelComplete { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.start_next_level();
                } else {
                    self.phase = Phase::LevelComplete { remaining_ms };
                }
                None
            }
            Phase::GameOver => None,
        }
    }

    /// Fold queued events until the queue empties or a terminal signal fires
    pub fn drain(&mut self) -> Option<Signal> {
        while let Some(event) = self.queue.pop() {
            self.state = reduce(&self.state, event);
            if event.is_tick() {
                self.pending_exits.extend(self.state.exit.iter().cloned());
            }
            if let Some(signal) = terminal_signal(&self.state) {
                self.enter_terminal(signal);
                return Some(signal);
            }
        }
        None
    }

    /// Entities the renderer should erase, since the last call
    ///
    /// May contain the same entity twice; removal must tolerate that.
    pub fn drain_exits(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.pending_exits)
    }

    /// Start over at level 0 with a fresh seed derived from the old one
    pub fn retry(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        log::info!("Retry (seed {}), final score was {}", self.seed, self.state.score);
        self.state = GameState::new(self.seed);
        self.reset_producers();
        self.phase = Phase::Playing;
    }

    fn enter_terminal(&mut self, signal: Signal) {
        self.queue.clear();
        self.keyboard.release_all();
        self.phase = match signal {
            Signal::GameOver => {
                log::info!(
                    "Game over on level {} with score {}",
                    self.state.level,
                    self.state.score
                );
                Phase::GameOver
            }
            Signal::LevelComplete => {
                log::info!(
                    "Level {} complete, score {}",
                    self.state.level,
                    self.state.score
                );
                Phase::LevelComplete {
                    remaining_ms: self.tuning.level_countdown_ms,
                }
            }
        };
    }

    fn start_next_level(&mut self) {
        self.state = self.state.next_level();
        self.reset_producers();
        self.phase = Phase::Playing;
    }

    fn reset_producers(&mut self) {
        let level = self.state.level;
        self.queue.clear();
        self.keyboard = Keyboard::new(&self.tuning);
        self.tick_clock = TickClock::for_level(&self.tuning, level);
        self.fire_clock =
            EnemyFireClock::for_level(&self.tuning, level, fire_seed(self.seed, level));
        log::debug!(
            "Level {} clocks: tick {:.2} ms, enemy fire {:.0} ms",
            level,
            self.tick_clock.period_ms(),
            self.fire_clock.period_ms()
        );
    }
}

/// Independent stream for the enemy fire rolls of each level
fn fire_seed(seed: u64, level: u32) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(level as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHIP_ROW;

    fn quiet_tuning() -> Tuning {
        Tuning {
            enemy_fire_threshold: 1.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_update_ticks_the_state() {
        let mut session = Session::new(quiet_tuning(), 1);
        assert_eq!(session.update(35.0), None);
        // Ticks 0, 1, 2
        assert_eq!(session.state().time, 2);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_mouse_outside_canvas_ignored() {
        let mut session = Session::new(quiet_tuning(), 1);
        let x = session.state().ship.pos.x;
        session.mouse_move(10.0, 300.0);
        session.mouse_down(10.0, 300.0);
        session.drain();
        assert_eq!(session.state().ship.pos.x, x);
        assert!(session.state().bullets.is_empty());

        session.mouse_move(200.0, 300.0);
        session.mouse_down(200.0, 300.0);
        session.drain();
        assert_eq!(session.state().ship.pos.x, 168.0);
        assert_eq!(session.state().bullets.len(), 1);
    }

    #[test]
    fn test_game_over_stops_and_retry_restarts() {
        let mut session = Session::new(quiet_tuning(), 1);
        session.state.enemies[0].row = Some(SHIP_ROW);
        session.push(Event::Tick(1));
        session.push(Event::Shoot);
        assert_eq!(session.drain(), Some(Signal::GameOver));
        assert_eq!(session.phase(), Phase::GameOver);
        // The queued shot was discarded
        assert!(session.state().bullets.is_empty());
        assert_eq!(session.update(500.0), None);

        session.mouse_down(300.0, 300.0);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.state().score, 0);
        assert!(!session.state().game_over);
        assert_eq!(session.state().level, 0);
    }

    #[test]
    fn test_level_countdown_then_next_level() {
        let mut session = Session::new(quiet_tuning(), 1);
        session.state.score = 5;
        session.state.enemies.clear();
        session.push(Event::Tick(1));
        assert_eq!(session.drain(), Some(Signal::LevelComplete));
        assert_eq!(session.countdown(), Some(3));

        session.update(100.0);
        session.update(100.0);
        for _ in 0..8 {
            session.update(100.0);
        }
        assert_eq!(session.countdown(), Some(2));

        for _ in 0..30 {
            session.update(100.0);
        }
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.state().level, 1);
        assert_eq!(session.state().score, 5);
        assert_eq!(session.state().enemies.len(), 7);
    }

    #[test]
    fn test_exits_accumulate_across_ticks() {
        let mut session = Session::new(quiet_tuning(), 1);
        session.push(Event::Shoot);
        session.drain();
        for t in 0..45 {
            session.push(Event::Tick(t));
        }
        session.drain();
        let exits = session.drain_exits();
        assert!(exits.iter().any(|e| e.id == "bullet0"));
        assert!(session.drain_exits().is_empty());
    }
}
