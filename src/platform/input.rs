//! Keyboard and mouse mapping
//!
//! Arrow keys repeat while held (the browser's own auto-repeat is ignored),
//! the mouse only counts inside the canvas.

use super::clock::IntervalClock;
use super::queue::Timed;
use crate::sim::Event;
use crate::tuning::Tuning;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
}

impl Key {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            _ => None,
        }
    }
}

/// Page-space rectangle of the play field (exclusive edges)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            min_x: 32.0,
            max_x: 583.0,
            min_y: 76.0,
            max_y: 676.0,
        }
    }
}

impl CanvasBounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y
    }
}

#[derive(Debug, Clone)]
struct HeldKey {
    key: Key,
    repeat: IntervalClock,
}

/// Held-key repeat state
#[derive(Debug, Clone)]
pub struct Keyboard {
    held: Vec<HeldKey>,
    move_speed: f32,
    move_repeat_ms: f64,
    shoot_repeat_ms: f64,
}

impl Keyboard {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            held: Vec::new(),
            move_speed: tuning.keyboard_move_speed,
            move_repeat_ms: tuning.move_repeat_ms,
            shoot_repeat_ms: tuning.shoot_repeat_ms,
        }
    }

    /// Start repeating `key`; repeated keydowns for a held key are ignored
    pub fn key_down(&mut self, key: Key) {
        if self.is_held(key) {
            return;
        }
        let period = match key {
            Key::Left | Key::Right => self.move_repeat_ms,
            Key::Up => self.shoot_repeat_ms,
        };
        self.held.push(HeldKey {
            key,
            repeat: IntervalClock::new(period),
        });
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.retain(|h| h.key != key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|h| h.key == key)
    }

    /// Stop every repeat (level end, game over)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Repeat events generated during the next `dt_ms`
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Timed> {
        let speed = self.move_speed;
        let mut out = Vec::new();
        for held in &mut self.held {
            let event = match held.key {
                Key::Left => Event::Move(-speed),
                Key::Right => Event::Move(speed),
                Key::Up => Event::Shoot,
            };
            out.extend(
                held.repeat
                    .advance(dt_ms)
                    .into_iter()
                    .map(|(at, _)| Timed::new(at, event)),
            );
        }
        out
    }
}
