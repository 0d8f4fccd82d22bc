//! Events consumed by the reducer

use serde::{Deserialize, Serialize};

/// One discrete input or timer event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Keyboard nudge of the ship along x (signed)
    Move(f32),
    /// Absolute ship x from the mouse cursor
    ChangePosition(f32),
    /// Player fires
    Shoot,
    /// A random enemy fires
    EnemyShoot,
    /// Clock advance carrying the elapsed tick count
    Tick(u64),
}

impl Event {
    /// Clock events drive physics; everything else is input
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick(_))
    }
}
