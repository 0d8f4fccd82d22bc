//! Platform abstraction layer
//!
//! Turns raw input and wall-clock time into simulation events:
//! - `queue`: single-consumer FIFO of events
//! - `clock`: fixed-period interval producers (game clock, enemy fire)
//! - `input`: keyboard hold-repeat and mouse mapping

pub mod clock;
pub mod input;
pub mod queue;

pub use clock::{EnemyFireClock, IntervalClock, TickClock};
pub use input::{CanvasBounds, Key, Keyboard};
pub use queue::{EventQueue, Timed};
