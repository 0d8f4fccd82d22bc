//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One event in, one new state out
//! - Seeded RNG only, stored in the state
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod event;
pub mod reduce;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vec;

pub use collision::{CollisionReport, bodies_collided, handle_collisions, ship_collided};
pub use event::Event;
pub use reduce::{reduce, replay};
pub use spawn::{create_bullet_from_enemy, create_bullet_from_ship, create_enemy_grid, create_ship};
pub use state::{Entity, Formation, FormationStep, GameState, RngState};
pub use tick::tick;
pub use vec::{VecExt, unit_vec_in_direction};
