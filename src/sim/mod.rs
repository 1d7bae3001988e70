//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-order step per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or terminal dependencies

pub mod ai;
pub mod autopilot;
pub mod bullet;
pub mod direction;
pub mod levels;
pub mod map;
pub mod player;
pub mod state;
pub mod tank;
pub mod tick;

pub use ai::Shot;
pub use bullet::{Bullet, Impact, Owner};
pub use direction::Direction;
pub use map::{Map, Tile};
pub use state::{GamePhase, GameState};
pub use tank::{Tank, TankClass, TankKind};
pub use tick::{TickInput, TickResult, tick};
