//! Tank Battle - a tick-driven grid tank game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (map, tanks, bullets, AI, game state)
//! - `render`: Pure render helpers (glyphs, character frames, snapshots)
//! - `tuning`: Data-driven game balance

pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Position units per map cell
    pub const CELL_SIZE: i32 = 2;

    /// Number of levels in the campaign (the last one is the boss arena)
    pub const MAX_LEVEL: u32 = 5;
    /// Level that spawns the boss instead of basic enemies
    pub const BOSS_LEVEL: u32 = 5;

    /// Player spawn cell, reused at every level start
    pub const PLAYER_START: (i32, i32) = (2, 2);

    /// Footprint edge length in cells
    pub const PLAYER_SIZE: i32 = 1;
    pub const ENEMY_SIZE: i32 = 1;
    pub const BOSS_SIZE: i32 = 3;

    /// Wall-clock delay between ticks (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 50;
}

/// Convert a unit position to the map cell containing it.
///
/// Floor division, so a unit one step left of the grid maps to cell -1 rather
/// than folding back onto cell 0.
#[inline]
pub fn unit_to_cell(pos: IVec2) -> IVec2 {
    IVec2::new(
        pos.x.div_euclid(consts::CELL_SIZE),
        pos.y.div_euclid(consts::CELL_SIZE),
    )
}

/// Convert a map cell to the unit position of its top-left corner
#[inline]
pub fn cell_to_unit(cell: IVec2) -> IVec2 {
    cell * consts::CELL_SIZE
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_to_cell_floors_negatives() {
        assert_eq!(unit_to_cell(IVec2::new(3, 4)), IVec2::new(1, 2));
        assert_eq!(unit_to_cell(IVec2::new(-1, 0)), IVec2::new(-1, 0));
        assert_eq!(unit_to_cell(IVec2::new(0, -2)), IVec2::new(0, -1));
    }

    #[test]
    fn test_cell_round_trip() {
        let cell = IVec2::new(7, 3);
        assert_eq!(unit_to_cell(cell_to_unit(cell)), cell);
        assert_eq!(manhattan(IVec2::new(1, 1), IVec2::new(4, -1)), 5);
    }
}
