//! Projectiles
//!
//! A bullet moves one unit per tick along its direction. It resolves its own
//! collisions with the map; hits on tanks are decided by the tick loop.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::map::Map;
use crate::unit_to_cell;

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// What stopped a bullet on a map step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Wall,
    /// Damaged a destructible tile; `destroyed` if it opened up
    Destructible { destroyed: bool },
    /// Left the grid
    OutOfBounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Unit position
    pub pos: IVec2,
    pub direction: Direction,
    pub owner: Owner,
    active: bool,
}

impl Bullet {
    pub fn new(id: u32, pos: IVec2, direction: Direction, owner: Owner) -> Self {
        Self {
            id,
            pos,
            direction,
            owner,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Map cell the bullet currently occupies
    pub fn cell(&self) -> IVec2 {
        unit_to_cell(self.pos)
    }

    /// Terminal; calling again is a no-op
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Move one unit, or stop against the map.
    ///
    /// A bullet that stops never commits the blocked step. Inactive bullets
    /// do nothing and report no impact.
    pub fn advance(&mut self, map: &mut Map) -> Option<Impact> {
        if !self.active {
            return None;
        }

        let next = self.pos + self.direction.delta();
        let cell = unit_to_cell(next);

        let impact = if map.is_wall(cell) {
            Some(Impact::Wall)
        } else if map.is_destructible(cell) {
            let destroyed = map.damage_wall(cell);
            Some(Impact::Destructible { destroyed })
        } else if !map.can_shoot_through(cell) {
            Some(Impact::OutOfBounds)
        } else {
            None
        };

        match impact {
            Some(_) => self.deactivate(),
            None => self.pos = next,
        }
        impact
    }

    /// Coarse cell-level test against a target position
    pub fn collides_with(&self, target_pos: IVec2) -> bool {
        self.cell() == unit_to_cell(target_pos)
    }
}
