//! Tank entities
//!
//! Every tank shares position, facing and footprint. What drives it is the
//! `TankKind` tag: input for the player, a controller state for enemies and
//! the boss.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::map::Map;
use crate::consts::{BOSS_SIZE, CELL_SIZE, ENEMY_SIZE, PLAYER_SIZE};
use crate::{cell_to_unit, unit_to_cell};

/// Basic enemy controller state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub move_timer: u32,
    pub shoot_timer: u32,
}

/// Boss controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossBrain {
    pub move_timer: u32,
    pub shoot_timer: u32,
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankKind {
    Player,
    Enemy(EnemyBrain),
    Boss(BossBrain),
}

/// Tag without controller state, for render views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankClass {
    Player,
    Enemy,
    Boss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    /// Unit position of the footprint's top-left corner
    pub pos: IVec2,
    pub facing: Direction,
    pub kind: TankKind,
}

impl Tank {
    pub fn player(id: u32, cell: IVec2) -> Self {
        Self::spawn(id, cell, TankKind::Player)
    }

    pub fn enemy(id: u32, cell: IVec2) -> Self {
        Self::spawn(id, cell, TankKind::Enemy(EnemyBrain::default()))
    }

    pub fn boss(id: u32, cell: IVec2, health: i32) -> Self {
        Self::spawn(
            id,
            cell,
            TankKind::Boss(BossBrain {
                move_timer: 0,
                shoot_timer: 0,
                health,
            }),
        )
    }

    fn spawn(id: u32, cell: IVec2, kind: TankKind) -> Self {
        Self {
            id,
            pos: cell_to_unit(cell),
            facing: Direction::Right,
            kind,
        }
    }

    pub fn class(&self) -> TankClass {
        match self.kind {
            TankKind::Player => TankClass::Player,
            TankKind::Enemy(_) => TankClass::Enemy,
            TankKind::Boss(_) => TankClass::Boss,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, TankKind::Boss(_))
    }

    /// Remaining boss health; `None` for other tanks
    pub fn health(&self) -> Option<i32> {
        match &self.kind {
            TankKind::Boss(brain) => Some(brain.health),
            _ => None,
        }
    }

    /// Footprint edge length in cells
    pub fn size(&self) -> i32 {
        match self.kind {
            TankKind::Player => PLAYER_SIZE,
            TankKind::Enemy(_) => ENEMY_SIZE,
            TankKind::Boss(_) => BOSS_SIZE,
        }
    }

    /// Footprint edge length in units
    pub fn span(&self) -> i32 {
        self.size() * CELL_SIZE
    }

    /// Anchor (top-left) cell
    pub fn cell(&self) -> IVec2 {
        unit_to_cell(self.pos)
    }

    /// Every cell the body covers when anchored at `pos`
    pub fn footprint_at(&self, pos: IVec2) -> impl Iterator<Item = IVec2> + use<> {
        let anchor = unit_to_cell(pos);
        let size = self.size();
        (0..size).flat_map(move |dy| (0..size).map(move |dx| anchor + IVec2::new(dx, dy)))
    }

    pub fn footprint(&self) -> impl Iterator<Item = IVec2> + use<> {
        self.footprint_at(self.pos)
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        let rel = cell - self.cell();
        let size = self.size();
        rel.x >= 0 && rel.y >= 0 && rel.x < size && rel.y < size
    }

    /// True iff every footprint cell at `pos` is enterable
    pub fn can_occupy(&self, map: &Map, pos: IVec2) -> bool {
        self.footprint_at(pos).all(|cell| map.is_valid_position(cell))
    }

    /// Move one cell along `dir` if the whole destination footprint is free.
    ///
    /// Does not touch `facing`.
    pub fn try_step(&mut self, map: &Map, dir: Direction) -> bool {
        let next = self.pos + dir.delta() * CELL_SIZE;
        if self.can_occupy(map, next) {
            self.pos = next;
            true
        } else {
            false
        }
    }

    /// Center of the body in units
    pub fn center(&self) -> IVec2 {
        self.pos + IVec2::splat(self.span() / 2)
    }

    /// Unit position just past the middle of the facing side
    pub fn muzzle(&self) -> IVec2 {
        let span = self.span();
        let mid = span / 2;
        self.pos
            + match self.facing {
                Direction::Up => IVec2::new(mid, -1),
                Direction::Down => IVec2::new(mid, span),
                Direction::Left => IVec2::new(-1, mid),
                Direction::Right => IVec2::new(span, mid),
            }
    }

    /// Two barrels flanking the middle of the facing side
    pub fn twin_muzzles(&self) -> [IVec2; 2] {
        let span = self.span();
        let (near, far) = (1, span - 2);
        let offsets = match self.facing {
            Direction::Up => [IVec2::new(near, -1), IVec2::new(far, -1)],
            Direction::Down => [IVec2::new(near, span), IVec2::new(far, span)],
            Direction::Left => [IVec2::new(-1, near), IVec2::new(-1, far)],
            Direction::Right => [IVec2::new(span, near), IVec2::new(span, far)],
        };
        offsets.map(|o| self.pos + o)
    }
}
