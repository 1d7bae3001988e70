//! Cardinal facing shared by tanks and bullets

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four grid directions. Screen coordinates: +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Rotate through the direction table by `offset` slots
    pub fn offset(self, offset: usize) -> Self {
        Self::from_index(self.index() + offset)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Facing along the dominant axis of `delta`.
    ///
    /// `prefer_horizontal` decides ties (|dx| == |dy|).
    pub fn toward(delta: IVec2, prefer_horizontal: bool) -> Self {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        let horizontal = if prefer_horizontal { ax >= ay } else { ax > ay };
        if horizontal {
            if delta.x > 0 { Direction::Right } else { Direction::Left }
        } else if delta.y > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}
