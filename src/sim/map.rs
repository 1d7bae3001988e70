//! Tile map
//!
//! A fixed-size grid of cells. Walls block everything forever; destructible
//! tiles block until bullets wear them down to open ground.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Open,
    Wall,
    /// Blocks until `hits` reaches zero
    Destructible { hits: u8 },
}

impl Tile {
    pub fn is_blocking(self) -> bool {
        !matches!(self, Tile::Open)
    }
}

/// Layout characters
pub const WALL_CHAR: char = '#';
pub const DESTRUCTIBLE_CHAR: char = '%';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: i32,
    height: i32,
    /// Row-major
    tiles: Vec<Tile>,
}

impl Map {
    /// All-open map
    pub fn open(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::Open; (width * height) as usize],
        }
    }

    /// Build a map from layout rows: `#` wall, `%` destructible, anything else
    /// open. Short rows are padded with open tiles.
    pub fn from_layout(rows: &[&str], destructible_hits: u8) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut map = Self::open(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    WALL_CHAR => Tile::Wall,
                    DESTRUCTIBLE_CHAR => Tile::Destructible {
                        hits: destructible_hits.max(1),
                    },
                    _ => Tile::Open,
                };
                map.set(IVec2::new(x as i32, y as i32), tile);
            }
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Tile at `cell`, or `None` outside the grid
    pub fn tile(&self, cell: IVec2) -> Option<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Overwrite a tile; ignored outside the grid
    pub fn set(&mut self, cell: IVec2, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    /// In bounds and free of walls and destructible tiles. Tanks may enter.
    pub fn is_valid_position(&self, cell: IVec2) -> bool {
        self.tile(cell).is_some_and(|t| !t.is_blocking())
    }

    /// A line of fire passes through this cell
    pub fn can_shoot_through(&self, cell: IVec2) -> bool {
        self.tile(cell).is_some_and(|t| !t.is_blocking())
    }

    pub fn is_wall(&self, cell: IVec2) -> bool {
        matches!(self.tile(cell), Some(Tile::Wall))
    }

    pub fn is_destructible(&self, cell: IVec2) -> bool {
        matches!(self.tile(cell), Some(Tile::Destructible { .. }))
    }

    /// Knock one hit off a destructible tile, opening it when exhausted.
    ///
    /// Returns true if the tile opened up.
    pub fn damage_wall(&mut self, cell: IVec2) -> bool {
        let Some(i) = self.index(cell) else {
            return false;
        };
        match self.tiles[i] {
            Tile::Destructible { hits } if hits > 1 => {
                self.tiles[i] = Tile::Destructible { hits: hits - 1 };
                false
            }
            Tile::Destructible { .. } => {
                self.tiles[i] = Tile::Open;
                log::debug!("Destructible wall at ({}, {}) destroyed", cell.x, cell.y);
                true
            }
            _ => false,
        }
    }

    /// Rows of tiles, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Map {
        Map::from_layout(&["#####", "#.%.#", "#####"], 2)
    }

    #[test]
    fn test_layout_parsing() {
        let map = sample();
        assert_eq!((map.width(), map.height()), (5, 3));
        assert!(map.is_wall(IVec2::new(0, 0)));
        assert!(map.is_destructible(IVec2::new(2, 1)));
        assert!(map.is_valid_position(IVec2::new(1, 1)));
        assert!(!map.is_valid_position(IVec2::new(2, 1)));
        assert!(!map.can_shoot_through(IVec2::new(2, 1)));
    }

    #[test]
    fn test_out_of_bounds_is_blocked_but_not_a_wall() {
        let map = sample();
        for cell in [IVec2::new(-1, 1), IVec2::new(5, 1), IVec2::new(1, 3)] {
            assert!(!map.is_valid_position(cell));
            assert!(!map.can_shoot_through(cell));
            assert!(!map.is_wall(cell));
            assert!(!map.is_destructible(cell));
        }
    }

    #[test]
    fn test_only_open_tiles_are_passable() {
        assert!(!Tile::Open.is_blocking());
        assert!(Tile::Wall.is_blocking());
        assert!(Tile::Destructible { hits: 1 }.is_blocking());
    }

    #[test]
    fn test_walls_ignore_damage() {
        let mut map = sample();
        assert!(!map.damage_wall(IVec2::new(0, 0)));
        assert!(map.is_wall(IVec2::new(0, 0)));
        assert!(!map.damage_wall(IVec2::new(1, 1)));
        assert_eq!(map.tile(IVec2::new(1, 1)), Some(Tile::Open));
    }

    proptest! {
        #[test]
        fn destructible_opens_after_exact_hit_count(hits in 1u8..8) {
            let mut map = Map::from_layout(&["%"], hits);
            let cell = IVec2::ZERO;
            for _ in 1..hits {
                prop_assert!(!map.damage_wall(cell));
                prop_assert!(map.is_destructible(cell));
            }
            prop_assert!(map.damage_wall(cell));
            prop_assert!(map.is_valid_position(cell));
        }
    }
}
