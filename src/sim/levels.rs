//! Fixed level layouts and spawn tables
//!
//! Levels are 1-based. Levels 1-4 field as many basic enemies as the level
//! number; level 5 is the boss arena with a single boss spawn.

use glam::IVec2;

use super::map::Map;
use crate::consts::{BOSS_LEVEL, MAX_LEVEL};

const LEVEL_1: [&str; 10] = [
    "####################",
    "#..................#",
    "#..................#",
    "#...%%....##...%...#",
    "#...%%....##...%...#",
    "#..................#",
    "#.....###....%%....#",
    "#..................#",
    "#..................#",
    "####################",
];

const LEVEL_2: [&str; 10] = [
    "####################",
    "#..................#",
    "#..................#",
    "#..##....%%....##..#",
    "#..##..........##..#",
    "#.......%%%%.......#",
    "#..................#",
    "#..%%..........%%..#",
    "#..................#",
    "####################",
];

const LEVEL_3: [&str; 10] = [
    "####################",
    "#..................#",
    "#..#....%%%%....#..#",
    "#..#............#..#",
    "#......##..##......#",
    "#..%%..........%%..#",
    "#..#............#..#",
    "#..#....%%%%....#..#",
    "#..................#",
    "####################",
];

const LEVEL_4: [&str; 10] = [
    "####################",
    "#..................#",
    "#...%###....###.%%.#",
    "#..................#",
    "#..#..%%....%%..#..#",
    "#..#............#..#",
    "#..................#",
    "#.%%.###....###.%%.#",
    "#..................#",
    "####################",
];

const BOSS_ARENA: [&str; 10] = [
    "####################",
    "#..................#",
    "#..................#",
    "#...%%......%%.....#",
    "#..................#",
    "#..................#",
    "#...%%.............#",
    "#..................#",
    "#..................#",
    "####################",
];

/// Enemy spawn cells in spawn order
const SPAWNS_1: &[(i32, i32)] = &[(15, 1), (1, 1), (8, 1)];
const SPAWNS_2: &[(i32, i32)] = &[(17, 8), (17, 1), (15, 4), (12, 8)];
const SPAWNS_3: &[(i32, i32)] = &[(17, 8), (17, 1), (1, 8), (8, 8), (15, 4)];
const SPAWNS_4: &[(i32, i32)] = &[(18, 1), (18, 8), (15, 5), (12, 8)];
const BOSS_SPAWN: (i32, i32) = (15, 5);

/// What a level fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roster {
    Enemies(Vec<IVec2>),
    Boss(IVec2),
}

/// Level number clamped into `[1, MAX_LEVEL]`
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(1, MAX_LEVEL)
}

fn layout(level: u32) -> &'static [&'static str] {
    match clamp_level(level) {
        1 => &LEVEL_1,
        2 => &LEVEL_2,
        3 => &LEVEL_3,
        4 => &LEVEL_4,
        _ => &BOSS_ARENA,
    }
}

/// Fresh map for a level
pub fn build_map(level: u32, destructible_hits: u8) -> Map {
    Map::from_layout(layout(level), destructible_hits)
}

/// Spawn cells for a level
pub fn roster(level: u32) -> Roster {
    let level = clamp_level(level);
    if level == BOSS_LEVEL {
        return Roster::Boss(IVec2::from(BOSS_SPAWN));
    }
    let table = match level {
        1 => SPAWNS_1,
        2 => SPAWNS_2,
        3 => SPAWNS_3,
        _ => SPAWNS_4,
    };
    Roster::Enemies(
        table
            .iter()
            .take(level as usize)
            .map(|&p| IVec2::from(p))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOSS_SIZE, PLAYER_START};

    #[test]
    fn test_enemy_count_matches_level() {
        for level in 1..BOSS_LEVEL {
            match roster(level) {
                Roster::Enemies(cells) => assert_eq!(cells.len(), level as usize),
                Roster::Boss(_) => panic!("level {level} should not be a boss level"),
            }
        }
        assert!(matches!(roster(BOSS_LEVEL), Roster::Boss(_)));
    }

    #[test]
    fn test_every_spawn_is_on_open_ground() {
        for level in 1..=MAX_LEVEL {
            let map = build_map(level, 2);
            assert_eq!((map.width(), map.height()), (20, 10));
            assert!(map.is_valid_position(IVec2::from(PLAYER_START)));
            match roster(level) {
                Roster::Enemies(cells) => {
                    for cell in cells {
                        assert!(map.is_valid_position(cell), "level {level} spawn {cell}");
                    }
                }
                Roster::Boss(anchor) => {
                    for dy in 0..BOSS_SIZE {
                        for dx in 0..BOSS_SIZE {
                            assert!(map.is_valid_position(anchor + IVec2::new(dx, dy)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_borders_are_walls() {
        for level in 1..=MAX_LEVEL {
            let map = build_map(level, 2);
            for x in 0..map.width() {
                assert!(map.is_wall(IVec2::new(x, 0)));
                assert!(map.is_wall(IVec2::new(x, map.height() - 1)));
            }
            for y in 0..map.height() {
                assert!(map.is_wall(IVec2::new(0, y)));
                assert!(map.is_wall(IVec2::new(map.width() - 1, y)));
            }
        }
    }
}
