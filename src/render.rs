//! Render helpers
//!
//! Pure functions that turn game state into what a presentation layer needs:
//! per-tank glyphs, a composed character frame, HUD text and a serializable
//! snapshot. Nothing here writes to a terminal.

use std::fmt;

use glam::IVec2;
use serde::Serialize;

use crate::consts::CELL_SIZE;
use crate::sim::{Direction, GamePhase, GameState, Map, Owner, Tank, TankClass, Tile};

/// Body and barrel characters for a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TankGlyphs {
    pub body: char,
    pub gun: char,
}

/// Glyphs for a tank class facing a direction
pub fn glyphs(class: TankClass, facing: Direction) -> TankGlyphs {
    let vertical = facing.is_vertical();
    match class {
        TankClass::Player => TankGlyphs {
            body: '■',
            gun: if vertical { '║' } else { '═' },
        },
        TankClass::Enemy => TankGlyphs {
            body: '□',
            gun: if vertical { '│' } else { '─' },
        },
        TankClass::Boss => TankGlyphs {
            body: '█',
            gun: if vertical { '║' } else { '═' },
        },
    }
}

pub fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Open => ' ',
        Tile::Wall => '▓',
        Tile::Destructible { hits: 1 } => '░',
        Tile::Destructible { .. } => '▒',
    }
}

pub const BULLET_GLYPH: char = '*';

/// Character grid in position units (one char per unit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: i32,
    height: i32,
    cells: Vec<char>,
}

impl Frame {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![' '; (width * height) as usize],
        }
    }

    /// Frame sized to cover a map
    pub fn for_map(map: &Map) -> Self {
        Self::new(map.width() * CELL_SIZE, map.height() * CELL_SIZE)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Write a char; positions off the frame are clipped
    pub fn put(&mut self, pos: IVec2, ch: char) {
        if pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height {
            self.cells[(pos.y * self.width + pos.x) as usize] = ch;
        }
    }

    pub fn get(&self, pos: IVec2) -> Option<char> {
        (pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height)
            .then(|| self.cells[(pos.y * self.width + pos.x) as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

pub fn draw_map(frame: &mut Frame, map: &Map) {
    for (y, row) in map.rows().enumerate() {
        for (x, &tile) in row.iter().enumerate() {
            let ch = tile_glyph(tile);
            if ch == ' ' {
                continue;
            }
            let origin = IVec2::new(x as i32, y as i32) * CELL_SIZE;
            for dy in 0..CELL_SIZE {
                for dx in 0..CELL_SIZE {
                    frame.put(origin + IVec2::new(dx, dy), ch);
                }
            }
        }
    }
}

/// Body over the whole footprint, barrel(s) just past the facing side
pub fn draw_tank(frame: &mut Frame, tank: &Tank) {
    let glyphs = glyphs(tank.class(), tank.facing);
    let span = tank.span();
    for dy in 0..span {
        for dx in 0..span {
            frame.put(tank.pos + IVec2::new(dx, dy), glyphs.body);
        }
    }
    match tank.class() {
        TankClass::Boss => {
            for gun in tank.twin_muzzles() {
                frame.put(gun, glyphs.gun);
            }
        }
        _ => frame.put(tank.muzzle(), glyphs.gun),
    }
}

/// Compose the full playfield: map, tanks, then bullets on top
pub fn compose(state: &GameState) -> Frame {
    let mut frame = Frame::for_map(&state.map);
    draw_map(&mut frame, &state.map);
    draw_tank(&mut frame, &state.player);
    for tank in &state.tanks {
        draw_tank(&mut frame, tank);
    }
    for bullet in state.bullets.iter().filter(|b| b.is_active()) {
        frame.put(bullet.pos, BULLET_GLYPH);
    }
    frame
}

/// HUD line shown under the playfield
pub fn status_line(state: &GameState) -> String {
    if state.is_boss_level() {
        format!(
            "BOSS LEVEL  Score: {}  Enemies: {}",
            state.score,
            state.enemies_remaining()
        )
    } else {
        format!(
            "Level: {}  Score: {}  Enemies: {}",
            state.level,
            state.score,
            state.enemies_remaining()
        )
    }
}

/// Text for the between-levels screen
pub fn level_banner(state: &GameState) -> String {
    match state.phase {
        GamePhase::GameOver => format!("GAME OVER\nFinal score: {}", state.score),
        GamePhase::Victory => format!(
            "CONGRATULATIONS!\nYou defeated the boss!\nFinal score: {}",
            state.score
        ),
        GamePhase::Playing if state.is_boss_level() => format!(
            "BOSS LEVEL!\nBoss health: {}\nCurrent score: {}",
            state.boss().and_then(Tank::health).unwrap_or(0),
            state.score
        ),
        GamePhase::Playing => format!(
            "LEVEL {}\nEnemies to defeat: {}\nCurrent score: {}",
            state.level,
            state.enemies_remaining(),
            state.score
        ),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TankView {
    pub id: u32,
    pub class: TankClass,
    /// Unit position of the top-left corner
    pub pos: IVec2,
    /// Footprint edge in cells
    pub size: i32,
    pub facing: Direction,
    pub glyphs: TankGlyphs,
    pub health: Option<i32>,
}

impl TankView {
    pub fn of(tank: &Tank) -> Self {
        Self {
            id: tank.id,
            class: tank.class(),
            pos: tank.pos,
            size: tank.size(),
            facing: tank.facing,
            glyphs: glyphs(tank.class(), tank.facing),
            health: tank.health(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: IVec2,
    pub owner: Owner,
}

/// Everything a renderer reads, in one serializable value
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Seed that reproduces this run
    pub seed: u64,
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub tick: u64,
    /// Map rows as glyph strings, one char per cell
    pub map: Vec<String>,
    pub player: TankView,
    pub tanks: Vec<TankView>,
    pub bullets: Vec<BulletView>,
}

pub fn snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        seed: state.seed,
        level: state.level,
        score: state.score,
        phase: state.phase,
        tick: state.time_ticks,
        map: state
            .map
            .rows()
            .map(|row| row.iter().map(|&t| tile_glyph(t)).collect())
            .collect(),
        player: TankView::of(&state.player),
        tanks: state.tanks.iter().map(TankView::of).collect(),
        bullets: state
            .bullets
            .iter()
            .filter(|b| b.is_active())
            .map(|b| BulletView {
                pos: b.pos,
                owner: b.owner,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOSS_LEVEL;
    use crate::sim::Shot;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyphs(TankClass::Player, Direction::Up).gun, '║');
        assert_eq!(glyphs(TankClass::Enemy, Direction::Left).gun, '─');
        assert_eq!(glyphs(TankClass::Boss, Direction::Right).body, '█');
    }

    #[test]
    fn test_compose_draws_everything() {
        let mut state = GameState::new(1);
        state.spawn_bullet(
            Shot {
                pos: IVec2::new(12, 12),
                direction: Direction::Up,
            },
            Owner::Player,
        );
        let frame = compose(&state);
        assert_eq!((frame.width(), frame.height()), (40, 20));
        // Border wall
        assert_eq!(frame.get(IVec2::new(0, 0)), Some('▓'));
        // Player body at (4, 4)..(5, 5), barrel to the right
        assert_eq!(frame.get(IVec2::new(4, 4)), Some('■'));
        assert_eq!(frame.get(IVec2::new(6, 5)), Some('═'));
        // Enemy at cell (15, 1)
        assert_eq!(frame.get(IVec2::new(30, 2)), Some('□'));
        assert_eq!(frame.get(IVec2::new(12, 12)), Some(BULLET_GLYPH));
        assert_eq!(frame.rows().count(), 20);
    }

    #[test]
    fn test_boss_draws_twin_barrels() {
        let mut state = GameState::new(1);
        state.load_level(BOSS_LEVEL);
        let frame = compose(&state);
        let boss = state.boss().expect("boss");
        for gun in boss.twin_muzzles() {
            assert_eq!(frame.get(gun), Some('═'));
        }
    }

    #[test]
    fn test_status_line() {
        let mut state = GameState::new(1);
        assert_eq!(status_line(&state), "Level: 1  Score: 0  Enemies: 1");
        state.load_level(BOSS_LEVEL);
        assert_eq!(status_line(&state), "BOSS LEVEL  Score: 0  Enemies: 1");
        assert!(level_banner(&state).contains("Boss health: 5"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(77);
        let json = serde_json::to_string(&snapshot(&state)).expect("snapshot serializes");
        assert!(json.contains("\"seed\":77"));
        assert!(json.contains("\"level\":1"));
        assert!(json.contains("\"class\":\"Enemy\""));
    }
}
