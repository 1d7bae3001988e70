//! Game state and level loading
//!
//! Everything the tick loop mutates lives here: the current map, the player,
//! the enemy roster, live bullets, score and level progress.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::Shot;
use super::bullet::{Bullet, Owner};
use super::levels::{self, Roster};
use super::map::Map;
use super::tank::Tank;
use crate::consts::{BOSS_LEVEL, MAX_LEVEL, PLAYER_START};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; terminal until restart
    GameOver,
    /// Every level cleared; terminal until restart
    Victory,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of every random AI decision
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level, 1-based
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub map: Map,
    pub player: Tank,
    /// Enemies and boss (sorted by id for determinism)
    pub tanks: Vec<Tank>,
    /// Live bullets (sorted by id for determinism)
    pub bullets: Vec<Bullet>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let map = levels::build_map(1, tuning.destructible_hits);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            level: 1,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            map,
            player: Tank::player(0, IVec2::from(PLAYER_START)),
            tanks: Vec::new(),
            bullets: Vec::new(),
            next_id: 1,
        };
        state.load_level(1);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the map, respawn the player and the level's enemies, clear bullets
    pub fn load_level(&mut self, level: u32) {
        self.level = levels::clamp_level(level);
        self.map = levels::build_map(self.level, self.tuning.destructible_hits);
        self.bullets.clear();
        self.tanks.clear();

        let player_id = self.next_entity_id();
        self.player = Tank::player(player_id, IVec2::from(PLAYER_START));

        match levels::roster(self.level) {
            Roster::Enemies(cells) => {
                for cell in cells {
                    let id = self.next_entity_id();
                    self.tanks.push(Tank::enemy(id, cell));
                }
            }
            Roster::Boss(cell) => {
                let id = self.next_entity_id();
                self.tanks.push(Tank::boss(id, cell, self.tuning.boss_health));
            }
        }

        debug_assert!(
            self.player.can_occupy(&self.map, self.player.pos)
                && self.tanks.iter().all(|t| t.can_occupy(&self.map, t.pos)),
            "level {} spawns a tank on blocked ground",
            self.level
        );

        self.phase = GamePhase::Playing;
        log::info!(
            "Level {} start: {} {}",
            self.level,
            self.tanks.len(),
            if self.is_boss_level() { "boss" } else { "enemies" }
        );
    }

    /// Start a new campaign from level 1, keeping the RNG stream
    pub fn restart(&mut self) {
        self.score = 0;
        self.time_ticks = 0;
        self.load_level(1);
        log::info!("Game restarted");
    }

    pub fn is_boss_level(&self) -> bool {
        self.level == BOSS_LEVEL
    }

    pub fn is_last_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    pub fn enemies_remaining(&self) -> usize {
        self.tanks.len()
    }

    /// The boss, if one is alive
    pub fn boss(&self) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.is_boss())
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Turn a requested shot into a live bullet
    pub fn spawn_bullet(&mut self, shot: Shot, owner: Owner) {
        let id = self.next_entity_id();
        self.bullets
            .push(Bullet::new(id, shot.pos, shot.direction, owner));
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.tanks.sort_by_key(|t| t.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::direction::Direction;

    #[test]
    fn test_new_game_starts_on_level_one() {
        let state = GameState::new(1);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies_remaining(), 1);
        assert_eq!(state.player.cell(), IVec2::from(PLAYER_START));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_boss_level_fields_single_boss() {
        let mut state = GameState::new(1);
        state.load_level(BOSS_LEVEL);
        assert_eq!(state.enemies_remaining(), 1);
        let boss = state.boss().expect("boss spawned");
        assert_eq!(boss.health(), Some(5));
        assert_eq!(boss.cell(), IVec2::new(15, 5));
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = GameState::new(9);
        state.load_level(4);
        state.score = 120;
        state.phase = GamePhase::GameOver;
        state.spawn_bullet(
            Shot {
                pos: IVec2::new(5, 5),
                direction: Direction::Up,
            },
            Owner::Enemy,
        );

        state.restart();
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies_remaining(), 1);
    }

    #[test]
    fn test_every_level_spawns_on_open_ground() {
        let mut state = GameState::new(2);
        for level in 1..=MAX_LEVEL {
            state.load_level(level);
            assert!(state.player.can_occupy(&state.map, state.player.pos), "level {level}");
            for tank in &state.tanks {
                assert!(tank.can_occupy(&state.map, tank.pos), "level {level} tank {}", tank.id);
            }
        }
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(3);
        state.load_level(4);
        let mut ids: Vec<u32> = state.tanks.iter().map(|t| t.id).collect();
        ids.push(state.player.id);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
