//! Game balance tuning
//!
//! Every timer, chance and score constant the simulation reads lives here so a
//! JSON file can rebalance the game without touching code. Missing fields fall
//! back to the defaults, which reproduce the classic game.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be at least 1")]
    Zero { field: &'static str },
    #[error("`{field}` is a percentage and must be at most 100, got {value}")]
    ChanceOutOfRange { field: &'static str, value: u32 },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Enemy tanks ===
    /// Ticks between enemy move decisions
    pub enemy_move_delay: u32,
    /// Ticks before an enemy may fire again
    pub enemy_shoot_delay: u32,
    /// Percent chance an enemy fires once allowed and in sight
    pub enemy_shoot_chance: u32,
    /// Enemies closer than this (Manhattan cells) chase a visible player
    pub enemy_chase_distance: i32,
    /// Percent chance an idle enemy wanders on its move tick
    pub enemy_wander_chance: u32,

    // === Boss ===
    pub boss_move_delay: u32,
    pub boss_shoot_delay: u32,
    /// Manhattan cell range of the boss's sight
    pub boss_detection_range: i32,
    pub boss_health: i32,

    // === Scoring ===
    pub points_per_kill: u64,
    /// Boss bonus is `points_per_kill * boss_bonus_multiplier`
    pub boss_bonus_multiplier: u64,

    // === Map ===
    /// Bullet hits a destructible tile absorbs before opening up
    pub destructible_hits: u8,

    // === Collision ===
    /// Test bullets against every footprint cell instead of the anchor cell only
    pub full_footprint_hits: bool,

    // === Driver ===
    /// Wall-clock delay between ticks for real-time drivers
    pub tick_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_move_delay: 10,
            enemy_shoot_delay: 70,
            enemy_shoot_chance: 50,
            enemy_chase_distance: 8,
            enemy_wander_chance: 70,

            boss_move_delay: 5,
            boss_shoot_delay: 25,
            boss_detection_range: 15,
            boss_health: 5,

            points_per_kill: 10,
            boss_bonus_multiplier: 5,

            destructible_hits: 2,

            full_footprint_hits: false,

            tick_interval_ms: crate::consts::TICK_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(TuningError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let nonzero = [
            ("enemy_move_delay", self.enemy_move_delay as i64),
            ("enemy_shoot_delay", self.enemy_shoot_delay as i64),
            ("boss_move_delay", self.boss_move_delay as i64),
            ("boss_shoot_delay", self.boss_shoot_delay as i64),
            ("boss_health", self.boss_health as i64),
            ("destructible_hits", self.destructible_hits as i64),
        ];
        for (field, value) in nonzero {
            if value < 1 {
                return Err(TuningError::Zero { field });
            }
        }

        let chances = [
            ("enemy_shoot_chance", self.enemy_shoot_chance),
            ("enemy_wander_chance", self.enemy_wander_chance),
        ];
        for (field, value) in chances {
            if value > 100 {
                return Err(TuningError::ChanceOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Pause between ticks for drivers running in real time
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Score awarded for destroying the boss
    pub fn boss_bonus(&self) -> u64 {
        self.points_per_kill * self.boss_bonus_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.boss_bonus(), 50);
        assert_eq!(tuning.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_tick_interval_is_tunable() {
        let tuning = Tuning::from_json(r#"{ "tick_interval_ms": 120 }"#).expect("valid tuning");
        assert_eq!(tuning.tick_interval(), Duration::from_millis(120));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "boss_health": 3, "enemy_shoot_chance": 100 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.boss_health, 3);
        assert_eq!(tuning.enemy_shoot_chance, 100);
        assert_eq!(tuning.enemy_move_delay, 10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_move_delay": 0 }"#),
            Err(TuningError::Zero { field: "enemy_move_delay" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_wander_chance": 101 }"#),
            Err(TuningError::ChanceOutOfRange { value: 101, .. })
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
