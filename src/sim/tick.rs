//! Fixed-order simulation tick
//!
//! One call advances the whole game by one step:
//! player input, bullets against the map, bullets against tanks, dead bullet
//! cleanup, tank controllers, then the level/campaign check.

use serde::{Deserialize, Serialize};

use super::ai::{self, Shot};
use super::bullet::{Bullet, Owner};
use super::player;
use super::state::{GamePhase, GameState};
use super::tank::Tank;

/// Input for a single tick (at most one action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickInput {
    #[default]
    None,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
}

/// Outcome of a tick, as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickResult {
    pub score: u64,
    /// Level in play after this tick
    pub level: u32,
    pub game_over: bool,
    /// The roster was cleared this tick (also set on the final level)
    pub level_complete: bool,
    pub campaign_complete: bool,
}

impl TickResult {
    fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            game_over: state.phase == GamePhase::GameOver,
            level_complete: false,
            campaign_complete: state.phase == GamePhase::Victory,
        }
    }
}

/// Advance the game state by one tick.
///
/// Once the game is over or won, ticks are no-ops until `GameState::restart`.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    if state.is_over() {
        return TickResult::from_state(state);
    }

    state.time_ticks += 1;

    // 1. Player input
    if let Some(shot) = player::apply_input(&mut state.player, &state.map, *input) {
        state.spawn_bullet(shot, Owner::Player);
    }

    // 2. Bullets against the map
    for bullet in &mut state.bullets {
        bullet.advance(&mut state.map);
    }

    // 3. Bullets against tanks
    let full_footprint = state.tuning.full_footprint_hits;
    for i in 0..state.bullets.len() {
        let bullet = &state.bullets[i];
        if !bullet.is_active() {
            continue;
        }

        match bullet.owner {
            Owner::Enemy => {
                if bullet_hits(bullet, &state.player, full_footprint) {
                    state.phase = GamePhase::GameOver;
                    state.bullets.retain(Bullet::is_active);
                    log::info!(
                        "Player destroyed on level {} (score {})",
                        state.level,
                        state.score
                    );
                    return TickResult::from_state(state);
                }
            }
            Owner::Player => {
                // First match wins; a bullet credits at most one tank
                if let Some(target) = state
                    .tanks
                    .iter()
                    .position(|t| bullet_hits(bullet, t, full_footprint))
                {
                    state.bullets[i].deactivate();
                    resolve_hit(state, target);
                }
            }
        }
    }

    // 4. Drop spent bullets
    state.bullets.retain(Bullet::is_active);

    // 5. Tank controllers
    let mut shots: Vec<Shot> = Vec::new();
    for tank in &mut state.tanks {
        shots.extend(ai::update(
            tank,
            &state.map,
            &state.player,
            &state.tuning,
            &mut state.rng,
        ));
    }
    for shot in shots {
        state.spawn_bullet(shot, Owner::Enemy);
    }

    // 6. Level progression
    let mut level_complete = false;
    if state.tanks.is_empty() {
        level_complete = true;
        if state.is_last_level() {
            state.phase = GamePhase::Victory;
            log::info!("Campaign complete! Final score {}", state.score);
        } else {
            log::info!("Level {} complete (score {})", state.level, state.score);
            let next = state.level + 1;
            state.load_level(next);
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();

    TickResult {
        level_complete,
        ..TickResult::from_state(state)
    }
}

fn bullet_hits(bullet: &Bullet, tank: &Tank, full_footprint: bool) -> bool {
    if full_footprint {
        tank.occupies(bullet.cell())
    } else {
        bullet.collides_with(tank.pos)
    }
}

/// Credit a player hit on `state.tanks[index]`
fn resolve_hit(state: &mut GameState, index: usize) {
    let tank = &mut state.tanks[index];
    if tank.is_boss() {
        if ai::damage_boss(tank) {
            state.tanks.remove(index);
            let bonus = state.tuning.boss_bonus();
            state.score += bonus;
            log::info!("Boss destroyed! +{}", bonus);
        } else {
            log::debug!("Boss hit, health {:?}", tank.health());
        }
    } else {
        state.tanks.remove(index);
        state.score += state.tuning.points_per_kill;
        log::debug!(
            "Enemy destroyed, {} remaining",
            state.enemies_remaining()
        );
    }
}
