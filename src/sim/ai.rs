//! Enemy and boss controllers
//!
//! Controllers run once per tick. Each keeps two independent timers (move and
//! shoot) that count up every tick and reset when their action fires. The map
//! and the player are passed in on every call; controllers hold no references.

use glam::IVec2;
use rand::Rng;

use super::direction::Direction;
use super::map::Map;
use super::tank::{BossBrain, EnemyBrain, Tank, TankKind};
use crate::manhattan;
use crate::tuning::Tuning;

/// A bullet a controller wants spawned this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub pos: IVec2,
    pub direction: Direction,
}

/// Advance one tank's controller by a tick.
///
/// Player tanks are input-driven and ignore this call.
pub fn update<R: Rng + ?Sized>(
    tank: &mut Tank,
    map: &Map,
    player: &Tank,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Shot> {
    match tank.kind {
        TankKind::Player => Vec::new(),
        TankKind::Enemy(mut brain) => {
            let shots = update_enemy(tank, &mut brain, map, player, tuning, rng);
            tank.kind = TankKind::Enemy(brain);
            shots
        }
        TankKind::Boss(mut brain) => {
            let shots = update_boss(tank, &mut brain, map, player, tuning);
            tank.kind = TankKind::Boss(brain);
            shots
        }
    }
}

/// Whether the shoot timer has elapsed with the player in sight.
///
/// Pure check: it does not reorient the tank or roll for enemy fire chance.
pub fn can_fire(tank: &Tank, map: &Map, player: &Tank, tuning: &Tuning) -> bool {
    match &tank.kind {
        TankKind::Player => false,
        TankKind::Enemy(brain) => {
            brain.shoot_timer >= tuning.enemy_shoot_delay
                && sight_line(map, tank.cell(), player.cell()).is_some()
        }
        TankKind::Boss(brain) => {
            brain.shoot_timer >= tuning.boss_shoot_delay
                && boss_sees(tank, map, player, tuning.boss_detection_range)
        }
    }
}

/// Axis-aligned raycast between two cells.
///
/// Returns the facing from `from` toward `to` when they share exactly one axis
/// and every cell strictly between them is shoot-through.
pub fn sight_line(map: &Map, from: IVec2, to: IVec2) -> Option<Direction> {
    let delta = to - from;
    let direction = match (delta.x == 0, delta.y == 0) {
        (true, false) => Direction::toward(delta, false),
        (false, true) => Direction::toward(delta, true),
        _ => return None,
    };
    let step = direction.delta();
    let mut cell = from + step;
    while cell != to {
        if !map.can_shoot_through(cell) {
            return None;
        }
        cell += step;
    }
    Some(direction)
}

/// Sight check that turns the enemy to face the player on success
fn enemy_sees(tank: &mut Tank, map: &Map, player: &Tank) -> bool {
    match sight_line(map, tank.cell(), player.cell()) {
        Some(direction) => {
            tank.facing = direction;
            true
        }
        None => false,
    }
}

fn boss_sees(tank: &Tank, map: &Map, player: &Tank, range: i32) -> bool {
    let (from, to) = (tank.cell(), player.cell());
    manhattan(from, to) <= range && sight_line(map, from, to).is_some()
}

fn update_enemy<R: Rng + ?Sized>(
    tank: &mut Tank,
    brain: &mut EnemyBrain,
    map: &Map,
    player: &Tank,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Shot> {
    brain.move_timer += 1;
    brain.shoot_timer += 1;

    let distance = manhattan(tank.cell(), player.cell());
    let mut shots = Vec::new();

    if brain.shoot_timer >= tuning.enemy_shoot_delay
        && enemy_sees(tank, map, player)
        && rng.random_range(0..100) < tuning.enemy_shoot_chance
    {
        brain.shoot_timer = 0;
        shots.push(Shot {
            pos: tank.center(),
            direction: tank.facing,
        });
        log::debug!("Enemy {} fires {:?}", tank.id, tank.facing);
    }

    if brain.move_timer >= tuning.enemy_move_delay {
        brain.move_timer = 0;

        if distance < tuning.enemy_chase_distance && enemy_sees(tank, map, player) {
            chase(tank, map, player.pos);
        } else if rng.random_range(0..100) < tuning.enemy_wander_chance {
            wander(tank, map, rng);
        }
    }

    shots
}

/// One step toward the player position seen this tick, vertical on ties
fn chase(tank: &mut Tank, map: &Map, goal: IVec2) {
    let delta = goal - tank.pos;
    if delta == IVec2::ZERO {
        return;
    }
    tank.facing = Direction::toward(delta, false);
    tank.try_step(map, tank.facing);
}

/// Random step; if blocked, turn by 1-3 slots and try once more
fn wander<R: Rng + ?Sized>(tank: &mut Tank, map: &Map, rng: &mut R) {
    tank.facing = Direction::from_index(rng.random_range(0..4));
    if !tank.try_step(map, tank.facing) {
        tank.facing = tank.facing.offset(rng.random_range(1..=3));
        tank.try_step(map, tank.facing);
    }
}

fn update_boss(
    tank: &mut Tank,
    brain: &mut BossBrain,
    map: &Map,
    player: &Tank,
    tuning: &Tuning,
) -> Vec<Shot> {
    brain.move_timer += 1;
    brain.shoot_timer += 1;

    // Boss tracks the player continuously, horizontal on ties
    let delta = player.pos - tank.pos;
    if delta != IVec2::ZERO {
        tank.facing = Direction::toward(delta, true);
    }

    let mut shots = Vec::new();
    if brain.shoot_timer >= tuning.boss_shoot_delay
        && boss_sees(tank, map, player, tuning.boss_detection_range)
    {
        brain.shoot_timer = 0;
        shots.extend(tank.twin_muzzles().map(|pos| Shot {
            pos,
            direction: tank.facing,
        }));
        log::debug!("Boss fires double cannon {:?}", tank.facing);
    }

    if brain.move_timer >= tuning.boss_move_delay {
        brain.move_timer = 0;
        tank.try_step(map, tank.facing);
    }

    shots
}

/// Apply one confirmed hit to a boss. Returns true once it is destroyed.
pub fn damage_boss(tank: &mut Tank) -> bool {
    match &mut tank.kind {
        TankKind::Boss(brain) => {
            brain.health -= 1;
            brain.health <= 0
        }
        _ => false,
    }
}
