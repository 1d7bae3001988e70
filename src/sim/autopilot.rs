//! Demo mode - a simple bot drives the player tank
//!
//! Deterministic: the same state always yields the same input.

use glam::IVec2;

use super::direction::Direction;
use super::map::Map;
use super::state::GameState;
use super::tick::TickInput;
use crate::manhattan;

fn move_input(direction: Direction) -> TickInput {
    match direction {
        Direction::Up => TickInput::MoveUp,
        Direction::Down => TickInput::MoveDown,
        Direction::Left => TickInput::MoveLeft,
        Direction::Right => TickInput::MoveRight,
    }
}

/// Like a sight line, but destructible tiles count as clear since bullets wear
/// them down. Walls still block.
fn breakable_line(map: &Map, from: IVec2, to: IVec2) -> Option<Direction> {
    let delta = to - from;
    if (delta.x == 0) == (delta.y == 0) {
        return None;
    }
    let direction = Direction::toward(delta, delta.y == 0);
    let step = direction.delta();
    let mut cell = from + step;
    while cell != to {
        if !(map.can_shoot_through(cell) || map.is_destructible(cell)) {
            return None;
        }
        cell += step;
    }
    Some(direction)
}

/// Pick this tick's input for the player.
///
/// Fires at any enemy in a clear line (turning first if needed), otherwise
/// walks toward the nearest enemy, sidestepping obstacles.
pub fn choose_input(state: &GameState) -> TickInput {
    if state.is_over() {
        return TickInput::None;
    }
    let player = &state.player;
    let here = player.cell();

    let open = |dir: Direction| {
        let next = player.pos + dir.delta() * crate::consts::CELL_SIZE;
        player.can_occupy(&state.map, next)
    };

    // Shoot anything lined up, blasting through destructible cover
    let lined_up = state.tanks.iter().find_map(|t| {
        let cell = t.cell();
        breakable_line(&state.map, here, cell).map(|dir| (dir, manhattan(cell, here)))
    });
    if let Some((direction, distance)) = lined_up {
        if player.facing == direction {
            return TickInput::Fire;
        }
        // Turning toward an adjacent tank would drive onto it; back off a cell first
        let back = direction.opposite();
        if distance == 1 && open(back) {
            return move_input(back);
        }
        return move_input(direction);
    }

    let Some(target) = state
        .tanks
        .iter()
        .map(|t| t.cell())
        .min_by_key(|&cell| manhattan(cell, here))
    else {
        return TickInput::None;
    };

    let delta = target - here;
    let primary = Direction::toward(delta, delta.x.abs() >= delta.y.abs());
    let secondary = if primary.is_vertical() {
        Direction::toward(IVec2::new(delta.x, 0), true)
    } else {
        Direction::toward(IVec2::new(0, delta.y), false)
    };

    if open(primary) {
        return move_input(primary);
    }
    if delta.x != 0 && delta.y != 0 && open(secondary) {
        return move_input(secondary);
    }

    // Boxed in toward the target: rotate through the rest by tick count
    let start = (state.time_ticks % 4) as usize;
    (0..4)
        .map(|i| Direction::from_index(start + i))
        .find(|&dir| open(dir))
        .map(move_input)
        .unwrap_or(TickInput::None)
}
