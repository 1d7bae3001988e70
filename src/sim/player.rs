//! Player tank input handling
//!
//! The player never acts on its own; each tick applies at most one input.

use super::ai::Shot;
use super::direction::Direction;
use super::map::Map;
use super::tank::Tank;
use super::tick::TickInput;

/// Apply one tick of input to the player tank.
///
/// Move inputs always turn the tank and step only if the full destination
/// footprint is free. Fire returns the bullet to spawn ahead of the barrel.
pub fn apply_input(player: &mut Tank, map: &Map, input: TickInput) -> Option<Shot> {
    let direction = match input {
        TickInput::None => return None,
        TickInput::Fire => {
            return Some(Shot {
                pos: player.muzzle(),
                direction: player.facing,
            });
        }
        TickInput::MoveUp => Direction::Up,
        TickInput::MoveDown => Direction::Down,
        TickInput::MoveLeft => Direction::Left,
        TickInput::MoveRight => Direction::Right,
    };

    player.facing = direction;
    player.try_step(map, direction);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn room() -> Map {
        Map::from_layout(&["#####", "#...#", "#.#.#", "#####"], 1)
    }

    #[test]
    fn test_move_turns_even_when_blocked() {
        let map = room();
        let mut player = Tank::player(0, IVec2::new(1, 1));
        player.facing = Direction::Right;

        assert_eq!(apply_input(&mut player, &map, TickInput::MoveUp), None);
        assert_eq!(player.facing, Direction::Up);
        assert_eq!(player.cell(), IVec2::new(1, 1));

        apply_input(&mut player, &map, TickInput::MoveRight);
        assert_eq!(player.cell(), IVec2::new(2, 1));
        apply_input(&mut player, &map, TickInput::MoveDown);
        assert_eq!(player.facing, Direction::Down);
        assert_eq!(player.cell(), IVec2::new(2, 1));
    }

    #[test]
    fn test_fire_spawns_ahead_without_moving() {
        let map = room();
        let mut player = Tank::player(0, IVec2::new(1, 1));
        player.facing = Direction::Right;
        let before = player.pos;

        let shot = apply_input(&mut player, &map, TickInput::Fire).expect("fire produces a shot");
        assert_eq!(shot.direction, Direction::Right);
        assert_eq!(shot.pos, IVec2::new(4, 3));
        assert_eq!(player.pos, before);
    }

    #[test]
    fn test_no_input_is_a_no_op() {
        let map = room();
        let mut player = Tank::player(0, IVec2::new(3, 2));
        let before = (player.pos, player.facing);
        assert_eq!(apply_input(&mut player, &map, TickInput::None), None);
        assert_eq!((player.pos, player.facing), before);
    }
}
