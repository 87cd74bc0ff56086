use std::fmt;

use bevy::prelude::{KeyCode, Resource};

use crate::game::Player;
use crate::snake::Direction;

/// A fixed set of four direction keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    Arrows,
    Wasd,
}

impl ControlScheme {
    pub fn keys(self) -> [(KeyCode, Direction); 4] {
        match self {
            ControlScheme::Arrows => [
                (KeyCode::ArrowUp, Direction::Up),
                (KeyCode::ArrowDown, Direction::Down),
                (KeyCode::ArrowLeft, Direction::Left),
                (KeyCode::ArrowRight, Direction::Right),
            ],
            ControlScheme::Wasd => [
                (KeyCode::KeyW, Direction::Up),
                (KeyCode::KeyS, Direction::Down),
                (KeyCode::KeyA, Direction::Left),
                (KeyCode::KeyD, Direction::Right),
            ],
        }
    }

    pub fn direction_for(self, key: KeyCode) -> Option<Direction> {
        self.keys()
            .into_iter()
            .find_map(|(k, direction)| (k == key).then_some(direction))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateScheme(pub ControlScheme);

impl fmt::Display for DuplicateScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "both players are bound to the {:?} keys", self.0)
    }
}

impl std::error::Error for DuplicateScheme {}

/// One control scheme per player. The schemes never share a key, so every
/// key resolves to at most one player.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    schemes: [ControlScheme; 2],
}

impl KeyBindings {
    pub fn new(one: ControlScheme, two: ControlScheme) -> Result<Self, DuplicateScheme> {
        if one == two {
            return Err(DuplicateScheme(one));
        }
        Ok(Self { schemes: [one, two] })
    }

    pub fn resolve(&self, key: KeyCode) -> Option<(Player, Direction)> {
        Player::ALL
            .into_iter()
            .zip(self.schemes)
            .find_map(|(player, scheme)| scheme.direction_for(key).map(|d| (player, d)))
    }
}
