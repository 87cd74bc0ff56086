use std::time::Duration;

use bevy::prelude::Color;

use crate::game::FoodPlacement;
use crate::snake::Position;

pub const WINDOW_TITLE: &str = "Dual Snake Battle";
pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;
pub const CELL_SIZE: i32 = 20;
/// Width of the reserved border band on the top and left edges.
pub const BORDER_MARGIN: i32 = 20;

pub const TICKS_PER_SECOND: f64 = 15.0;
pub const GAME_OVER_DELAY: Duration = Duration::from_secs(2);

pub const PLAYER_ONE_START: Position = Position::new(WINDOW_WIDTH / 4, WINDOW_HEIGHT / 2);
pub const PLAYER_TWO_START: Position = Position::new(3 * WINDOW_WIDTH / 4, WINDOW_HEIGHT / 2);

pub const FOOD_PLACEMENT: FoodPlacement = FoodPlacement::Anywhere;

pub const GRADIENT_STEPS: u8 = 20;
pub const HEAD_CORNER_RADIUS: f32 = 8.0;
pub const BODY_CORNER_RADIUS: f32 = 4.0;
pub const FOOD_RADIUS: f32 = 8.0;
pub const BORDER_WIDTH: f32 = 2.0;
pub const FONT_SIZE: f32 = 28.0;
/// Score labels sit this far from the top, and from the left/right window edges.
pub const SCORE_LABEL_TOP: f32 = 10.0;
pub const SCORE_LABEL_LEFT: f32 = 30.0;
pub const SCORE_LABEL_RIGHT: i32 = 150;

pub const BACKGROUND_COLOR: Color = Color::srgb(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0);
pub const BORDER_COLOR: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
pub const FOOD_COLOR: Color = Color::srgb(1.0, 50.0 / 255.0, 50.0 / 255.0);
pub const FOOD_OUTLINE_COLOR: Color = Color::srgb(1.0, 150.0 / 255.0, 150.0 / 255.0);
pub const PLAYER_ONE_COLOR: Color = Color::srgb(0.0, 200.0 / 255.0, 1.0);
pub const PLAYER_TWO_COLOR: Color = Color::srgb(1.0, 215.0 / 255.0, 0.0);
pub const MESSAGE_COLOR: Color = Color::WHITE;
