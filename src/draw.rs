//! Frame description produced by the match for the rendering backend.
//!
//! Coordinates are in window space: origin top-left, y down, in pixels.

use bevy::prelude::*;

use crate::constants::{
    BODY_CORNER_RADIUS, HEAD_CORNER_RADIUS, MESSAGE_COLOR, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR,
    SCORE_LABEL_LEFT, SCORE_LABEL_RIGHT, SCORE_LABEL_TOP,
};
use crate::game::{Match, Outcome, Phase, Player};
use crate::snake::Position;

pub const START_PROMPT: &str = "Press any direction key to start!";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// One snake segment, drawn inside its cell with a one pixel gap.
    Cell {
        pos: Position,
        color: Color,
        corner_radius: f32,
    },
    /// The food item, a filled circle with a lighter outline.
    Food { pos: Position },
    /// Outline around the playable area.
    Border,
    /// Text anchored at its top-left corner.
    Label {
        text: String,
        color: Color,
        at: Vec2,
    },
    /// Text centered in the window.
    Banner { text: String, color: Color },
}

pub fn score_color(player: Player) -> Color {
    match player {
        Player::One => PLAYER_ONE_COLOR,
        Player::Two => PLAYER_TWO_COLOR,
    }
}

pub fn outcome_message(outcome: Outcome) -> (String, Color) {
    match outcome {
        Outcome::Winner(player) => (format!("{} Wins!", player.label()), score_color(player)),
        Outcome::Tie => ("It's a Tie!".to_string(), MESSAGE_COLOR),
    }
}

impl Match {
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        match self.phase() {
            Phase::NotStarted => vec![DrawCommand::Banner {
                text: START_PROMPT.to_string(),
                color: MESSAGE_COLOR,
            }],
            Phase::GameOver(outcome) => {
                let (text, color) = outcome_message(outcome);
                vec![DrawCommand::Banner { text, color }]
            }
            Phase::Running => self.board(),
        }
    }

    fn board(&self) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Border, DrawCommand::Food { pos: self.food() }];

        for snake in self.snakes() {
            commands.extend(snake.segments().enumerate().map(|(i, pos)| DrawCommand::Cell {
                pos,
                color: snake.segment_color(i),
                corner_radius: if i == 0 {
                    HEAD_CORNER_RADIUS
                } else {
                    BODY_CORNER_RADIUS
                },
            }));
        }

        let arena = self.arena();
        let anchors = [
            Vec2::new(SCORE_LABEL_LEFT, SCORE_LABEL_TOP),
            Vec2::new((arena.width - SCORE_LABEL_RIGHT) as f32, SCORE_LABEL_TOP),
        ];
        for (player, at) in Player::ALL.into_iter().zip(anchors) {
            commands.push(DrawCommand::Label {
                text: format!("{}: {}", player.label(), self.snake(player).score),
                color: score_color(player),
                at,
            });
        }

        commands
    }
}
