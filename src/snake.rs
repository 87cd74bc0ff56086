use std::collections::VecDeque;

use bevy::prelude::Color;

use crate::constants::{BORDER_MARGIN, CELL_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::controls::ControlScheme;

/// Screen-space cell coordinate, origin top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction, cell: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * cell,
            y: self.y + dy * cell,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit vector in screen space.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Playable rectangle of the window.
///
/// The band of `margin` pixels at the top and left is reserved for the border,
/// and twice that at the bottom and right, so the playable area is
/// `margin <= x < width - 2 * margin` (same for `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
    pub margin: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            cell: CELL_SIZE,
            margin: BORDER_MARGIN,
        }
    }
}

impl Arena {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.margin
            && pos.x < self.width - 2 * self.margin
            && pos.y >= self.margin
            && pos.y < self.height - 2 * self.margin
    }

    /// Every cell-aligned playable position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let cell = self.cell as usize;
        (self.margin..self.height - 2 * self.margin)
            .step_by(cell)
            .flat_map(move |y| {
                (self.margin..self.width - 2 * self.margin)
                    .step_by(cell)
                    .map(move |x| Position::new(x, y))
            })
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    segments: VecDeque<Position>,
    heading: Option<Direction>,
    pub controls: ControlScheme,
    pub gradient: Vec<Color>,
    pub score: u32,
}

impl Snake {
    pub fn new(start: Position, controls: ControlScheme, gradient: Vec<Color>) -> Self {
        Self {
            segments: VecDeque::from([start]),
            heading: None,
            controls,
            gradient,
            score: 0,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Whether turning to `direction` is allowed: anything but a reversal.
    pub fn accepts(&self, direction: Direction) -> bool {
        self.heading != Some(direction.opposite())
    }

    /// Sets the heading unless it would reverse the snake onto itself.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.accepts(direction) {
            return false;
        }
        self.heading = Some(direction);
        true
    }

    /// Shifts the body one cell along the heading. Purely geometric: no bounds
    /// or collision checks. Without a heading the head stays where it is.
    pub fn advance(&mut self, cell: i32) {
        let head = self.head();
        let new_head = match self.heading {
            Some(direction) => head.step(direction, cell),
            None => head,
        };
        self.segments.push_front(new_head);
        self.segments.pop_back();
    }

    /// Duplicates the tail so the next move keeps the extra segment.
    pub fn grow(&mut self) {
        if let Some(&tail) = self.segments.back() {
            self.segments.push_back(tail);
        }
        self.score += 1;
    }

    pub fn check_collision(&self, other: &Snake, arena: &Arena) -> bool {
        let head = self.head();
        !arena.contains(head)
            || self.segments.iter().skip(1).any(|p| *p == head)
            || other.occupies(head)
    }

    /// Color of the segment at `index`; the last gradient entry repeats.
    pub fn segment_color(&self, index: usize) -> Color {
        self.gradient
            .get(index.min(self.gradient.len().saturating_sub(1)))
            .copied()
            .unwrap_or(Color::WHITE)
    }
}
