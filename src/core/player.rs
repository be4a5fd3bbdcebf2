//! The player-controlled square.

use super::config::FieldSize;
use super::geometry::Rect;

/// One of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset in field coordinates (y grows downward).
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Player {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    /// Player at the starting column, vertically centered.
    pub fn spawn(start_x: f64, size: f64, field: FieldSize) -> Self {
        let mut player = Self::new(start_x, field.height / 2.0 - size / 2.0, size);
        player.clamp_to(field);
        player
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.size, self.size)
    }

    /// Move one step and keep the square inside the field.
    pub fn step(&mut self, direction: Direction, step: f64, field: FieldSize) {
        let (dx, dy) = direction.delta();
        self.x += dx * step;
        self.y += dy * step;
        self.clamp_to(field);
    }

    pub fn clamp_to(&mut self, field: FieldSize) {
        let max_x = (field.width - self.size).max(0.0);
        let max_y = (field.height - self.size).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
        self.y = self.y.clamp(0.0, max_y);
    }
}
