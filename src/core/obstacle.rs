//! Wall obstacles scrolling right to left across the field.

use super::geometry::Rect;

/// Logical handle for an obstacle. The presentation layer keys its visuals on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u64);

/// A single wall segment. Pairs are spawned together but otherwise independent.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Left edge (float for smooth scrolling).
    pub x: f64,
    pub top: f64,
    pub height: f64,
    pub width: f64,
    /// Whether the player has cleared this wall (for scoring).
    pub passed: bool,
}

/// What happened to one obstacle during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// The wall fell behind the player this tick.
    pub newly_passed: bool,
    /// The wall has left the field and should be dropped.
    pub off_field: bool,
}

impl Obstacle {
    pub fn new(id: ObstacleId, x: f64, top: f64, height: f64, width: f64) -> Self {
        Self {
            id,
            x,
            top,
            height: height.max(0.0),
            width,
            passed: false,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.x, self.top, self.width, self.height)
    }

    /// Fully scrolled past the left edge.
    pub fn is_off_field(&self) -> bool {
        self.x < -self.width
    }

    /// Scroll left by `speed`, then update the passed flag against the
    /// player's left edge.
    pub fn advance(&mut self, speed: f64, player_x: f64) -> Advance {
        self.x -= speed;

        let mut result = Advance::default();
        if !self.passed && self.right() < player_x {
            self.passed = true;
            result.newly_passed = true;
        }
        result.off_field = self.is_off_field();
        result
    }
}
