//! Axis-aligned rectangles and the overlap test used for collisions.

/// A rectangle in field coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// True iff the rectangles overlap on both axes.
///
/// Strict comparisons: rectangles that only share an edge do not collide,
/// and a rectangle with `right < left` (or `bottom < top`) never overlaps
/// anything on that axis.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.right > b.left && a.left < b.right && a.bottom > b.top && a.top < b.bottom
}
