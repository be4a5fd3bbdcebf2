//! Seams between the session and its host.
//!
//! The session never touches terminal types. The host supplies a [`Surface`]
//! for field size and bounding boxes, and a [`SessionObserver`] that receives
//! score, Start-control and end-of-round notifications.

use super::config::FieldSize;
use super::geometry::Rect;
use super::obstacle::Obstacle;
use super::player::Player;

/// Presentation adapter: what the host actually draws.
///
/// Bounds default to the logical geometry. A host whose drawn shapes differ
/// from logical positions (snapping to cells, borders) overrides them so
/// collisions match what the player sees.
pub trait Surface {
    fn field_size(&self) -> FieldSize;

    fn player_bounds(&self, player: &Player) -> Rect {
        player.bounds()
    }

    fn obstacle_bounds(&self, obstacle: &Obstacle) -> Rect {
        obstacle.bounds()
    }
}

/// A surface with fixed logical dimensions and exact bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalSurface {
    pub field: FieldSize,
}

impl LogicalSurface {
    pub fn new(field: FieldSize) -> Self {
        Self { field }
    }
}

impl Surface for LogicalSurface {
    fn field_size(&self) -> FieldSize {
        self.field
    }
}

/// Notifications from the session to the host UI.
pub trait SessionObserver {
    /// Score display must show `score`. Sent on start (0) and on every point.
    fn score_changed(&mut self, score: u32);

    /// Show or hide the Start control.
    fn start_available(&mut self, available: bool);

    /// The round ended with `final_score`. The host must not start another
    /// session until the player acknowledges this.
    fn round_over(&mut self, final_score: u32);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn score_changed(&mut self, _score: u32) {}
    fn start_available(&mut self, _available: bool) {}
    fn round_over(&mut self, _final_score: u32) {}
}
