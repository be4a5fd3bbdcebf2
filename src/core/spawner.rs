//! Probabilistic wall-pair spawning.
//!
//! Each tick has a small chance of producing a new pair at the right edge,
//! provided the newest wall has already scrolled far enough onto the field.

use super::config::{FieldSize, GameConfig};
use super::obstacle::{Obstacle, ObstacleId};
use rand::Rng;

/// Spawn policy plus the id allocator for the current session.
#[derive(Debug, Clone)]
pub struct Spawner {
    pub spawn_rate: f64,
    pub min_gap: u32,
    pub max_gap: u32,
    pub min_spacing: f64,
    pub height_margin: u32,
    pub wall_width: f64,
    next_id: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_rate: config.spawn_rate,
            min_gap: config.min_gap,
            max_gap: config.max_gap,
            min_spacing: config.min_wall_spacing,
            height_margin: config.wall_height_margin,
            wall_width: config.wall_width,
            next_id: 0,
        }
    }

    /// Restart id allocation for a new session.
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    /// Spacing rule: the field is empty, or the newest wall is far enough in.
    pub fn has_room(&self, field: FieldSize, existing: &[Obstacle]) -> bool {
        match existing.last() {
            None => true,
            Some(newest) => newest.x < field.width - self.min_spacing,
        }
    }

    /// Roll for a new pair this tick. Returns `[top, bottom]` when one spawns.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        field: FieldSize,
        existing: &[Obstacle],
    ) -> Option<[Obstacle; 2]> {
        let trigger: f64 = rng.gen();
        if trigger >= self.spawn_rate || !self.has_room(field, existing) {
            return None;
        }

        let gap = if self.min_gap < self.max_gap {
            rng.gen_range(self.min_gap..self.max_gap)
        } else {
            self.min_gap
        };

        // Top height is drawn from [0, height - gap - margin). A field too
        // short for the gap collapses the range to zero.
        let span = field.height - gap as f64 - self.height_margin as f64;
        let wall_height = if span > 0.0 {
            (rng.gen::<f64>() * span).floor() as u32
        } else {
            0
        };

        Some(self.spawn_pair(field, gap, wall_height))
    }

    /// Build a pair at the right edge around a gap of `gap` units starting
    /// `wall_height` units from the top.
    pub fn spawn_pair(&mut self, field: FieldSize, gap: u32, wall_height: u32) -> [Obstacle; 2] {
        let top_height = wall_height as f64;
        let gap_bottom = top_height + gap as f64;

        let top = Obstacle::new(self.allocate_id(), field.width, 0.0, top_height, self.wall_width);
        let bottom = Obstacle::new(
            self.allocate_id(),
            field.width,
            gap_bottom,
            field.height - gap_bottom,
            self.wall_width,
        );
        [top, bottom]
    }

    fn allocate_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        id
    }
}
