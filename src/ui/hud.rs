//! Score display, Start control and the game-over notice.

use crate::core::ports::SessionObserver;
use crate::core::session::{TickEvent, TickResult};

/// UI-side state fed by the session through [`SessionObserver`].
#[derive(Debug, Clone)]
pub struct Hud {
    pub score_text: String,
    pub start_visible: bool,
    /// Final score of a round the player has not dismissed yet.
    pub game_over: Option<u32>,
    /// Ticks survived in the current (or last) round.
    pub ticks_survived: u64,
    pub walls_spawned: u32,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score_text: format_score(0),
            start_visible: true,
            game_over: None,
            ticks_survived: 0,
            walls_spawned: 0,
        }
    }

    /// Whether the game-over notice still blocks a new round.
    pub fn awaiting_ack(&self) -> bool {
        self.game_over.is_some()
    }

    /// Dismiss the game-over notice.
    pub fn acknowledge(&mut self) {
        self.game_over = None;
    }

    /// Fold tick output into the round statistics.
    pub fn record(&mut self, result: &TickResult) {
        self.ticks_survived += result.ticks as u64;
        self.walls_spawned += result
            .events
            .iter()
            .filter(|e| matches!(e, TickEvent::Spawned { .. }))
            .count() as u32;
    }

    pub fn seconds_survived(&self, tick_interval_ms: u64) -> f64 {
        self.ticks_survived as f64 * tick_interval_ms as f64 / 1000.0
    }
}

impl SessionObserver for Hud {
    fn score_changed(&mut self, score: u32) {
        self.score_text = format_score(score);
        if score == 0 {
            self.ticks_survived = 0;
            self.walls_spawned = 0;
        }
    }

    fn start_available(&mut self, available: bool) {
        self.start_visible = available;
    }

    fn round_over(&mut self, final_score: u32) {
        self.game_over = Some(final_score);
    }
}

pub fn format_score(score: u32) -> String {
    format!("Score: {}", score)
}
