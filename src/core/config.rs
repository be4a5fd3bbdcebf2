//! Tuning constants for a session, loadable from `~/.wallrun/config.json`.

use super::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width and height of the playing field in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: f64,
    pub height: f64,
}

impl FieldSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

/// Rejected configuration. Reported before a session starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("field size {width}x{height} must be positive")]
    NonPositiveField { width: f64, height: f64 },
    #[error("field size {width}x{height} cannot hold a player of size {player_size}")]
    FieldTooSmall {
        width: f64,
        height: f64,
        player_size: f64,
    },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("spawn rate {0} must be within [0, 1]")]
    SpawnRateOutOfRange(f64),
    #[error("min gap {min} is larger than max gap {max}")]
    GapRange { min: u32, max: u32 },
}

/// Game tuning. Speeds are per tick, distances in field units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldSize,
    pub player_size: f64,
    /// Distance moved per directional key press.
    pub player_step: f64,
    pub player_start_x: f64,
    pub wall_speed: f64,
    pub wall_width: f64,
    pub min_gap: u32,
    pub max_gap: u32,
    /// Chance per tick that a new pair is considered.
    pub spawn_rate: f64,
    pub min_wall_spacing: f64,
    pub wall_height_margin: u32,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldSize::default(),
            player_size: PLAYER_SIZE,
            player_step: PLAYER_STEP,
            player_start_x: PLAYER_START_X,
            wall_speed: WALL_SPEED,
            wall_width: WALL_WIDTH,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            spawn_rate: SPAWN_RATE,
            min_wall_spacing: MIN_WALL_SPACING,
            wall_height_margin: WALL_HEIGHT_MARGIN,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Default tuning on a field of the given size.
    pub fn with_field(width: f64, height: f64) -> Self {
        Self {
            field: FieldSize::new(width, height),
            ..Self::default()
        }
    }

    /// Check everything except the field, which is validated per session
    /// because the host may resize it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("player_size", self.player_size),
            ("player_step", self.player_step),
            ("wall_speed", self.wall_speed),
            ("wall_width", self.wall_width),
            ("tick_interval_ms", self.tick_interval_ms as f64),
        ];
        for (name, value) in positives {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        // wall_height_margin is unsigned and needs no check
        let non_negatives = [
            ("player_start_x", self.player_start_x),
            ("min_wall_spacing", self.min_wall_spacing),
        ];
        for (name, value) in non_negatives {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.spawn_rate) {
            return Err(ConfigError::SpawnRateOutOfRange(self.spawn_rate));
        }
        if self.min_gap > self.max_gap {
            return Err(ConfigError::GapRange {
                min: self.min_gap,
                max: self.max_gap,
            });
        }
        self.validate_field(self.field)
    }

    /// A field must be positive and large enough to hold the player.
    pub fn validate_field(&self, field: FieldSize) -> Result<(), ConfigError> {
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(ConfigError::NonPositiveField {
                width: field.width,
                height: field.height,
            });
        }
        if field.width < self.player_size || field.height < self.player_size {
            return Err(ConfigError::FieldTooSmall {
                width: field.width,
                height: field.height,
                player_size: self.player_size,
            });
        }
        Ok(())
    }
}
