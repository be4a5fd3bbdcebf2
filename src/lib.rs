//! Wallrun - terminal reflex game library.
//!
//! Steer a square through gaps in scrolling walls. One point per wall
//! cleared, first collision ends the round.

pub mod core;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::core::config::{ConfigError, FieldSize, GameConfig};
pub use crate::core::session::{Session, SessionPhase, TickEvent, TickResult};
