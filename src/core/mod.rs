//! Core game state and logic. Nothing in here knows about the terminal.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod ports;
pub mod session;
pub mod spawner;
pub mod tick_loop;

pub use config::{ConfigError, FieldSize, GameConfig};
pub use constants::*;
pub use geometry::{intersects, Rect};
pub use obstacle::{Obstacle, ObstacleId};
pub use player::{Direction, Player};
pub use ports::{LogicalSurface, NullObserver, SessionObserver, Surface};
pub use session::{Session, SessionPhase, TickEvent, TickResult};
pub use spawner::Spawner;
pub use tick_loop::TickLoop;
