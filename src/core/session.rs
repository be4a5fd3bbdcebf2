//! Game session state machine.
//!
//! A session sits Idle until started, then runs one tick per frame:
//! spawn → advance walls (scoring) → collision check. The first collision
//! ends the round: the tick clock stops, walls are cleared, the host is told
//! the final score and the session drops back to Idle.

use super::config::{ConfigError, GameConfig};
use super::geometry::intersects;
use super::obstacle::{Obstacle, ObstacleId};
use super::player::{Direction, Player};
use super::ports::{SessionObserver, Surface};
use super::spawner::Spawner;
use super::tick_loop::TickLoop;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for Start. No walls exist.
    Idle,
    /// Ticks and movement are live.
    Running,
}

/// A single event produced by a tick. The host maps these to visuals.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// A new wall pair entered at the right edge.
    Spawned { top: ObstacleId, bottom: ObstacleId },
    /// A wall fell behind the player, `score` is the new total.
    Passed { id: ObstacleId, score: u32 },
    /// A wall left the field.
    Removed { id: ObstacleId },
    /// The player hit `hit`. Always the last event of its tick.
    RoundOver { hit: ObstacleId, final_score: u32 },
}

/// Everything that happened during one or more ticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
    pub ticks: u32,
}

impl TickResult {
    /// Final score if the round ended.
    pub fn round_over(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            TickEvent::RoundOver { final_score, .. } => Some(*final_score),
            _ => None,
        })
    }

    pub fn points_scored(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::Passed { .. }))
            .count() as u32
    }

    fn merge(&mut self, other: TickResult) {
        self.events.extend(other.events);
        self.ticks += other.ticks;
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub phase: SessionPhase,
    /// Walls passed since the last start. Kept after a round ends for display.
    pub score: u32,
    pub player: Player,
    /// Live walls in spawn order.
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub clock: TickLoop,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::spawn(config.player_start_x, config.player_size, config.field);
        Ok(Self {
            phase: SessionPhase::Idle,
            score: 0,
            player,
            obstacles: Vec::new(),
            spawner: Spawner::new(&config),
            clock: TickLoop::from_millis(config.tick_interval_ms),
            config,
        })
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Start a round. Returns `Ok(false)` if one is already running.
    pub fn start<S, O>(&mut self, surface: &S, observer: &mut O) -> Result<bool, ConfigError>
    where
        S: Surface + ?Sized,
        O: SessionObserver + ?Sized,
    {
        if self.is_running() {
            log::debug!("start ignored: session already running");
            return Ok(false);
        }

        let field = surface.field_size();
        self.config.validate_field(field)?;

        self.obstacles.clear();
        self.spawner.reset();
        self.score = 0;
        self.player = Player::spawn(self.config.player_start_x, self.config.player_size, field);
        self.phase = SessionPhase::Running;

        observer.score_changed(0);
        observer.start_available(false);
        self.clock.start();

        log::info!(
            "round started on {}x{} field, player at ({}, {})",
            field.width,
            field.height,
            self.player.x,
            self.player.y
        );
        Ok(true)
    }

    /// Move the player one step. Ignored unless running.
    pub fn handle_input<S>(&mut self, direction: Direction, surface: &S) -> bool
    where
        S: Surface + ?Sized,
    {
        if !self.is_running() {
            return false;
        }
        self.player
            .step(direction, self.config.player_step, surface.field_size());
        true
    }

    /// Run every tick the clock says is due after `elapsed`, stopping early if
    /// the round ends.
    pub fn run_due<R, S, O>(
        &mut self,
        elapsed: Duration,
        rng: &mut R,
        surface: &S,
        observer: &mut O,
    ) -> TickResult
    where
        R: Rng,
        S: Surface + ?Sized,
        O: SessionObserver + ?Sized,
    {
        let due = self.clock.advance(elapsed);
        let mut result = TickResult::default();
        for _ in 0..due {
            if !self.is_running() {
                break;
            }
            result.merge(self.tick(rng, surface, observer));
        }
        result
    }

    /// One simulation step. No-op while idle.
    pub fn tick<R, S, O>(&mut self, rng: &mut R, surface: &S, observer: &mut O) -> TickResult
    where
        R: Rng,
        S: Surface + ?Sized,
        O: SessionObserver + ?Sized,
    {
        let mut result = TickResult::default();
        if !self.is_running() {
            return result;
        }
        result.ticks = 1;

        let field = surface.field_size();

        if let Some([top, bottom]) = self.spawner.maybe_spawn(rng, field, &self.obstacles) {
            log::debug!(
                "spawned pair {:?}/{:?}: gap {}..{}",
                top.id,
                bottom.id,
                top.bottom(),
                bottom.top
            );
            result.events.push(TickEvent::Spawned {
                top: top.id,
                bottom: bottom.id,
            });
            self.obstacles.push(top);
            self.obstacles.push(bottom);
        }

        self.advance_obstacles(&mut result, observer);

        if let Some(hit) = self.find_collision(surface) {
            self.end_round(hit, &mut result, observer);
        }

        result
    }

    fn advance_obstacles<O>(&mut self, result: &mut TickResult, observer: &mut O)
    where
        O: SessionObserver + ?Sized,
    {
        let speed = self.config.wall_speed;
        let player_x = self.player.x;
        let mut score = self.score;

        self.obstacles.retain_mut(|obstacle| {
            let advance = obstacle.advance(speed, player_x);
            if advance.newly_passed {
                score += 1;
                observer.score_changed(score);
                result.events.push(TickEvent::Passed {
                    id: obstacle.id,
                    score,
                });
            }
            if advance.off_field {
                log::trace!("removed {:?} at x={}", obstacle.id, obstacle.x);
                result.events.push(TickEvent::Removed { id: obstacle.id });
            }
            !advance.off_field
        });

        self.score = score;
    }

    /// First wall whose drawn bounds overlap the player's.
    fn find_collision<S>(&self, surface: &S) -> Option<ObstacleId>
    where
        S: Surface + ?Sized,
    {
        let player_rect = surface.player_bounds(&self.player);
        self.obstacles
            .iter()
            .find(|o| intersects(&player_rect, &surface.obstacle_bounds(o)))
            .map(|o| o.id)
    }

    fn end_round<O>(&mut self, hit: ObstacleId, result: &mut TickResult, observer: &mut O)
    where
        O: SessionObserver + ?Sized,
    {
        self.clock.stop();
        self.obstacles.clear();
        self.phase = SessionPhase::Idle;

        log::info!("round over: hit {:?}, final score {}", hit, self.score);

        observer.start_available(true);
        observer.round_over(self.score);
        result.events.push(TickEvent::RoundOver {
            hit,
            final_score: self.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FieldSize;
    use crate::core::ports::{LogicalSurface, NullObserver};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn surface() -> LogicalSurface {
        LogicalSurface::new(FieldSize::new(800.0, 400.0))
    }

    fn quiet_config() -> GameConfig {
        // No random spawns so tests control every wall
        GameConfig {
            spawn_rate: 0.0,
            ..GameConfig::default()
        }
    }

    fn running_session() -> Session {
        let mut session = Session::new(quiet_config()).expect("valid config");
        session
            .start(&surface(), &mut NullObserver)
            .expect("valid field");
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(GameConfig::default()).expect("valid config");
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
        assert!(!session.clock.is_running());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig::with_field(-1.0, 400.0);
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_start_resets_state() {
        let mut session = running_session();
        assert!(session.is_running());
        assert!(session.clock.is_running());
        assert_eq!(session.score, 0);
        assert!((session.player.x - 50.0).abs() < f64::EPSILON);
        assert!((session.player.y - 190.0).abs() < f64::EPSILON);

        session.score = 3;
        session.phase = SessionPhase::Idle;
        session.obstacles.push(Obstacle::new(ObstacleId(9), 300.0, 0.0, 10.0, 25.0));
        assert!(session.start(&surface(), &mut NullObserver).unwrap());
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut session = running_session();
        session.score = 4;
        session.player.x = 300.0;
        assert_eq!(session.start(&surface(), &mut NullObserver), Ok(false));
        assert_eq!(session.score, 4);
        assert!((session.player.x - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_start_rejects_degenerate_field() {
        let mut session = Session::new(quiet_config()).expect("valid config");
        let tiny = LogicalSurface::new(FieldSize::new(0.0, 0.0));
        assert!(session.start(&tiny, &mut NullObserver).is_err());
        assert_eq!(session.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_input_ignored_when_idle() {
        let mut session = Session::new(quiet_config()).expect("valid config");
        let before = session.player.clone();
        assert!(!session.handle_input(Direction::Right, &surface()));
        assert_eq!(session.player, before);
    }

    #[test]
    fn test_input_moves_player_when_running() {
        let mut session = running_session();
        assert!(session.handle_input(Direction::Right, &surface()));
        assert!((session.player.x - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let mut session = Session::new(GameConfig::default()).expect("valid config");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = session.tick(&mut rng, &surface(), &mut NullObserver);
        assert_eq!(result, TickResult::default());
    }

    #[test]
    fn test_passing_wall_scores_once() {
        let mut session = running_session();
        // Player at y=190; wall well above it
        session.obstacles.push(Obstacle::new(ObstacleId(0), 26.0, 0.0, 50.0, 25.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = session.tick(&mut rng, &surface(), &mut NullObserver);
        assert_eq!(result.points_scored(), 1);
        assert_eq!(session.score, 1);

        for _ in 0..5 {
            session.tick(&mut rng, &surface(), &mut NullObserver);
        }
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_collision_ends_round() {
        let mut session = running_session();
        session.score = 2;
        session
            .obstacles
            .push(Obstacle::new(ObstacleId(5), 60.0, 150.0, 100.0, 25.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = session.tick(&mut rng, &surface(), &mut NullObserver);
        assert_eq!(result.round_over(), Some(2));
        assert_eq!(
            result.events.last(),
            Some(&TickEvent::RoundOver {
                hit: ObstacleId(5),
                final_score: 2
            })
        );
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(session.obstacles.is_empty());
        assert!(!session.clock.is_running());
        assert_eq!(session.score, 2);
    }

    #[test]
    fn test_collision_short_circuits_on_first_hit() {
        let mut session = running_session();
        session
            .obstacles
            .push(Obstacle::new(ObstacleId(1), 60.0, 0.0, 400.0, 25.0));
        session
            .obstacles
            .push(Obstacle::new(ObstacleId(2), 55.0, 0.0, 400.0, 25.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = session.tick(&mut rng, &surface(), &mut NullObserver);
        let round_overs: Vec<_> = result
            .events
            .iter()
            .filter(|e| matches!(e, TickEvent::RoundOver { .. }))
            .collect();
        assert_eq!(round_overs.len(), 1);
        assert!(matches!(
            round_overs[0],
            TickEvent::RoundOver {
                hit: ObstacleId(1),
                ..
            }
        ));
    }

    #[test]
    fn test_run_due_stops_after_round_over() {
        let mut session = running_session();
        session
            .obstacles
            .push(Obstacle::new(ObstacleId(0), 75.0, 0.0, 400.0, 25.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // The first frame after start only covers time spent idle
        let first = session.run_due(
            Duration::from_millis(200),
            &mut rng,
            &surface(),
            &mut NullObserver,
        );
        assert_eq!(first.ticks, 0);
        assert!((session.obstacles[0].x - 75.0).abs() < f64::EPSILON);

        // 5 ticks due; the wall reaches the player on the second
        let result = session.run_due(
            Duration::from_millis(80),
            &mut rng,
            &surface(),
            &mut NullObserver,
        );
        assert_eq!(result.ticks, 2);
        assert!(result.round_over().is_some());

        let after = session.run_due(
            Duration::from_millis(80),
            &mut rng,
            &surface(),
            &mut NullObserver,
        );
        assert_eq!(after.ticks, 0);
    }

    #[test]
    fn test_edge_touching_wall_is_safe() {
        let mut session = running_session();
        // After one tick the wall's left edge sits exactly on the player's right edge (70)
        session
            .obstacles
            .push(Obstacle::new(ObstacleId(0), 73.0, 0.0, 400.0, 25.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = session.tick(&mut rng, &surface(), &mut NullObserver);
        assert!(result.round_over().is_none());
        assert!(session.is_running());
    }
}
