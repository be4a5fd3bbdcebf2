//! Integration test: round lifecycle
//!
//! Drives a session through start → ticks → collision → idle the way the
//! terminal host does, with an observer that records every notification.

use wallrun::core::obstacle::{Obstacle, ObstacleId};
use wallrun::core::player::Direction;
use wallrun::core::ports::{LogicalSurface, SessionObserver};
use wallrun::{FieldSize, GameConfig, Session, SessionPhase, TickEvent};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Default)]
struct Recorder {
    scores: Vec<u32>,
    start_visible: Vec<bool>,
    round_overs: Vec<u32>,
}

impl SessionObserver for Recorder {
    fn score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn start_available(&mut self, available: bool) {
        self.start_visible.push(available);
    }

    fn round_over(&mut self, final_score: u32) {
        self.round_overs.push(final_score);
    }
}

/// Replays fixed raw draws, then returns `u64::MAX` (a spawn roll that never
/// fires). `next_u32` takes the low half of the next draw.
struct ScriptedRng {
    draws: VecDeque<u64>,
}

impl ScriptedRng {
    fn new(draws: &[u64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.draws.pop_front().unwrap_or(u64::MAX)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Draws for one spawn on an 800x400 field: trigger 0.0, then a gap of
/// 150 (120 + 60 * 2^31 / 2^32), then a top height of floor(0.4375 * 230) = 100.
fn gap_150_height_100() -> ScriptedRng {
    ScriptedRng::new(&[0, 1 << 31, 7 << 60])
}

fn surface() -> LogicalSurface {
    LogicalSurface::new(FieldSize::new(800.0, 400.0))
}

/// Config with random spawning off so each test places its own walls.
fn scripted_config() -> GameConfig {
    GameConfig {
        spawn_rate: 0.0,
        ..GameConfig::with_field(800.0, 400.0)
    }
}

fn started(observer: &mut Recorder) -> Session {
    let mut session = Session::new(scripted_config()).expect("valid config");
    assert_eq!(session.start(&surface(), observer), Ok(true));
    session
}

// =============================================================================
// Start
// =============================================================================

#[test]
fn test_start_emits_score_and_hides_start() {
    let mut rec = Recorder::default();
    let session = started(&mut rec);

    assert_eq!(session.phase, SessionPhase::Running);
    assert_eq!(rec.scores, vec![0]);
    assert_eq!(rec.start_visible, vec![false]);
    assert!(session.obstacles.is_empty());
    assert!((session.player.x - 50.0).abs() < f64::EPSILON);
    assert!((session.player.y - 190.0).abs() < f64::EPSILON);
}

#[test]
fn test_start_while_running_changes_nothing() {
    let mut rec = Recorder::default();
    let mut session = started(&mut rec);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    session.handle_input(Direction::Down, &surface());
    let [top, bottom] = session.spawner.spawn_pair(FieldSize::new(800.0, 400.0), 150, 100);
    session.obstacles.extend([top, bottom]);
    session.tick(&mut rng, &surface(), &mut rec);
    let snapshot = (session.player.clone(), session.obstacles.clone(), session.score);

    assert_eq!(session.start(&surface(), &mut rec), Ok(false));
    assert_eq!(
        (session.player.clone(), session.obstacles.clone(), session.score),
        snapshot
    );
    // No second reset notification
    assert_eq!(rec.scores, vec![0]);
    assert_eq!(rec.start_visible, vec![false]);
}

// =============================================================================
// Spawn → scroll → removal scenario
// =============================================================================

#[test]
fn test_spawned_pair_scrolls_off_and_is_removed() {
    let mut rec = Recorder::default();
    let mut session = Session::new(GameConfig::with_field(800.0, 400.0)).expect("valid config");
    session.start(&surface(), &mut rec).expect("valid field");
    let mut rng = gap_150_height_100();

    let first = session.tick(&mut rng, &surface(), &mut rec);
    let [top, bottom] = match first.events.first() {
        Some(TickEvent::Spawned { top, bottom }) => [*top, *bottom],
        other => panic!("expected a spawn, got {:?}", other),
    };
    // Spawned at the right edge, then advanced once in the same tick
    let walls: Vec<_> = session
        .obstacles
        .iter()
        .map(|o| (o.x, o.top, o.height))
        .collect();
    assert_eq!(walls, vec![(797.0, 0.0, 100.0), (797.0, 250.0, 150.0)]);

    let mut removed = Vec::new();
    let mut removed_at = None;
    for tick in 2..=320 {
        let result = session.tick(&mut rng, &surface(), &mut rec);
        assert!(result.round_over().is_none(), "player sits inside the gap");
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::Spawned { .. })));
        for event in result.events {
            if let TickEvent::Removed { id } = event {
                removed.push(id);
                removed_at.get_or_insert(tick);
            }
        }
    }

    assert!(session.obstacles.is_empty());
    assert_eq!(removed, vec![top, bottom]);
    // 800 - 3 * 276 = -28 is the first position past -25
    assert_eq!(removed_at, Some(276));
    // Both walls cleared the player
    assert_eq!(session.score, 2);
    assert_eq!(rec.scores, vec![0, 1, 2]);
}

#[test]
fn test_run_due_ignores_idle_wait_before_start() {
    let mut rec = Recorder::default();
    let mut session = Session::new(GameConfig::with_field(800.0, 400.0)).expect("valid config");
    session.start(&surface(), &mut rec).expect("valid field");
    let mut rng = gap_150_height_100();

    // Start arrived late in a long idle poll
    let result = session.run_due(Duration::from_millis(90), &mut rng, &surface(), &mut rec);
    assert_eq!(result.ticks, 0);
    assert!(session.obstacles.is_empty());

    let result = session.run_due(Duration::from_millis(16), &mut rng, &surface(), &mut rec);
    assert_eq!(result.ticks, 1);
    assert_eq!(session.obstacles.len(), 2);
}

#[test]
fn test_removal_tick_matches_threshold() {
    let mut rec = Recorder::default();
    let mut session = started(&mut rec);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    session
        .obstacles
        .push(Obstacle::new(ObstacleId(0), 800.0, 0.0, 100.0, 25.0));

    // 800 - 3 * 275 = -25 (still present), 800 - 3 * 276 = -28 (removed)
    for _ in 0..275 {
        session.tick(&mut rng, &surface(), &mut rec);
    }
    assert_eq!(session.obstacles.len(), 1);
    assert!((session.obstacles[0].x + 25.0).abs() < 1e-9);

    session.tick(&mut rng, &surface(), &mut rec);
    assert!(session.obstacles.is_empty());
}

// =============================================================================
// Collision → game over
// =============================================================================

#[test]
fn test_moving_into_wall_ends_round() {
    let mut rec = Recorder::default();
    let mut session = started(&mut rec);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // A solid wall parked just right of the player
    session
        .obstacles
        .push(Obstacle::new(ObstacleId(0), 83.0, 0.0, 400.0, 25.0));
    session.tick(&mut rng, &surface(), &mut rec);
    assert!(session.is_running());

    // Walk right until overlapping; the wall keeps approaching too
    for _ in 0..3 {
        session.handle_input(Direction::Right, &surface());
    }
    let result = session.tick(&mut rng, &surface(), &mut rec);

    assert_eq!(result.round_over(), Some(0));
    assert_eq!(session.phase, SessionPhase::Idle);
    assert!(session.obstacles.is_empty());
    assert!(!session.clock.is_running());
    assert_eq!(rec.start_visible, vec![false, true]);
    assert_eq!(rec.round_overs, vec![0]);
}

#[test]
fn test_no_ticks_or_moves_after_game_over() {
    let mut rec = Recorder::default();
    let mut session = started(&mut rec);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    session
        .obstacles
        .push(Obstacle::new(ObstacleId(0), 52.0, 0.0, 400.0, 25.0));
    assert!(session.tick(&mut rng, &surface(), &mut rec).round_over().is_some());

    let player = session.player.clone();
    let result = session.tick(&mut rng, &surface(), &mut rec);
    assert_eq!(result.ticks, 0);
    assert!(!session.handle_input(Direction::Up, &surface()));
    assert_eq!(session.player, player);
    assert_eq!(rec.round_overs.len(), 1);
}

#[test]
fn test_restart_after_game_over() {
    let mut rec = Recorder::default();
    let mut session = started(&mut rec);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    // Score a point, then crash
    session
        .obstacles
        .push(Obstacle::new(ObstacleId(0), 20.0, 0.0, 50.0, 25.0));
    session.tick(&mut rng, &surface(), &mut rec);
    assert_eq!(session.score, 1);
    session
        .obstacles
        .push(Obstacle::new(ObstacleId(1), 55.0, 150.0, 100.0, 25.0));
    session.tick(&mut rng, &surface(), &mut rec);
    assert_eq!(rec.round_overs, vec![1]);
    assert_eq!(session.score, 1);

    assert_eq!(session.start(&surface(), &mut rec), Ok(true));
    assert_eq!(session.score, 0);
    assert!(session.is_running());
    assert_eq!(rec.scores, vec![0, 1, 0]);
}

#[test]
fn test_start_rejects_invalid_surface() {
    let mut rec = Recorder::default();
    let mut session = Session::new(scripted_config()).expect("valid config");
    let bad = LogicalSurface::new(FieldSize::new(800.0, 0.0));
    assert!(session.start(&bad, &mut rec).is_err());
    assert!(rec.scores.is_empty());
    assert!(!session.is_running());
}
