//! Game state and core simulation types
//!
//! One owned object holds everything the rules mutate: score, queue, the
//! current ball, the dropped set, the dwell monitor and the input flags.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::monitor::GameOverMonitor;
use super::physics::BodyId;
use super::queue::LookaheadQueue;
use crate::settings::GameConfig;

/// Current phase of gameplay (one-way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Terminal: no more input or spawning
    GameOver,
}

/// Ball physical state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Held at the spawn point, player-controlled
    Frozen,
    /// Released into the simulation
    Falling,
}

/// A numbered ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Stable id assigned by the game (never reused)
    pub id: u32,
    /// Value >= 1
    pub value: u32,
    pub radius: f32,
    /// Physics body backing this ball
    pub body: BodyId,
    pub phase: BallPhase,
}

/// Something worth telling the outside world about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, value: u32 },
    Dropped { id: u32, value: u32 },
    Merged { id: u32, value: u32, pos: Vec2, points: u64 },
    Culled { id: u32, value: u32 },
    GameOver { score: u64 },
}

/// Complete rules state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) score: u64,
    pub(crate) phase: GamePhase,
    pub(crate) queue: LookaheadQueue,
    /// The player-controlled ball (never a merge participant)
    pub(crate) current: Option<Ball>,
    /// Released balls (sorted by creation for stable iteration)
    pub(crate) dropped: Vec<Ball>,
    pub(crate) monitor: GameOverMonitor,
    pub(crate) input: InputState,
    /// Clock time (ms) when the drop cooldown expires
    pub(crate) cooldown_until: Option<f64>,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            score: 0,
            phase: GamePhase::Running,
            queue: LookaheadQueue::with_params(seed, config.queue_depth, config.max_spawn_value),
            current: None,
            dropped: Vec::new(),
            monitor: GameOverMonitor::new(config.dwell_limit_ticks(), config.monitor_period_ms),
            input: InputState::default(),
            cooldown_until: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new ball id
    pub(crate) fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn current(&self) -> Option<&Ball> {
        self.current.as_ref()
    }

    pub fn dropped(&self) -> &[Ball] {
        &self.dropped
    }

    pub fn queue(&self) -> &LookaheadQueue {
        &self.queue
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Seconds of continuous line contact so far
    pub fn dwell_secs(&self) -> f64 {
        self.monitor.dwell_secs()
    }

    /// Find a dropped ball by its physics body
    pub fn dropped_by_body(&self, body: BodyId) -> Option<&Ball> {
        self.dropped.iter().find(|b| b.body == body)
    }

    /// Add points from a merge
    pub(crate) fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Enter the terminal phase (only the first call has any effect)
    pub(crate) fn end_game(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        true
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
