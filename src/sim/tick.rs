//! Game controller and fixed timestep scheduler
//!
//! `Game` owns the rules state, the physics world and the clock. One call to
//! [`Game::advance`] per frame runs, in order: movement + physics steps (each
//! followed by merge resolution), the drop-cooldown timer, and the game-over
//! monitor ticks. Rendering reads [`Game::ball_snapshots`] afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::input::{Intent, TouchControl};
use super::merge::resolve_merges;
use super::monitor::{DwellStatus, touches_line};
use super::physics::{CircleOptions, CollisionPair, PhysicsWorld, RapierWorld};
use super::state::{Ball, BallPhase, GameEvent, GameState};
use crate::consts::*;
use crate::settings::GameConfig;

/// Pose of a ball for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub value: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
}

/// The whole game: rules state, world, clock
#[derive(Debug, Clone)]
pub struct Game<W: PhysicsWorld = RapierWorld> {
    state: GameState,
    world: W,
    config: GameConfig,
    arena: Arena,
    /// Elapsed game time (ms)
    clock_ms: f64,
    physics_acc: f64,
    monitor_acc: f64,
}

impl Game<RapierWorld> {
    /// New game on a fresh rapier world
    pub fn new(viewport: Vec2, config: GameConfig, seed: u64) -> Self {
        Self::with_world(RapierWorld::default(), viewport, config, seed)
    }
}

impl<W: PhysicsWorld> Game<W> {
    /// New game on an existing (empty) world; builds walls and spawns the
    /// first ball
    pub fn with_world(mut world: W, viewport: Vec2, config: GameConfig, seed: u64) -> Self {
        let arena = Arena::new(viewport, &config);
        arena.build_walls(&mut world);

        let mut game = Self {
            state: GameState::new(seed, &config),
            world,
            config,
            arena,
            clock_ms: 0.0,
            physics_acc: 0.0,
            monitor_acc: 0.0,
        };
        game.spawn_ball();
        log::info!(
            "Game started (seed {}, {} container, line at y = {})",
            seed,
            game.config.display.as_str(),
            game.arena.line_y
        );
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Take the next queued value and place it, frozen, at the spawn point.
    ///
    /// Callers gate this through the drop cooldown; it does not check for an
    /// existing current ball.
    fn spawn_ball(&mut self) {
        debug_assert!(self.state.current.is_none(), "spawn with a current ball");
        let value = self.state.queue.take_next();
        let radius = self.config.base_radius * value as f32;
        let body = self.world.add_circle(
            self.arena.spawn,
            radius,
            CircleOptions {
                restitution: self.config.restitution,
                is_static: true,
            },
        );
        let id = self.state.next_ball_id();
        self.state.current = Some(Ball {
            id,
            value,
            radius,
            body,
            phase: BallPhase::Frozen,
        });
        self.state.events.push(GameEvent::Spawned { id, value });
        log::info!("Spawned ball #{} (value {})", id, value);
    }

    /// Key pressed (DOM key name). Ignored while no ball is held or the
    /// game is over.
    pub fn key_down(&mut self, key: &str) {
        if self.state.current.is_none() || self.state.is_over() {
            return;
        }
        match Intent::from_key(key) {
            Some(Intent::Drop) => {
                self.drop_current();
            }
            Some(intent) => self.state.input.set_held(intent, true),
            None => {}
        }
    }

    /// Key released; always clears the movement flag
    pub fn key_up(&mut self, key: &str) {
        if let Some(intent) = Intent::from_key(key) {
            self.state.input.set_held(intent, false);
        }
    }

    pub fn touch_start(&mut self, control: TouchControl) {
        match control.intent() {
            Intent::Drop => {
                self.drop_current();
            }
            intent => self.state.input.set_held(intent, true),
        }
    }

    pub fn touch_end(&mut self, control: TouchControl) {
        self.state.input.set_held(control.intent(), false);
    }

    /// Release the current ball. No-op (returns false) without a current
    /// ball, after game over, or during the cooldown.
    pub fn drop_current(&mut self) -> bool {
        if self.state.is_over() || !self.state.input.can_drop {
            return false;
        }
        let Some(mut ball) = self.state.current.take() else {
            return false;
        };

        self.world.set_static(ball.body, false);
        ball.phase = BallPhase::Falling;
        self.state.events.push(GameEvent::Dropped {
            id: ball.id,
            value: ball.value,
        });
        log::info!("Dropped ball #{} (value {})", ball.id, ball.value);
        self.state.dropped.push(ball);

        self.state.input.can_drop = false;
        self.state.cooldown_until = Some(self.clock_ms + self.config.drop_cooldown_ms);
        true
    }

    /// Nudge the current ball by the held movement flags (soft bounds)
    pub fn apply_movement(&mut self) {
        if self.state.is_over() {
            return;
        }
        let Some(ball) = self.state.current.as_ref() else {
            return;
        };
        let Some(pos) = self.world.position(ball.body) else {
            return;
        };
        let radius = self.world.circle_radius(ball.body).unwrap_or(ball.radius);
        let (min_x, max_x) = self.arena.x_bounds(radius);
        let speed = self.config.move_speed;
        let body = ball.body;

        if self.state.input.move_left && pos.x > min_x {
            self.world.translate(body, Vec2::new(-speed, 0.0));
        }
        if self.state.input.move_right && pos.x < max_x {
            self.world.translate(body, Vec2::new(speed, 0.0));
        }
    }

    /// One physics step: movement first, then integration. Returns the
    /// contacts that started during the step.
    pub fn step_physics(&mut self) -> Vec<CollisionPair> {
        self.apply_movement();
        self.world.step((SIM_DT_MS / 1000.0) as f32)
    }

    /// Handle a step's collision batch: merges, then escaped-ball cleanup.
    /// Balls still settling after game over keep merging and scoring.
    pub fn resolve_collisions(&mut self, pairs: &[CollisionPair]) -> u32 {
        let merges = resolve_merges(&mut self.state, &mut self.world, pairs, &self.config);
        if self.config.cull_escaped {
            self.cull_escaped();
        }
        merges
    }

    fn cull_escaped(&mut self) {
        let escaped: Vec<Ball> = self
            .state
            .dropped
            .iter()
            .filter(|ball| {
                self.world
                    .position(ball.body)
                    .is_none_or(|pos| self.arena.has_escaped(pos))
            })
            .cloned()
            .collect();

        for ball in escaped {
            log::warn!("Ball #{} (value {}) left the container, removing", ball.id, ball.value);
            self.world.remove(ball.body);
            self.state.dropped.retain(|b| b.id != ball.id);
            self.state.events.push(GameEvent::Culled {
                id: ball.id,
                value: ball.value,
            });
        }
    }

    /// Fire the drop cooldown if it has expired; spawns the next ball while
    /// the game is running
    pub fn advance_timers(&mut self) {
        let Some(until) = self.state.cooldown_until else {
            return;
        };
        if self.clock_ms < until {
            return;
        }
        self.state.cooldown_until = None;
        self.state.input.can_drop = true;
        if !self.state.is_over() {
            self.spawn_ball();
        }
    }

    /// One game-over monitor tick
    pub fn monitor_tick(&mut self) -> DwellStatus {
        if self.state.is_over() {
            return DwellStatus::Clear;
        }
        let line_y = self.arena.line_y;
        let touching = self.state.dropped.iter().any(|ball| {
            self.world
                .position(ball.body)
                .is_some_and(|pos| touches_line(pos, ball.radius, line_y))
        });

        let status = self.state.monitor.tick(touching);
        if status == DwellStatus::LimitReached && self.state.end_game() {
            log::info!(
                "Game over after {:.1}s on the line, final score {}",
                self.state.dwell_secs(),
                self.state.score
            );
        }
        status
    }

    /// Advance the game by one frame's worth of wall-clock time
    pub fn advance(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        self.clock_ms += dt_ms;
        self.physics_acc += dt_ms;
        self.monitor_acc += dt_ms;

        let mut substeps = 0;
        while self.physics_acc >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let pairs = self.step_physics();
            self.resolve_collisions(&pairs);
            self.physics_acc -= SIM_DT_MS;
            substeps += 1;
        }

        self.advance_timers();

        let period = self.state.monitor.period_ms();
        while self.monitor_acc >= period {
            self.monitor_tick();
            self.monitor_acc -= period;
        }
    }

    /// Dropped balls first, then the current ball
    pub fn ball_snapshots(&self) -> Vec<BallSnapshot> {
        self.state
            .dropped
            .iter()
            .chain(self.state.current.iter())
            .filter_map(|ball| {
                Some(BallSnapshot {
                    id: ball.id,
                    value: ball.value,
                    pos: self.world.position(ball.body)?,
                    angle: self.world.angle(ball.body).unwrap_or(0.0),
                    radius: ball.radius,
                })
            })
            .collect()
    }

    /// Place a free-falling ball directly (test setup)
    #[cfg(test)]
    pub(crate) fn place_dropped(&mut self, value: u32, pos: Vec2) -> Ball {
        let radius = self.config.base_radius * value as f32;
        let body = self.world.add_circle(
            pos,
            radius,
            CircleOptions {
                restitution: self.config.restitution,
                is_static: false,
            },
        );
        let ball = Ball {
            id: self.state.next_ball_id(),
            value,
            radius,
            body,
            phase: BallPhase::Falling,
        };
        self.state.dropped.push(ball.clone());
        ball
    }
}
