//! Merge Drop - a physics merge puzzle
//!
//! Core modules:
//! - `sim`: Game rules and state machine (queue, spawn, merge, game-over)
//! - `renderer`: Ball designs, HUD and queue preview over a 2D drawing surface
//! - `platform`: Browser glue (canvas surface, user-agent checks)
//! - `settings`: Runtime configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{DisplayClass, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz, in milliseconds)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the scheduler (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Ball radius = BASE_RADIUS * value
    pub const BASE_RADIUS: f32 = 10.0;
    /// Upcoming values kept in the lookahead queue
    pub const QUEUE_DEPTH: usize = 4;
    /// Spawned values are drawn uniformly from 1..=MAX_SPAWN_VALUE
    pub const MAX_SPAWN_VALUE: u32 = 4;

    /// Delay between a drop and the next spawn
    pub const DROP_COOLDOWN_MS: f64 = 2000.0;
    /// Horizontal movement of the current ball per physics step
    pub const MOVE_SPEED: f32 = 5.0;

    /// Game-over monitor cadence
    pub const MONITOR_PERIOD_MS: f64 = 100.0;
    /// Continuous contact with the line that ends the game (seconds)
    pub const DWELL_LIMIT_SECS: f64 = 3.0;

    /// Ball bounciness
    pub const RESTITUTION: f32 = 0.5;
    /// Vertical spawn coordinate of the current ball
    pub const SPAWN_Y: f32 = 100.0;
    /// Game-over line sits this far below the container top
    pub const LINE_OFFSET: f32 = 10.0;
    /// Container wall thickness
    pub const WALL_THICKNESS: f32 = 50.0;

    /// Downward acceleration of the physics world (units/s²)
    pub const GRAVITY: f32 = 980.0;
}
