//! Game configuration
//!
//! Defaults mirror [`crate::consts`]. The browser build may override any
//! subset through a JSON blob embedded in the page.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult, require_positive};

/// Coarse display class (phone-sized vs desktop-sized container)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayClass {
    Compact,
    #[default]
    Full,
}

impl DisplayClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayClass::Compact => "Compact",
            DisplayClass::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "mobile" => Some(DisplayClass::Compact),
            "full" | "desktop" => Some(DisplayClass::Full),
            _ => None,
        }
    }

    /// Container (width, height) for this class
    pub fn container_size(&self) -> (f32, f32) {
        match self {
            DisplayClass::Compact => (200.0, 300.0),
            DisplayClass::Full => (400.0, 600.0),
        }
    }
}

/// Runtime game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Balls ===
    /// Radius of a value-1 ball; value n has radius n * base_radius
    pub base_radius: f32,
    /// Bounciness of every ball
    pub restitution: f32,

    // === Queue ===
    /// Number of upcoming values kept (and previewed)
    pub queue_depth: usize,
    /// Spawned values are uniform in 1..=max_spawn_value
    pub max_spawn_value: u32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === Control ===
    /// Drop cooldown before the next ball spawns
    pub drop_cooldown_ms: f64,
    /// Horizontal movement per physics step
    pub move_speed: f32,

    // === Game over ===
    /// Game-over monitor cadence
    pub monitor_period_ms: f64,
    /// Seconds of continuous line contact that end the game
    pub dwell_limit_secs: f64,

    // === Layout ===
    pub display: DisplayClass,
    pub spawn_y: f32,
    pub line_offset: f32,
    pub wall_thickness: f32,

    // === Variants ===
    /// Animated designs for values 11, 12 and 13+ (rings otherwise)
    pub animated_designs: bool,
    /// Remove dropped balls that escape the container
    pub cull_escaped: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_radius: BASE_RADIUS,
            restitution: RESTITUTION,

            queue_depth: QUEUE_DEPTH,
            max_spawn_value: MAX_SPAWN_VALUE,
            seed: None,

            drop_cooldown_ms: DROP_COOLDOWN_MS,
            move_speed: MOVE_SPEED,

            monitor_period_ms: MONITOR_PERIOD_MS,
            dwell_limit_secs: DWELL_LIMIT_SECS,

            display: DisplayClass::Full,
            spawn_y: SPAWN_Y,
            line_offset: LINE_OFFSET,
            wall_thickness: WALL_THICKNESS,

            animated_designs: true,
            cull_escaped: true,
        }
    }
}

impl GameConfig {
    /// Defaults for a display class
    pub fn for_display(display: DisplayClass) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game rules cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("base_radius", self.base_radius as f64)?;
        require_positive("queue_depth", self.queue_depth as f64)?;
        require_positive("max_spawn_value", self.max_spawn_value as f64)?;
        require_positive("drop_cooldown_ms", self.drop_cooldown_ms)?;
        require_positive("move_speed", self.move_speed as f64)?;
        require_positive("monitor_period_ms", self.monitor_period_ms)?;
        require_positive("dwell_limit_secs", self.dwell_limit_secs)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::OutOfRange {
                field: "restitution",
                value: self.restitution as f64,
                expected: "[0, 1]",
            });
        }
        Ok(())
    }

    /// Monitor ticks of continuous contact needed for game over
    pub fn dwell_limit_ticks(&self) -> u32 {
        (self.dwell_limit_secs * 1000.0 / self.monitor_period_ms).round() as u32
    }
}
