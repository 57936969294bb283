//! Game-over dwell monitor
//!
//! Polled on a fixed cadence. Each tick with a ball touching the line adds one
//! period of dwell; any clear tick resets it. Dwell is counted in whole ticks
//! so the limit is hit on exactly the same tick every run.

use glam::Vec2;

/// Outcome of one monitor tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellStatus {
    Clear,
    Touching,
    LimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverMonitor {
    dwell_ticks: u32,
    limit_ticks: u32,
    period_ms: f64,
}

impl GameOverMonitor {
    pub fn new(limit_ticks: u32, period_ms: f64) -> Self {
        Self {
            dwell_ticks: 0,
            limit_ticks: limit_ticks.max(1),
            period_ms,
        }
    }

    /// Record one tick
    pub fn tick(&mut self, touching: bool) -> DwellStatus {
        if !touching {
            self.dwell_ticks = 0;
            return DwellStatus::Clear;
        }
        self.dwell_ticks = self.dwell_ticks.saturating_add(1);
        if self.dwell_ticks >= self.limit_ticks {
            DwellStatus::LimitReached
        } else {
            DwellStatus::Touching
        }
    }

    pub fn dwell_ticks(&self) -> u32 {
        self.dwell_ticks
    }

    pub fn dwell_secs(&self) -> f64 {
        self.dwell_ticks as f64 * self.period_ms / 1000.0
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}

/// True if a ball's top edge is at or above the line (y grows downward)
pub fn touches_line(center: Vec2, radius: f32, line_y: f32) -> bool {
    center.y - radius <= line_y
}
