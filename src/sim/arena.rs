//! Container geometry
//!
//! The container is centered horizontally in the viewport and sits on its
//! bottom edge. Walls are centered on the container's left, right and bottom
//! edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsWorld;
use crate::settings::GameConfig;

/// Container and line placement for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Viewport size the arena was laid out for
    pub viewport: Vec2,
    /// Container center
    pub center: Vec2,
    /// Container (width, height)
    pub size: Vec2,
    pub wall_thickness: f32,
    /// Game-over line y (smaller y = higher on screen)
    pub line_y: f32,
    /// Where the current ball appears
    pub spawn: Vec2,
}

impl Arena {
    pub fn new(viewport: Vec2, config: &GameConfig) -> Self {
        let (w, h) = config.display.container_size();
        let size = Vec2::new(w, h);
        let center = Vec2::new(viewport.x / 2.0, viewport.y - h / 2.0);
        Self {
            viewport,
            center,
            size,
            wall_thickness: config.wall_thickness,
            line_y: center.y - h / 2.0 + config.line_offset,
            spawn: Vec2::new(center.x, config.spawn_y),
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Allowed x range for a ball center of the given radius
    pub fn x_bounds(&self, radius: f32) -> (f32, f32) {
        (self.left() + radius, self.right() - radius)
    }

    /// True once a ball center has left the container by more than one
    /// container height (only possible if the world lets it escape)
    pub fn has_escaped(&self, pos: Vec2) -> bool {
        let margin = self.size.y;
        pos.y > self.bottom() + margin
            || pos.y < self.top() - margin
            || pos.x < self.left() - margin
            || pos.x > self.right() + margin
    }

    /// Add floor, left and right walls as static bodies
    pub fn build_walls<W: PhysicsWorld>(&self, world: &mut W) {
        let t = self.wall_thickness;
        world.add_static_rect(
            Vec2::new(self.center.x, self.bottom()),
            Vec2::new(self.size.x, t),
        );
        world.add_static_rect(
            Vec2::new(self.left(), self.center.y),
            Vec2::new(t, self.size.y),
        );
        world.add_static_rect(
            Vec2::new(self.right(), self.center.y),
            Vec2::new(t, self.size.y),
        );
    }
}
