//! Frame, HUD and queue preview drawing

use std::f32::consts::TAU;

use super::animation::AnimationClock;
use super::ball::{draw_ball, stroke_outline};
use super::design::BallDesign;
use super::surface::{Surface, TextAlign, TextBaseline, TextStyle, colors};
use crate::settings::DisplayClass;
use crate::sim::{Game, PhysicsWorld};

/// Placement of the "Next" preview strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub start_x: f32,
    pub y: f32,
    pub spacing: f32,
    pub scale: f32,
    pub arrow_size: f32,
}

impl PreviewLayout {
    pub fn new(display: DisplayClass, viewport_width: f32) -> Self {
        match display {
            DisplayClass::Compact => Self {
                start_x: viewport_width - 180.0,
                y: 50.0,
                spacing: 60.0,
                scale: 0.5,
                arrow_size: 20.0,
            },
            DisplayClass::Full => Self {
                start_x: viewport_width - 420.0,
                y: 100.0,
                spacing: 110.0,
                scale: 0.9,
                arrow_size: 32.0,
            },
        }
    }

    /// Center x of the i-th preview entry
    pub fn entry_x(&self, i: usize) -> f32 {
        self.start_x + i as f32 * self.spacing
    }

    /// Center x of the "Next" label for `len` entries
    pub fn label_x(&self, len: usize) -> f32 {
        self.start_x + (len as f32 * self.spacing) / 2.0 - self.spacing / 2.0
    }
}

/// Draw a full frame: background, walls, score, line, balls, preview
pub fn draw_frame<W: PhysicsWorld>(
    surface: &mut impl Surface,
    game: &Game<W>,
    clock: &AnimationClock,
) {
    let arena = game.arena();
    let config = game.config();

    surface.fill_rect(
        0.0,
        0.0,
        arena.viewport.x,
        arena.viewport.y,
        colors::BACKGROUND,
    );
    draw_walls(surface, game);

    draw_score(surface, game.state().score());
    draw_line(surface, arena.left(), arena.right(), arena.line_y);

    for ball in game.ball_snapshots() {
        let design = BallDesign::for_value(ball.value, config.animated_designs);
        draw_ball(surface, &ball, &design, clock);
    }

    let queue: Vec<u32> = game.state().queue().iter().collect();
    let layout = PreviewLayout::new(config.display, arena.viewport.x);
    draw_preview(surface, &queue, &layout, config.base_radius);
}

fn draw_walls<W: PhysicsWorld>(surface: &mut impl Surface, game: &Game<W>) {
    let arena = game.arena();
    let t = arena.wall_thickness;
    let half = t / 2.0;
    // Floor, left, right
    surface.fill_rect(arena.left(), arena.bottom() - half, arena.size.x, t, colors::WALL);
    surface.fill_rect(arena.left() - half, arena.top(), t, arena.size.y, colors::WALL);
    surface.fill_rect(arena.right() - half, arena.top(), t, arena.size.y, colors::WALL);
}

/// Score text in the top-left corner
pub fn draw_score(surface: &mut impl Surface, score: u64) {
    let style = TextStyle {
        size: 24.0,
        color: colors::TEXT,
        align: TextAlign::Left,
        baseline: TextBaseline::Alphabetic,
    };
    surface.fill_text(&format!("Score: {}", score), 20.0, 40.0, &style);
}

/// Horizontal game-over line across the container
pub fn draw_line(surface: &mut impl Surface, left: f32, right: f32, y: f32) {
    surface.begin_path();
    surface.move_to(left, y);
    surface.line_to(right, y);
    surface.stroke(colors::GAME_OVER_LINE, 2.0);
}

/// Upcoming values as neutral discs joined by arrows, with a label above
pub fn draw_preview(
    surface: &mut impl Surface,
    values: &[u32],
    layout: &PreviewLayout,
    base_radius: f32,
) {
    let label = TextStyle {
        size: 20.0,
        color: colors::TEXT,
        align: TextAlign::Center,
        baseline: TextBaseline::Alphabetic,
    };
    surface.fill_text("Next", layout.label_x(values.len()), layout.y - 40.0, &label);

    for (i, &value) in values.iter().enumerate() {
        let r = base_radius * value as f32 * layout.scale;
        let x = layout.entry_x(i);

        surface.save();
        surface.translate(x, layout.y);
        surface.begin_path();
        surface.arc(0.0, 0.0, r, 0.0, TAU);
        surface.fill(colors::PREVIEW_FILL);
        stroke_outline(surface, r);
        surface.fill_text(&value.to_string(), 0.0, 0.0, &TextStyle::centered(r));
        surface.restore();

        if i + 1 < values.len() {
            surface.fill_text(
                "←",
                x + layout.spacing / 2.0,
                layout.y,
                &TextStyle::centered(layout.arrow_size),
            );
        }
    }
}
