//! Ball drawing
//!
//! Pure function of pose, radius, value and the shared animation clock. Every
//! design gets the same black outline and centered number.

use std::f32::consts::{PI, TAU};

use super::animation::AnimationClock;
use super::design::BallDesign;
use super::surface::{Color, Surface, TextStyle, colors};
use crate::sim::BallSnapshot;

/// Outline stroke width
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Draw one ball in its design
pub fn draw_ball(
    surface: &mut impl Surface,
    ball: &BallSnapshot,
    design: &BallDesign,
    clock: &AnimationClock,
) {
    let r = ball.radius;

    surface.save();
    surface.translate(ball.pos.x, ball.pos.y);
    surface.rotate(ball.angle);

    match *design {
        BallDesign::Solid(color) => fill_disc(surface, r, color),
        BallDesign::Split { top, bottom } => {
            // 0..PI sweeps through +y, the lower half on screen
            surface.begin_path();
            surface.arc(0.0, 0.0, r, 0.0, PI);
            surface.fill(bottom);

            surface.begin_path();
            surface.arc(0.0, 0.0, r, PI, TAU);
            surface.fill(top);
        }
        BallDesign::Wedges(colors) => fill_wedges(surface, r, colors),
        BallDesign::Stripes { count, even, odd } => {
            surface.save();
            surface.begin_path();
            surface.arc(0.0, 0.0, r, 0.0, TAU);
            surface.clip();

            let width = 2.0 * r / count as f32;
            for i in 0..count {
                let color = if i % 2 == 0 { even } else { odd };
                surface.fill_rect(-r + i as f32 * width, -r, width, 2.0 * r, color);
            }
            surface.restore();
        }
        BallDesign::Rings { count, even, odd } => {
            for i in (1..=count).rev() {
                let color = if i % 2 == 0 { even } else { odd };
                fill_disc(surface, r * i as f32 / count as f32, color);
            }
        }
        BallDesign::Blink { on, off } => {
            fill_disc(surface, r, if clock.blink_on() { on } else { off });
        }
        BallDesign::Spinning(colors) => {
            surface.save();
            surface.rotate(clock.rotation());
            fill_wedges(surface, r, colors);
            surface.restore();
        }
        BallDesign::Noise => fill_wedges(surface, r, clock.grays()),
    }

    stroke_outline(surface, r);
    surface.fill_text(&ball.value.to_string(), 0.0, 0.0, &TextStyle::centered(r));

    surface.restore();
}

fn fill_disc(surface: &mut impl Surface, r: f32, color: Color) {
    surface.begin_path();
    surface.arc(0.0, 0.0, r, 0.0, TAU);
    surface.fill(color);
}

/// Equal pie wedges starting at angle 0
fn fill_wedges(surface: &mut impl Surface, r: f32, colors: &[Color]) {
    let n = colors.len() as f32;
    for (i, &color) in colors.iter().enumerate() {
        let i = i as f32;
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.arc(0.0, 0.0, r, i * TAU / n, (i + 1.0) * TAU / n);
        surface.close_path();
        surface.fill(color);
    }
}

pub(crate) fn stroke_outline(surface: &mut impl Surface, r: f32) {
    surface.begin_path();
    surface.arc(0.0, 0.0, r, 0.0, TAU);
    surface.stroke(colors::OUTLINE, OUTLINE_WIDTH);
}
