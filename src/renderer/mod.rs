//! Canvas rendering
//!
//! Everything here draws through the [`Surface`] trait, so frames can be
//! recorded in tests and replayed onto a browser canvas at runtime.

pub mod animation;
pub mod ball;
pub mod design;
pub mod hud;
pub mod surface;

#[cfg(test)]
pub(crate) mod recording;

pub use animation::AnimationClock;
pub use ball::draw_ball;
pub use design::BallDesign;
pub use hud::{PreviewLayout, draw_frame};
pub use surface::{Color, Surface, TextAlign, TextBaseline, TextStyle};
