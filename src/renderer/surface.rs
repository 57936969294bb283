//! 2D drawing surface contract
//!
//! The subset of a canvas-style context the game draws with: paths and arcs,
//! fills and strokes, clipping, a scoped transform stack and text. Coordinates
//! are game units with y growing downward; angles are radians, clockwise on
//! screen.

use serde::{Deserialize, Serialize};

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// From 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub const fn gray(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    /// CSS color string (`#rrggbb`)
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors for HUD elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x222222);
    pub const WALL: Color = Color::hex(0x666666);
    pub const OUTLINE: Color = Color::hex(0x000000);
    pub const TEXT: Color = Color::hex(0xffffff);
    pub const GAME_OVER_LINE: Color = Color::hex(0xff3333);
    pub const PREVIEW_FILL: Color = Color::hex(0x444444);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        }
    }
}

/// Font and placement for one text draw (always bold Arial)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// White text centered on the anchor point
    pub fn centered(size: f32) -> Self {
        Self {
            size,
            color: colors::TEXT,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        format!("bold {}px Arial", self.size)
    }
}

/// Drawing context the renderer draws into
pub trait Surface {
    /// Push transform and clip state
    fn save(&mut self);
    /// Pop transform and clip state
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Clockwise arc from `start` to `end` around (x, y)
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    /// Intersect the clip region with the current path
    fn clip(&mut self);

    /// Fill the current path
    fn fill(&mut self, color: Color);
    /// Stroke the current path
    fn stroke(&mut self, color: Color, width: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_css() {
        let c = Color::hex(0x00bbff);
        assert_eq!((c.r, c.g, c.b), (0x00, 0xbb, 0xff));
        assert_eq!(c.css(), "#00bbff");
        assert_eq!(Color::gray(0x33), Color::hex(0x333333));
    }

    #[test]
    fn test_font_string() {
        assert_eq!(TextStyle::centered(24.0).font(), "bold 24px Arial");
    }
}
