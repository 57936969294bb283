//! Value → visual design table
//!
//! Each ball value maps to a small tagged pattern the ball renderer
//! interprets. Values past the table fall through to concentric rings (or,
//! with animated designs enabled, the shared grayscale noise pattern), so any
//! value renders.

use super::surface::Color;

/// How a ball of a given value looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallDesign {
    /// Single flat color
    Solid(Color),
    /// Upper and lower semicircles
    Split { top: Color, bottom: Color },
    /// Equal wedges starting at angle 0, one per color
    Wedges(&'static [Color]),
    /// Vertical stripes clipped to the disc, alternating even/odd
    Stripes { count: u32, even: Color, odd: Color },
    /// Concentric rings, outermost first; ring i (1 = innermost) uses
    /// `even` when i is even
    Rings { count: u32, even: Color, odd: Color },
    /// Whole disc alternating between two colors on the shared blink timer
    Blink { on: Color, off: Color },
    /// Wedges rotating with elapsed time
    Spinning(&'static [Color]),
    /// Quadrants in the shared random grays
    Noise,
}

const QUADRANTS_ORANGE: [Color; 4] = [
    Color::hex(0xff5500),
    Color::hex(0xff1100),
    Color::hex(0xff5500),
    Color::hex(0xff1100),
];

const TWELVE_GREENS: [Color; 12] = {
    let a = Color::hex(0x00ff22);
    let b = Color::hex(0x00ff66);
    [a, b, a, b, a, b, a, b, a, b, a, b]
};

const RAINBOW: [Color; 6] = [
    Color::hex(0xff0000),
    Color::hex(0xffff00),
    Color::hex(0x00ff00),
    Color::hex(0x00ffff),
    Color::hex(0x0000ff),
    Color::hex(0xff00ff),
];

const RGB: [Color; 3] = [
    Color::hex(0xff0000),
    Color::hex(0x00ff00),
    Color::hex(0x0000ff),
];

const PURPLE_RINGS: BallDesign = BallDesign::Rings {
    count: 5,
    even: Color::hex(0xbb77ff),
    odd: Color::hex(0xaa55ff),
};

impl BallDesign {
    /// Design for `value`; `animated` enables the 11 / 12 / 13+ variants
    pub fn for_value(value: u32, animated: bool) -> Self {
        match value {
            1 => BallDesign::Solid(Color::hex(0xffff00)),
            2 => BallDesign::Solid(Color::hex(0x00ff00)),
            3 => BallDesign::Solid(Color::hex(0xff0000)),
            4 => BallDesign::Solid(Color::hex(0x0000ff)),
            5 => BallDesign::Split {
                top: Color::hex(0x0099ff),
                bottom: Color::hex(0x00bbff),
            },
            6 => BallDesign::Wedges(&QUADRANTS_ORANGE),
            7 => BallDesign::Wedges(&TWELVE_GREENS),
            8 => BallDesign::Stripes {
                count: 10,
                even: Color::hex(0x333333),
                odd: Color::hex(0xdddddd),
            },
            9 => BallDesign::Wedges(&RAINBOW),
            11 if animated => BallDesign::Blink {
                on: Color::hex(0xffd700),
                off: Color::hex(0xffffff),
            },
            12 if animated => BallDesign::Spinning(&RGB),
            v if animated && v >= 13 => BallDesign::Noise,
            _ => PURPLE_RINGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_colors() {
        assert_eq!(BallDesign::for_value(1, true), BallDesign::Solid(Color::hex(0xffff00)));
        assert_eq!(BallDesign::for_value(4, false), BallDesign::Solid(Color::hex(0x0000ff)));
    }

    #[test]
    fn test_wedge_counts() {
        let count = |v| match BallDesign::for_value(v, true) {
            BallDesign::Wedges(colors) => colors.len(),
            other => panic!("value {} gave {:?}", v, other),
        };
        assert_eq!(count(6), 4);
        assert_eq!(count(7), 12);
        assert_eq!(count(9), 6);
    }

    #[test]
    fn test_animated_variants_toggle() {
        assert!(matches!(BallDesign::for_value(11, true), BallDesign::Blink { .. }));
        assert_eq!(BallDesign::for_value(12, true), BallDesign::Spinning(&RGB));
        assert_eq!(BallDesign::for_value(13, true), BallDesign::Noise);
        assert_eq!(BallDesign::for_value(14, true), BallDesign::Noise);

        for v in [10, 11, 12, 13, 14] {
            assert_eq!(BallDesign::for_value(v, false), PURPLE_RINGS);
        }
        assert_eq!(BallDesign::for_value(10, true), PURPLE_RINGS);
    }

    #[test]
    fn test_every_value_has_a_design() {
        for v in [0, 15, 99, 1_000_000, u32::MAX] {
            let animated = BallDesign::for_value(v, true);
            let base = BallDesign::for_value(v, false);
            assert_eq!(base, PURPLE_RINGS);
            if v >= 13 {
                assert_eq!(animated, BallDesign::Noise);
            }
        }
    }
}
