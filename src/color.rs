//! Color resolution: the shared rainbow hue cursor and the foreground
//! palette.

use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

/// Saturation used by every rainbow-style mode.
pub const RAINBOW_SAT: u8 = 255;
/// Value (brightness) used by every rainbow-style mode.
pub const RAINBOW_VAL: u8 = 190;

/// The continuously rotating hue shared by the rainbow background and the
/// rainbow/cycle foreground.
///
/// The compositor advances the cursor once per eligible tick whenever any
/// rainbow consumer is active, so concurrent rainbow effects stay in step
/// on one rotation. A frame-counter throttle slows the rotation to one hue
/// step every `refresh_rate_hz / 4 + 1` frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct HueCursor {
    hue: u8,
    counter: u8,
}

impl HueCursor {
    /// A cursor at hue zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { hue: 0, counter: 0 }
    }

    /// Current hue, 0-255 wrapping.
    #[must_use]
    pub const fn hue(&self) -> u8 {
        self.hue
    }

    /// Advance the throttle counter, stepping the hue when it fills.
    pub fn advance(&mut self, refresh_rate_hz: u8) {
        if self.counter < refresh_rate_hz / 4 {
            self.counter += 1;
        } else {
            self.hue = self.hue.wrapping_add(1);
            self.counter = 0;
        }
    }

    /// Rainbow sample for a strip position: hue rotates along the strip so
    /// the whole display shows a sliding slice of the wheel.
    #[must_use]
    pub fn rainbow(&self, strip_index: usize) -> RGB8 {
        hsv2rgb(Hsv {
            hue: self.hue.wrapping_add(strip_index as u8),
            sat: RAINBOW_SAT,
            val: RAINBOW_VAL,
        })
    }
}

/// Resolved foreground paint for one tick: either a solid color or a
/// snapshot of the rainbow cursor.
#[derive(Clone, Copy, Debug)]
pub enum Paint {
    /// Every pixel gets the same color.
    Solid(RGB8),
    /// Pixels sample the rainbow at their strip position.
    Rainbow(HueCursor),
}

impl Paint {
    /// Color for the pixel at `strip_index`.
    #[must_use]
    pub fn color_at(&self, strip_index: usize) -> RGB8 {
        match self {
            Self::Solid(color) => *color,
            Self::Rainbow(cursor) => cursor.rainbow(strip_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HueCursor, Paint};
    use smart_leds::RGB8;

    #[test]
    fn hue_steps_once_per_throttle_window() {
        let mut cursor = HueCursor::new();
        // At 20 Hz the counter must fill five times before the hue moves.
        for _ in 0..5 {
            cursor.advance(20);
            assert_eq!(cursor.hue(), 0);
        }
        cursor.advance(20);
        assert_eq!(cursor.hue(), 1);
    }

    #[test]
    fn hue_wraps_at_256() {
        let mut cursor = HueCursor::new();
        for _ in 0..256 * 6 {
            cursor.advance(20);
        }
        assert_eq!(cursor.hue(), 0);
    }

    #[test]
    fn rainbow_varies_along_the_strip() {
        let cursor = HueCursor::new();
        assert_ne!(cursor.rainbow(0), cursor.rainbow(64));
    }

    #[test]
    fn solid_paint_ignores_position() {
        let paint = Paint::Solid(RGB8::new(1, 2, 3));
        assert_eq!(paint.color_at(0), paint.color_at(127));
    }
}
