//! The shared pixel buffer every layer renders into.

use core::ops::{Deref, DerefMut};

use smart_leds::RGB8;

use crate::lattice::LED_COUNT;

/// One frame of color values for the 128-LED strip, index = physical strip
/// position.
///
/// All sub-renderers write through [`set`](Self::set), which silently drops
/// any index outside the strip - the lattice is sparse and edge arithmetic
/// in the animations is allowed to wander off it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFrame([RGB8; LED_COUNT]);

impl PixelFrame {
    /// Number of LEDs in a frame.
    pub const LEN: usize = LED_COUNT;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([RGB8::new(0, 0, 0); LED_COUNT])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([color; LED_COUNT])
    }

    /// Write `color` at `index`; indices outside the strip are dropped.
    pub fn set(&mut self, index: usize, color: RGB8) {
        if let Some(led) = self.0.get_mut(index) {
            *led = color;
        }
    }

    /// Set every LED to black.
    pub fn clear(&mut self) {
        self.fill(RGB8::new(0, 0, 0));
    }

    /// Set every LED to `color`.
    pub fn fill(&mut self, color: RGB8) {
        self.0 = [color; LED_COUNT];
    }

    /// Scale every channel by `scale` (255 = unchanged), the same 8-bit
    /// scaling the strip drivers apply on the wire.
    pub fn dim(&mut self, scale: u8) {
        if scale == u8::MAX {
            return;
        }
        let scale = scale as u16 + 1;
        for led in &mut self.0 {
            led.r = ((led.r as u16 * scale) >> 8) as u8;
            led.g = ((led.g as u16 * scale) >> 8) as u8;
            led.b = ((led.b as u16 * scale) >> 8) as u8;
        }
    }
}

impl Deref for PixelFrame {
    type Target = [RGB8; LED_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PixelFrame {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<PixelFrame> for [RGB8; LED_COUNT] {
    fn from(frame: PixelFrame) -> Self {
        frame.0
    }
}

impl Default for PixelFrame {
    fn default() -> Self {
        Self::new()
    }
}
