//! Digit glyphs and the foreground renderers that place them.
//!
//! A glyph is the list of strip offsets to light for one digit, relative to
//! a digit slot's base offset. There are two fonts: upright digits that
//! stand against the panel's slant, and slanted digits that follow it. The
//! slanted font is referenced one slot to the right because not all of its
//! digits fit at the leftmost position; drawing subtracts that slot again
//! and applies a one-LED correction close to the start of the strip, where
//! the wiring bends.

use crate::color::Paint;
use crate::config::DigitStyle;
use crate::frame::PixelFrame;
use crate::lattice::LED_COUNT;

/// Slot base offsets for the four time digits (10h, 1h, 10min, 1min).
pub const TIME_SLOTS: [i32; 4] = [0, 28, 70, 98];

/// Slot base offsets for the four digits of the cycle counter.
pub const NUMBER_SLOTS: [i32; 4] = [14, 42, 70, 98];

/// Separator pixel between the hour and minute pair (upper dot).
pub const SEPARATOR_UPPER: usize = 66;
/// Lower separator dot for upright digits.
pub const SEPARATOR_LOWER_UPRIGHT: usize = 64;
/// Lower separator dot for slanted digits.
pub const SEPARATOR_LOWER_SLANTED: usize = 59;

const UPRIGHT: [&[u8]; 10] = [
    &[7, 8, 10, 11, 14, 18, 22, 24],
    &[14, 15, 16, 17, 18],
    &[7, 8, 9, 11, 14, 16, 18, 24],
    &[7, 9, 11, 14, 16, 18, 22, 24],
    &[9, 10, 11, 16, 18, 22, 24],
    &[7, 9, 10, 11, 14, 16, 18, 22],
    &[7, 8, 9, 14, 15, 16, 18, 22],
    &[7, 11, 14, 16, 17, 24],
    &[7, 8, 9, 10, 11, 14, 16, 18, 22, 24],
    &[7, 9, 10, 11, 14, 16, 17, 24],
];

const SLANTED: [&[u8]; 10] = [
    &[39, 42, 53, 52, 44, 45, 35, 32, 21, 31, 30, 38],
    &[35, 45, 44, 52, 53],
    &[39, 42, 53, 52, 44, 37, 30, 31, 21, 32, 35],
    &[39, 42, 53, 52, 44, 37, 30, 45, 35, 32, 21],
    &[39, 38, 30, 37, 44, 52, 53, 45, 35],
    &[53, 42, 39, 38, 30, 37, 44, 45, 35, 32, 21],
    &[53, 42, 39, 38, 30, 37, 44, 45, 35, 32, 21, 31],
    &[39, 42, 53, 52, 44, 45, 35, 38],
    &[53, 42, 39, 38, 30, 37, 44, 45, 35, 32, 21, 31, 52],
    &[53, 42, 39, 38, 30, 37, 44, 45, 35, 32, 21, 52],
];

/// The glyph for `digit` in `style`: strip offsets relative to a slot base.
/// Digits above 9 have no glyph and resolve to the empty slice.
#[must_use]
pub fn glyph(digit: u8, style: DigitStyle) -> &'static [u8] {
    let table = match style {
        DigitStyle::Upright => &UPRIGHT,
        DigitStyle::Slanted => &SLANTED,
    };
    table.get(digit as usize).copied().unwrap_or(&[])
}

/// Draw one digit at the slot starting at `offset`. Every resolved strip
/// index outside the strip is dropped.
pub fn draw_digit(frame: &mut PixelFrame, paint: Paint, digit: u8, offset: i32, style: DigitStyle) {
    match style {
        DigitStyle::Upright => {
            for &entry in glyph(digit, style) {
                let index = entry as i32 + offset;
                if (0..LED_COUNT as i32).contains(&index) {
                    frame.set(index as usize, paint.color_at(index as usize));
                }
            }
        }
        DigitStyle::Slanted => {
            for &entry in glyph(digit, style) {
                let mut index = entry as i32 + offset - 28;
                if index < 7 {
                    // adjust when LEDs really close to the start of the strip
                    index += 1;
                }
                if (0..LED_COUNT as i32).contains(&index) {
                    frame.set(index as usize, paint.color_at(index as usize));
                }
            }
        }
    }
}

/// Draw the time as four digits plus the blinking separator dots.
///
/// The separator is lit on even seconds, giving a 1 Hz blink.
pub fn draw_time(
    frame: &mut PixelFrame,
    paint: Paint,
    hour: u8,
    minute: u8,
    second: u8,
    style: DigitStyle,
) {
    draw_digit(frame, paint, hour / 10, TIME_SLOTS[0], style);
    draw_digit(frame, paint, hour % 10, TIME_SLOTS[1], style);
    draw_digit(frame, paint, minute / 10, TIME_SLOTS[2], style);
    draw_digit(frame, paint, minute % 10, TIME_SLOTS[3], style);

    if second % 2 == 0 {
        frame.set(SEPARATOR_UPPER, paint.color_at(SEPARATOR_UPPER));
        let lower = match style {
            DigitStyle::Upright => SEPARATOR_LOWER_UPRIGHT,
            DigitStyle::Slanted => SEPARATOR_LOWER_SLANTED,
        };
        frame.set(lower, paint.color_at(lower));
    }
}

/// Draw a 0-9999 value. With `suppress_leading_zeros`, values below
/// 1000/100/10 omit the thousands/hundreds/tens digit respectively - a
/// display policy, not rounding.
pub fn draw_number(
    frame: &mut PixelFrame,
    paint: Paint,
    value: u16,
    style: DigitStyle,
    suppress_leading_zeros: bool,
) {
    if value >= 1000 || !suppress_leading_zeros {
        draw_digit(frame, paint, ((value / 1000) % 10) as u8, NUMBER_SLOTS[0], style);
    }
    if value >= 100 || !suppress_leading_zeros {
        draw_digit(frame, paint, ((value / 100) % 10) as u8, NUMBER_SLOTS[1], style);
    }
    if value >= 10 || !suppress_leading_zeros {
        draw_digit(frame, paint, ((value / 10) % 10) as u8, NUMBER_SLOTS[2], style);
    }
    draw_digit(frame, paint, (value % 10) as u8, NUMBER_SLOTS[3], style);
}

#[cfg(test)]
mod tests {
    use super::{Paint, PixelFrame, draw_digit, draw_number, glyph};
    use crate::config::DigitStyle;
    use smart_leds::{RGB8, colors};

    fn lit(frame: &PixelFrame) -> impl Iterator<Item = usize> + '_ {
        frame
            .iter()
            .enumerate()
            .filter(|(_, led)| **led != RGB8::new(0, 0, 0))
            .map(|(index, _)| index)
    }

    #[test]
    fn upright_one_lights_its_glyph_at_slot_zero() {
        let mut frame = PixelFrame::new();
        draw_digit(&mut frame, Paint::Solid(colors::WHITE), 1, 0, DigitStyle::Upright);
        let lit: Vec<usize> = lit(&frame).collect();
        assert_eq!(lit, [14, 15, 16, 17, 18]);
    }

    #[test]
    fn slant_correction_shifts_near_origin_pixels() {
        // Slanted '2' at the leftmost slot reaches offsets below 7, which
        // the wiring shifts by one: 30-28=2 lights LED 3, not LED 2.
        let mut frame = PixelFrame::new();
        draw_digit(&mut frame, Paint::Solid(colors::WHITE), 2, 0, DigitStyle::Slanted);
        assert_eq!(frame[3], colors::WHITE);
        assert_eq!(frame[2], RGB8::new(0, 0, 0));
    }

    #[test]
    fn slanted_glyphs_off_the_strip_start_are_dropped() {
        // Slanted '0' at slot 0 resolves entry 21 to -7; nothing may land
        // on an arbitrary pixel as a result.
        let mut frame = PixelFrame::new();
        draw_digit(&mut frame, Paint::Solid(colors::WHITE), 0, 0, DigitStyle::Slanted);
        assert_eq!(lit(&frame).count(), glyph(0, DigitStyle::Slanted).len() - 1);
    }

    #[test]
    fn digit_above_nine_draws_nothing() {
        let mut frame = PixelFrame::new();
        draw_digit(&mut frame, Paint::Solid(colors::WHITE), 10, 0, DigitStyle::Upright);
        assert_eq!(lit(&frame).count(), 0);
    }

    #[test]
    fn leading_zeros_are_hidden() {
        let mut frame = PixelFrame::new();
        draw_number(&mut frame, Paint::Solid(colors::WHITE), 7, DigitStyle::Upright, true);
        let expected: Vec<usize> = glyph(7, DigitStyle::Upright)
            .iter()
            .map(|&entry| entry as usize + 98)
            .collect();
        let lit: Vec<usize> = lit(&frame).collect();
        assert_eq!(lit, expected);
    }

    #[test]
    fn leading_zeros_can_be_kept() {
        let mut frame = PixelFrame::new();
        draw_number(&mut frame, Paint::Solid(colors::WHITE), 7, DigitStyle::Upright, false);
        let zero = glyph(0, DigitStyle::Upright).len();
        let seven = glyph(7, DigitStyle::Upright).len();
        assert_eq!(lit(&frame).count(), 3 * zero + seven);
    }

    #[test]
    fn glyph_tables_have_ten_digits_each() {
        for digit in 0..10 {
            assert!(!glyph(digit, DigitStyle::Upright).is_empty());
            assert!(!glyph(digit, DigitStyle::Slanted).is_empty());
        }
    }
}
