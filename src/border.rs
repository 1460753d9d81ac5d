//! The decorative border around the panel: solid, or filled progressively
//! by the elapsed seconds like a minute-long sweep hand.

use smart_leds::RGB8;

use crate::frame::PixelFrame;
use crate::lattice::BORDER;

/// Paint the whole border path in `color`.
pub fn draw_solid(frame: &mut PixelFrame, color: RGB8) {
    for &entry in &BORDER {
        frame.set(entry as usize, color);
    }
}

/// Paint the first `seconds * len / 59` border pixels, producing a sweep
/// that completes once per minute.
///
/// The divisor is 59, not 60, so the sweep closes fractionally before the
/// minute rolls over; the clock has always done this and the full border
/// lands exactly on second 59.
pub fn draw_seconds_sweep(frame: &mut PixelFrame, seconds: u8, color: RGB8) {
    let length = BORDER.len() as u32;
    let filled = (seconds as u32 * length / 59).min(length) as usize;
    for &entry in &BORDER[..filled] {
        frame.set(entry as usize, color);
    }
}

#[cfg(test)]
mod tests {
    use super::{BORDER, PixelFrame, draw_seconds_sweep, draw_solid};
    use smart_leds::{RGB8, colors};

    fn lit_count(frame: &PixelFrame) -> usize {
        frame.iter().filter(|led| **led != RGB8::new(0, 0, 0)).count()
    }

    #[test]
    fn solid_covers_the_whole_path() {
        let mut frame = PixelFrame::new();
        draw_solid(&mut frame, colors::DARK_ORANGE);
        assert_eq!(lit_count(&frame), BORDER.len());
    }

    #[test]
    fn sweep_is_empty_at_second_zero() {
        let mut frame = PixelFrame::new();
        draw_seconds_sweep(&mut frame, 0, colors::DARK_ORANGE);
        assert_eq!(lit_count(&frame), 0);
    }

    #[test]
    fn sweep_is_full_at_second_fifty_nine() {
        let mut frame = PixelFrame::new();
        draw_seconds_sweep(&mut frame, 59, colors::DARK_ORANGE);
        assert_eq!(lit_count(&frame), BORDER.len());
    }

    #[test]
    fn sweep_is_monotonic_over_the_minute() {
        let mut previous = 0;
        for seconds in 0..60 {
            let mut frame = PixelFrame::new();
            draw_seconds_sweep(&mut frame, seconds, colors::DARK_ORANGE);
            let filled = lit_count(&frame);
            assert!(filled >= previous, "sweep shrank at second {seconds}");
            previous = filled;
        }
    }
}
