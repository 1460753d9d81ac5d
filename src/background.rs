//! The six background animations.
//!
//! Twinkle, thunderstorm, and fireworks each own a fixed-size pool of
//! particle slots; a free slot may be claimed with a bounded probability
//! each frame, advances through its staged lifecycle once per frame, and is
//! released when the stage runs out. Pool exhaustion just skips the spawn -
//! bounded pools are the backpressure. Every lattice write goes through
//! [`lattice::strip_index`], so coordinate arithmetic that wanders off the
//! sparse panel edge drops silently.

use smart_leds::hsv::{Hsv, hsv2rgb};
use smart_leds::{RGB8, colors};

use crate::color::HueCursor;
use crate::frame::PixelFrame;
use crate::lattice::{self, COLS, LED_COUNT};
use crate::rng::FrameRng;

/// Maximum concurrently active twinkles.
pub const MAX_TWINKLES: usize = 8;
/// Maximum concurrently active raindrops.
pub const MAX_RAINDROPS: usize = 16;
/// Maximum concurrently active firework shells.
pub const MAX_FIREWORKS: usize = 5;

const HUE_BLUE: u8 = 160;

fn lit(frame: &mut PixelFrame, row: i32, col: i32, color: RGB8) {
    if let Some(index) = lattice::strip_index(row, col) {
        frame.set(index, color);
    }
}

/// Fill the whole strip with one color.
pub fn solid(frame: &mut PixelFrame, color: RGB8) {
    frame.fill(color);
}

/// Fill the strip with a sliding slice of the rainbow.
pub fn scrolling_rainbow(frame: &mut PixelFrame, hue: &HueCursor) {
    for index in 0..LED_COUNT {
        frame.set(index, hue.rainbow(index));
    }
}

/// Stateless flicker over the bottom four lattice rows: red-orange hues
/// with a brightness band that dims one notch per row above the embers.
pub fn firepit(frame: &mut PixelFrame, rng: &mut FrameRng) {
    for row in (3..=6).rev() {
        let dimming = (6 - row) as u8 * 64;
        for col in 0..COLS as i32 {
            if let Some(index) = lattice::strip_index(row, col) {
                let hue = rng.range_u8(0, 8);
                let val = rng.range_u8(192 - dimming, 255 - dimming);
                frame.set(index, hsv2rgb(Hsv { hue, sat: 255, val }));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Twinkle
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct Twinkle {
    pos: usize,
    /// 16 at spawn, counting down to release; brightness is `8 * stage`.
    stage: u8,
}

/// Bounded pool of white twinkles fading out over sixteen frames.
#[derive(Clone, Debug, Default)]
pub struct TwinklePool {
    slots: [Option<Twinkle>; MAX_TWINKLES],
}

impl TwinklePool {
    /// An empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_TWINKLES],
        }
    }

    /// Number of active twinkles.
    #[must_use]
    pub fn active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Maybe spawn, then advance and draw every active twinkle.
    pub fn step(&mut self, frame: &mut PixelFrame, rng: &mut FrameRng) {
        if rng.chance(96) {
            let pos = rng.index(LED_COUNT);
            if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
                *slot = Some(Twinkle { pos, stage: 16 });
            }
        }

        for slot in &mut self.slots {
            if let Some(twinkle) = slot {
                let brightness = 8 * twinkle.stage;
                frame.set(
                    twinkle.pos,
                    RGB8::new(brightness, brightness, brightness),
                );
                twinkle.stage -= 1;
                if twinkle.stage == 0 {
                    *slot = None;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Thunderstorm
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct Raindrop {
    /// Current column; starts at the spawn column in the top row.
    col: i32,
    /// 1 at spawn; rain descends one row per stage, freed after stage 6.
    stage: u8,
    lightning: bool,
    /// Strip indices of the bolt, indexed by descent row - 1. Cells whose
    /// jagged path left the lattice stay `None` and are skipped on hold
    /// and clear.
    path: [Option<usize>; 6],
}

/// Bounded pool of raindrops, a few of which strike as lightning.
#[derive(Clone, Debug, Default)]
pub struct StormPool {
    drops: [Option<Raindrop>; MAX_RAINDROPS],
}

impl StormPool {
    /// An empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drops: [None; MAX_RAINDROPS],
        }
    }

    /// Number of active drops.
    #[must_use]
    pub fn active(&self) -> usize {
        self.drops.iter().filter(|slot| slot.is_some()).count()
    }

    /// Draw the static sky, maybe spawn, then advance every drop.
    pub fn step(&mut self, frame: &mut PixelFrame, rng: &mut FrameRng) {
        for col in 3..COLS as i32 {
            lit(frame, 0, col, colors::GRAY);
        }
        for col in 2..COLS as i32 {
            let val = rng.range_u8(64, 128);
            lit(frame, 1, col, hsv2rgb(Hsv { hue: 0, sat: 0, val }));
        }

        if rng.chance(200) {
            let col = rng.range_u8(3, 21) as i32;
            let lightning = rng.range_u8(0, 20) == 19;
            if let Some(slot) = self.drops.iter_mut().find(|slot| slot.is_none()) {
                *slot = Some(Raindrop {
                    col,
                    stage: 1,
                    lightning,
                    path: [None; 6],
                });
            }
        }

        for slot in &mut self.drops {
            let Some(raindrop) = slot else { continue };

            if raindrop.lightning && raindrop.stage == 1 {
                // Strike: light the whole jagged path at once.
                let mut col = raindrop.col;
                for row in 1..=6 {
                    col -= rng.range_u8(0, 2) as i32;
                    if !(0..COLS as i32).contains(&col) {
                        col = 0;
                    }
                    if let Some(index) = lattice::strip_index(row, col) {
                        frame.set(index, colors::YELLOW);
                        raindrop.path[row as usize - 1] = Some(index);
                    }
                }
            } else if raindrop.lightning && raindrop.stage < 7 {
                // Hold the flash.
                for index in raindrop.path.into_iter().flatten() {
                    frame.set(index, colors::YELLOW);
                }
            } else {
                // Rain: one row down, drifting at most one column left.
                let mut col = raindrop.col - rng.range_u8(0, 2) as i32;
                if !(0..COLS as i32).contains(&col) {
                    col = 0;
                }
                raindrop.col = col;
                match lattice::strip_index(raindrop.stage as i32, col) {
                    Some(index) => frame.set(
                        index,
                        hsv2rgb(Hsv {
                            hue: HUE_BLUE,
                            sat: 255,
                            val: 128,
                        }),
                    ),
                    // Fell off the panel; finish next increment.
                    None => raindrop.stage = 6,
                }
            }

            raindrop.stage += 1;
            if raindrop.stage == 7 {
                if raindrop.lightning {
                    for index in raindrop.path.into_iter().flatten() {
                        frame.set(index, colors::BLACK);
                    }
                }
                *slot = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fireworks
// ---------------------------------------------------------------------------

/// Stage a shell starts at; the whole choreography takes this many frames.
pub const FIREWORK_START_STAGE: u8 = 24;

#[derive(Clone, Copy, Debug)]
struct Firework {
    /// Launch column in the bottom row.
    pos: i32,
    /// 0 = drifting left, 1 = drifting right.
    direction: i32,
    stage: u8,
    hue: u8,
    /// Sometimes the detonation sits one row lower.
    height_offset: i32,
}

/// Bounded pool of firework shells playing a fixed stage choreography:
/// rising white trail, six-point detonation, expanding ring, fade-out.
#[derive(Clone, Debug, Default)]
pub struct FireworkPool {
    shells: [Option<Firework>; MAX_FIREWORKS],
}

impl FireworkPool {
    /// An empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shells: [None; MAX_FIREWORKS],
        }
    }

    /// Number of active shells.
    #[must_use]
    pub fn active(&self) -> usize {
        self.shells.iter().filter(|slot| slot.is_some()).count()
    }

    /// Maybe spawn, then advance and draw every active shell.
    pub fn step(&mut self, frame: &mut PixelFrame, rng: &mut FrameRng) {
        if rng.chance(24) {
            let pos = rng.range_u8(3, 14) as i32;
            let direction = rng.range_u8(0, 2) as i32;
            let hue = rng.next_u8();
            let height_offset = rng.range_u8(0, 2) as i32;
            if let Some(slot) = self.shells.iter_mut().find(|slot| slot.is_none()) {
                *slot = Some(Firework {
                    pos,
                    direction,
                    stage: FIREWORK_START_STAGE,
                    hue,
                    height_offset,
                });
            }
        }

        for slot in &mut self.shells {
            let Some(shell) = slot else { continue };
            // Where the detonation ends up.
            let y = 2 + shell.height_offset;
            let x = shell.pos + 4 * shell.direction;
            let flash = hsv2rgb(Hsv {
                hue: shell.hue,
                sat: 255,
                val: 255,
            });

            if shell.stage == FIREWORK_START_STAGE {
                lit(frame, 6, shell.pos, colors::WHITE);
            } else if shell.stage as i32 >= 20 + shell.height_offset {
                // Rising trail, erasing the previous segment behind it.
                let level = 6 - (FIREWORK_START_STAGE - shell.stage) as i32;
                lit(
                    frame,
                    level,
                    shell.pos + (6 - level) * shell.direction,
                    colors::WHITE,
                );
                lit(
                    frame,
                    level + 1,
                    shell.pos + (6 - level + 1) * shell.direction,
                    colors::BLACK,
                );
            } else if shell.stage == 18 || shell.stage == 17 {
                // Detonate in six directions.
                lit(frame, y, x, colors::BLACK);
                lit(frame, y - 1, x + 1, flash);
                lit(frame, y, x + 1, flash);
                lit(frame, y + 1, x, flash);
                lit(frame, y + 1, x - 1, flash);
                lit(frame, y, x - 1, flash);
                lit(frame, y - 1, x, flash);
            } else if shell.stage == 16 {
                // Ring expands: clear the inner star, light the outer one.
                lit(frame, y, x, colors::BLACK);
                lit(frame, y - 1, x + 1, colors::BLACK);
                lit(frame, y, x + 1, colors::BLACK);
                lit(frame, y + 1, x, colors::BLACK);
                lit(frame, y + 1, x - 1, colors::BLACK);
                lit(frame, y, x - 1, colors::BLACK);
                lit(frame, y - 1, x, colors::BLACK);

                lit(frame, y - 2, x + 2, flash);
                lit(frame, y, x + 2, flash);
                lit(frame, y + 2, x, flash);
                lit(frame, y + 2, x - 2, flash);
                lit(frame, y, x - 2, flash);
                lit(frame, y - 2, x, flash);
            } else {
                // Outer ring fades with the stage. The multiply wraps at
                // u8 on purpose: it matches the dim pre-flash frames the
                // clock has always shown at stages 19 and 20.
                let fade = hsv2rgb(Hsv {
                    hue: shell.hue,
                    sat: 255,
                    val: (16 * shell.stage as u16) as u8,
                });
                lit(frame, y - 2, x + 2, fade);
                lit(frame, y, x + 2, fade);
                lit(frame, y + 2, x, fade);
                lit(frame, y + 2, x - 2, fade);
                lit(frame, y, x - 2, fade);
                lit(frame, y - 2, x, fade);
            }

            shell.stage -= 1;
            if shell.stage == 0 {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FIREWORK_START_STAGE, Firework, FireworkPool, MAX_RAINDROPS, MAX_TWINKLES, Raindrop,
        StormPool, Twinkle, TwinklePool, firepit,
    };
    use crate::frame::PixelFrame;
    use crate::lattice;
    use crate::rng::FrameRng;
    use smart_leds::RGB8;

    const BLACK: RGB8 = RGB8::new(0, 0, 0);

    // Filling every slot keeps the spawn roll from claiming one mid-test,
    // so the staged lifecycles below play out deterministically.

    #[test]
    fn twinkle_brightness_strictly_decreases_until_release() {
        let mut pool = TwinklePool::new();
        for (i, slot) in pool.slots.iter_mut().enumerate() {
            *slot = Some(Twinkle { pos: i * 16, stage: 16 });
        }
        let mut rng = FrameRng::new(123);
        let mut previous = u16::MAX;
        for _ in 0..16 {
            let mut frame = PixelFrame::new();
            pool.step(&mut frame, &mut rng);
            let brightness = frame[0].r as u16;
            assert!(brightness < previous);
            previous = brightness;
        }
        assert_eq!(pool.slots[0].map(|t| t.pos), None);
    }

    #[test]
    fn twinkle_slot_is_reusable_right_after_release() {
        let mut pool = TwinklePool::new();
        pool.slots[0] = Some(Twinkle { pos: 40, stage: 1 });
        let mut frame = PixelFrame::new();
        // The freed slot may be reclaimed by later spawns; capacity never
        // exceeds the pool either way.
        let mut rng = FrameRng::new(1);
        pool.step(&mut frame, &mut rng);
        for _ in 0..64 {
            pool.step(&mut frame, &mut rng);
            assert!(pool.active() <= MAX_TWINKLES);
        }
    }

    #[test]
    fn twinkle_pool_never_exceeds_capacity() {
        let mut pool = TwinklePool::new();
        let mut rng = FrameRng::new(5);
        let mut frame = PixelFrame::new();
        for _ in 0..200 {
            frame.clear();
            pool.step(&mut frame, &mut rng);
            assert!(pool.active() <= MAX_TWINKLES);
        }
    }

    #[test]
    fn raindrops_release_after_the_bottom_row() {
        let mut pool = StormPool::new();
        for (i, slot) in pool.drops.iter_mut().enumerate() {
            *slot = Some(Raindrop {
                // Columns whose drifted paths stay on the panel all the way
                // down, so no drop finishes early.
                col: 3 + (i as i32 % 14),
                stage: 1,
                lightning: false,
                path: [None; 6],
            });
        }
        let mut rng = FrameRng::new(77);
        for _ in 0..5 {
            let mut frame = PixelFrame::new();
            pool.step(&mut frame, &mut rng);
        }
        assert_eq!(pool.active(), MAX_RAINDROPS, "drops still descending");
        let mut frame = PixelFrame::new();
        pool.step(&mut frame, &mut rng);
        assert_eq!(pool.active(), 0, "all drops must release after row 6");
    }

    #[test]
    fn lightning_clears_its_whole_path_on_release() {
        let mut pool = StormPool::new();
        for slot in &mut pool.drops {
            *slot = Some(Raindrop {
                col: 12,
                stage: 1,
                lightning: true,
                path: [None; 6],
            });
        }
        let mut rng = FrameRng::new(3);
        let mut frame = PixelFrame::new();
        pool.step(&mut frame, &mut rng);
        let paths: Vec<[Option<usize>; 6]> = pool
            .drops
            .iter()
            .map(|slot| slot.expect("bolt holds through its stages").path)
            .collect();
        assert!(paths[0].iter().all(Option::is_some));

        // Hold stages, then the release frame blacks the bolts out.
        for _ in 0..5 {
            frame.clear();
            pool.step(&mut frame, &mut rng);
        }
        assert_eq!(pool.active(), 0);
        for index in paths.into_iter().flatten().flatten() {
            assert_eq!(frame[index], BLACK, "bolt pixel {index} not cleared");
        }
    }

    #[test]
    fn firework_finishes_in_exactly_start_stage_frames() {
        let mut pool = FireworkPool::new();
        for (i, slot) in pool.shells.iter_mut().enumerate() {
            *slot = Some(Firework {
                pos: 3 + 2 * i as i32,
                direction: (i % 2) as i32,
                stage: FIREWORK_START_STAGE,
                hue: 33,
                height_offset: (i % 2) as i32,
            });
        }
        let mut rng = FrameRng::new(2);
        let mut frame = PixelFrame::new();

        pool.step(&mut frame, &mut rng);
        let launch = lattice::strip_index(6, 3).expect("launch cell exists");
        assert_eq!(frame[launch], RGB8::new(255, 255, 255));

        let mut frames = 1;
        while pool.shells[0].is_some() {
            frame.clear();
            pool.step(&mut frame, &mut rng);
            frames += 1;
            assert!(frames <= FIREWORK_START_STAGE as usize);
        }
        assert_eq!(frames, FIREWORK_START_STAGE as usize);
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn firepit_only_touches_the_bottom_rows() {
        let mut frame = PixelFrame::new();
        let mut rng = FrameRng::new(11);
        firepit(&mut frame, &mut rng);
        for row in 0..3 {
            for col in 0..20 {
                if let Some(index) = lattice::strip_index(row, col) {
                    assert_eq!(frame[index], BLACK);
                }
            }
        }
        // The dimmest band starts at zero brightness, so a few cells may
        // round to black; the floor stays well below the 74 ember cells.
        let lit = frame.iter().filter(|led| **led != BLACK).count();
        assert!(lit >= 50, "embers should cover the bottom rows, lit {lit}");
    }
}
