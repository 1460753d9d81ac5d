//! The compositor: one render tick turns the current intent and wall-clock
//! time into a finished [`PixelFrame`].
//!
//! A tick runs to completion in a fixed order - background, border,
//! foreground digits, warning overlay, brightness - with every layer
//! writing into the one shared buffer, so later layers win. Ticks are
//! throttled to the configured refresh ceiling; early calls are complete
//! no-ops that advance nothing.
//!
//! # Example
//!
//! ```
//! use embassy_time::Instant;
//! use pingpong_clock::config::BorderMode;
//! use pingpong_clock::{ClockDisplay, TimeOfDay};
//!
//! let mut display = ClockDisplay::new(0x5EED);
//! display.set_border_mode(BorderMode::Time);
//!
//! let time = TimeOfDay { hour: 13, minute: 45, second: 30 };
//! if let Some(frame) = display.render(Instant::from_millis(51), time) {
//!     // hand `frame` to the strip driver
//!     assert_eq!(frame.len(), 128);
//! }
//! ```

use embassy_time::{Duration, Instant};
use smart_leds::{RGB8, colors};

use crate::background::{FireworkPool, StormPool, TwinklePool, firepit, scrolling_rainbow, solid};
use crate::border;
use crate::color::{HueCursor, Paint};
use crate::config::{BgMode, BorderMode, DisplayConfig, FgMode, Severity};
use crate::digits;
use crate::frame::PixelFrame;
use crate::lattice::WARNING_ADDRESSES;
use crate::rng::FrameRng;

/// Default refresh ceiling, matching the strip driver's configuration.
pub const DEFAULT_REFRESH_RATE_HZ: u8 = 20;

/// Wall-clock reading consumed once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

/// The physical strip driver boundary.
///
/// The compositor never calls a sink itself: the hosting task takes the
/// frame returned by [`ClockDisplay::render`] and pushes it out, which
/// keeps the engine synchronous and testable without hardware.
pub trait DisplaySink {
    /// Transmit a finished frame to the LEDs.
    fn show(&mut self, frame: &PixelFrame);

    /// Blank the strip.
    fn clear(&mut self);

    /// Cap the physical refresh rate. Called once at startup.
    fn set_max_refresh_rate(&mut self, hz: u8);

    /// Scale all output brightness in the driver. Called once at startup.
    fn set_brightness(&mut self, scale: u8);

    /// Cap the power budget. Called once at startup.
    fn set_max_power(&mut self, volts: u8, milliamps: u16);
}

/// Owns the pixel buffer, the intent, and all animation state; renders one
/// frame per eligible tick.
pub struct ClockDisplay {
    frame: PixelFrame,
    config: DisplayConfig,
    hue: HueCursor,
    rng: FrameRng,
    twinkles: TwinklePool,
    storm: StormPool,
    fireworks: FireworkPool,
    cycle_counter: u16,
    refresh_rate_hz: u8,
    frame_interval: Duration,
    last_frame_at: Option<Instant>,
}

impl ClockDisplay {
    /// Create a display with the power-on intent and the default refresh
    /// ceiling. The seed drives the animation randomness; any value works,
    /// fixed seeds give reproducible effects.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        info!("clock display ready, refresh ceiling {} Hz", DEFAULT_REFRESH_RATE_HZ);
        Self {
            frame: PixelFrame::new(),
            config: DisplayConfig::new(),
            hue: HueCursor::new(),
            rng: FrameRng::new(seed),
            twinkles: TwinklePool::new(),
            storm: StormPool::new(),
            fireworks: FireworkPool::new(),
            cycle_counter: 0,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            frame_interval: Duration::from_millis(1000 / DEFAULT_REFRESH_RATE_HZ as u64),
            last_frame_at: None,
        }
    }

    /// The current intent.
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Mutable access to the intent, for hosts that own the display
    /// directly. Concurrent deployments should go through
    /// [`ConfigCell`](crate::ConfigCell) and [`apply_config`](Self::apply_config) instead.
    pub fn config_mut(&mut self) -> &mut DisplayConfig {
        &mut self.config
    }

    /// Replace the whole intent, typically with a
    /// [`ConfigCell::snapshot`](crate::ConfigCell::snapshot).
    pub fn apply_config(&mut self, config: DisplayConfig) {
        self.config = config;
    }

    /// Set the foreground mode and digit style.
    pub fn set_foreground_mode(&mut self, mode: FgMode, slanted: bool) {
        self.config.set_foreground_mode(mode, slanted);
    }

    /// Set the foreground color.
    pub fn set_foreground_color(&mut self, color: RGB8) {
        self.config.set_foreground_color(color);
    }

    /// Set the background mode.
    pub fn set_background_mode(&mut self, mode: BgMode) {
        self.config.set_background_mode(mode);
    }

    /// Set the background color.
    pub fn set_background_color(&mut self, color: RGB8) {
        self.config.set_background_color(color);
    }

    /// Set the border mode.
    pub fn set_border_mode(&mut self, mode: BorderMode) {
        self.config.set_border_mode(mode);
    }

    /// Set the border color.
    pub fn set_border_color(&mut self, color: RGB8) {
        self.config.set_border_color(color);
    }

    /// Record the status of one warning indicator.
    pub fn set_warning(&mut self, indicator: usize, status_ok: bool, level: u8) {
        self.config.set_warning(indicator, status_ok, level);
    }

    /// Set the output brightness scale (255 = full).
    pub fn set_brightness(&mut self, scale: u8) {
        self.config.set_brightness(scale);
    }

    /// Change the refresh ceiling and the matching minimum tick interval.
    pub fn set_max_refresh_rate(&mut self, hz: u8) {
        let hz = hz.max(1);
        debug!("refresh ceiling set to {} Hz", hz);
        self.refresh_rate_hz = hz;
        self.frame_interval = Duration::from_millis(1000 / hz as u64);
    }

    /// The most recently rendered frame.
    #[must_use]
    pub fn frame(&self) -> &PixelFrame {
        &self.frame
    }

    /// Current value of the cycle-mode counter.
    #[must_use]
    pub fn cycle_count(&self) -> u16 {
        self.cycle_counter
    }

    /// Run one render tick.
    ///
    /// Returns the finished frame, or `None` when the call arrives before
    /// the minimum inter-frame interval has elapsed - such calls leave the
    /// buffer and every piece of animation state untouched.
    pub fn render(&mut self, at: Instant, time: TimeOfDay) -> Option<&PixelFrame> {
        if let Some(last) = self.last_frame_at {
            if at.as_millis().saturating_sub(last.as_millis()) <= self.frame_interval.as_millis() {
                return None;
            }
        }
        self.last_frame_at = Some(at);

        // One consistent view of the intent for the whole tick.
        let config = self.config;

        let rainbow_active = matches!(config.background.mode, BgMode::ScrollingRainbow)
            || matches!(config.foreground.mode, FgMode::TimeRainbow | FgMode::Cycle);
        if rainbow_active {
            self.hue.advance(self.refresh_rate_hz);
        }

        match config.background.mode {
            BgMode::None => self.frame.clear(),
            BgMode::SolidColor => solid(&mut self.frame, config.background.color),
            BgMode::ScrollingRainbow => scrolling_rainbow(&mut self.frame, &self.hue),
            BgMode::Twinkle => {
                self.frame.clear();
                self.twinkles.step(&mut self.frame, &mut self.rng);
            }
            BgMode::Fireworks => {
                self.frame.clear();
                self.fireworks.step(&mut self.frame, &mut self.rng);
            }
            BgMode::Thunderstorm => {
                self.frame.clear();
                self.storm.step(&mut self.frame, &mut self.rng);
            }
            BgMode::Firepit => {
                self.frame.clear();
                firepit(&mut self.frame, &mut self.rng);
            }
        }

        match config.border.mode {
            BorderMode::None => {}
            BorderMode::SolidColor => border::draw_solid(&mut self.frame, config.border.color),
            BorderMode::Time => {
                border::draw_seconds_sweep(&mut self.frame, time.second, config.border.color);
            }
        }

        match config.foreground.mode {
            FgMode::None => {}
            FgMode::Time => digits::draw_time(
                &mut self.frame,
                Paint::Solid(config.foreground.color),
                time.hour,
                time.minute,
                time.second,
                config.foreground.style,
            ),
            FgMode::TimeRainbow => digits::draw_time(
                &mut self.frame,
                Paint::Rainbow(self.hue),
                time.hour,
                time.minute,
                time.second,
                config.foreground.style,
            ),
            FgMode::Cycle => {
                digits::draw_number(
                    &mut self.frame,
                    Paint::Rainbow(self.hue),
                    self.cycle_counter,
                    config.foreground.style,
                    true,
                );
                self.cycle_counter += 1;
                if self.cycle_counter >= 10_000 {
                    self.cycle_counter = 0;
                }
            }
        }

        // Warning indicators always win over whatever the layers below
        // wrote at their pixels.
        for (slot, severity) in WARNING_ADDRESSES.iter().zip(config.warnings) {
            match severity {
                Severity::None => {}
                Severity::Warning => self.frame.set(*slot, colors::DARK_ORANGE),
                Severity::Error => self.frame.set(*slot, colors::RED),
            }
        }

        self.frame.dim(config.brightness);

        Some(&self.frame)
    }
}
