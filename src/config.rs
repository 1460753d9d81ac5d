//! Display intent: what the clock should be showing, as set by the control
//! plane (serial commands, MQTT, buttons - all outside this crate).
//!
//! [`DisplayConfig`] is a plain value with synchronous setters. When the
//! control plane runs concurrently with the render tick (the usual setup on
//! device: one task polling the network, one task driving the strip), wrap
//! it in a [`ConfigCell`] - the render tick then takes one consistent
//! [`snapshot`](ConfigCell::snapshot) per frame instead of reading fields
//! that may be mutated mid-tick.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use smart_leds::{RGB8, colors};

/// How digits are drawn on the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitStyle {
    /// Digits standing upright against the slant of the panel.
    #[default]
    Upright,
    /// Digits following the panel's slant.
    Slanted,
}

/// Foreground layer mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FgMode {
    /// No foreground (the time does not show).
    None,
    /// Time in the configured solid color.
    #[default]
    Time,
    /// Time painted from the rotating rainbow.
    TimeRainbow,
    /// Diagnostic mode cycling a counter through all digits.
    Cycle,
}

/// Background layer mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BgMode {
    /// Black background.
    None,
    /// One solid color.
    #[default]
    SolidColor,
    /// Scrolling rainbow across the whole strip.
    ScrollingRainbow,
    /// White twinkles fading in and out.
    Twinkle,
    /// Rising shells detonating into six-point stars.
    Fireworks,
    /// Rain drifting down the lattice with occasional lightning.
    Thunderstorm,
    /// Red-orange flicker over the bottom rows.
    Firepit,
}

/// Border layer mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BorderMode {
    /// No border.
    #[default]
    None,
    /// Full border in one color.
    SolidColor,
    /// Border fills with elapsed seconds, like a seconds hand.
    Time,
}

/// Severity of one warning indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Indicator off.
    #[default]
    None,
    /// Orange.
    Warning,
    /// Red.
    Error,
}

impl Severity {
    /// Map a raw control-plane level to a severity; unknown levels render
    /// as nothing.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            1 => Self::Warning,
            2 => Self::Error,
            _ => Self::None,
        }
    }
}

/// Foreground intent: mode, solid color, digit style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Foreground {
    /// Active mode.
    pub mode: FgMode,
    /// Color used by the solid-color modes.
    pub color: RGB8,
    /// Digit style for time and cycle rendering.
    pub style: DigitStyle,
}

/// Background intent: mode and solid color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Background {
    /// Active mode.
    pub mode: BgMode,
    /// Color used by [`BgMode::SolidColor`].
    pub color: RGB8,
}

/// Border intent: mode and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Border {
    /// Active mode.
    pub mode: BorderMode,
    /// Color used by both border modes.
    pub color: RGB8,
}

/// The complete display intent read by the compositor each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Foreground (digits) layer.
    pub foreground: Foreground,
    /// Background (animation) layer.
    pub background: Background,
    /// Border layer.
    pub border: Border,
    /// The four warning indicators.
    pub warnings: [Severity; 4],
    /// Output brightness scale, 255 = full.
    pub brightness: u8,
}

impl DisplayConfig {
    /// Power-on intent: white upright time over a dark blue background, no
    /// border, indicators off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            foreground: Foreground {
                mode: FgMode::Time,
                color: colors::SNOW,
                style: DigitStyle::Upright,
            },
            background: Background {
                mode: BgMode::SolidColor,
                color: colors::DARK_BLUE,
            },
            border: Border {
                mode: BorderMode::None,
                color: colors::DARK_ORANGE,
            },
            warnings: [Severity::None; 4],
            brightness: u8::MAX,
        }
    }

    /// Set the foreground mode and digit style.
    pub fn set_foreground_mode(&mut self, mode: FgMode, slanted: bool) {
        self.foreground.mode = mode;
        self.foreground.style = if slanted {
            DigitStyle::Slanted
        } else {
            DigitStyle::Upright
        };
    }

    /// Set the foreground color.
    pub fn set_foreground_color(&mut self, color: RGB8) {
        self.foreground.color = color;
    }

    /// Set the background mode.
    pub fn set_background_mode(&mut self, mode: BgMode) {
        self.background.mode = mode;
    }

    /// Set the background color.
    pub fn set_background_color(&mut self, color: RGB8) {
        self.background.color = color;
    }

    /// Set the border mode.
    pub fn set_border_mode(&mut self, mode: BorderMode) {
        self.border.mode = mode;
    }

    /// Set the border color.
    pub fn set_border_color(&mut self, color: RGB8) {
        self.border.color = color;
    }

    /// Record the status of one of the four warning indicators.
    ///
    /// A failing status stores `level` (1 = warning, 2 = error); an ok
    /// status clears the indicator. Out-of-range indicators are ignored.
    pub fn set_warning(&mut self, indicator: usize, status_ok: bool, level: u8) {
        if let Some(slot) = self.warnings.get_mut(indicator) {
            *slot = if status_ok {
                Severity::None
            } else {
                Severity::from_level(level)
            };
        }
    }

    /// Set the output brightness scale (255 = full).
    pub fn set_brightness(&mut self, scale: u8) {
        self.brightness = scale;
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared intent cell for split control-plane / render-tick deployments.
///
/// Setters mirror [`DisplayConfig`]; each one takes the critical section
/// briefly. The render task calls [`snapshot`](Self::snapshot) once per
/// tick and derives the whole frame from that copy, so a concurrent setter
/// can never tear a half-updated intent across layers.
pub struct ConfigCell {
    inner: Mutex<CriticalSectionRawMutex, RefCell<DisplayConfig>>,
}

impl ConfigCell {
    /// A cell holding the power-on intent. `const`, so it can live in a
    /// `static` shared between tasks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(DisplayConfig::new())),
        }
    }

    /// Copy out the current intent.
    #[must_use]
    pub fn snapshot(&self) -> DisplayConfig {
        self.inner.lock(|config| *config.borrow())
    }

    /// Mutate the intent under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut DisplayConfig) -> R) -> R {
        self.inner.lock(|config| f(&mut config.borrow_mut()))
    }

    /// See [`DisplayConfig::set_foreground_mode`].
    pub fn set_foreground_mode(&self, mode: FgMode, slanted: bool) {
        self.with(|config| config.set_foreground_mode(mode, slanted));
    }

    /// See [`DisplayConfig::set_foreground_color`].
    pub fn set_foreground_color(&self, color: RGB8) {
        self.with(|config| config.set_foreground_color(color));
    }

    /// See [`DisplayConfig::set_background_mode`].
    pub fn set_background_mode(&self, mode: BgMode) {
        self.with(|config| config.set_background_mode(mode));
    }

    /// See [`DisplayConfig::set_background_color`].
    pub fn set_background_color(&self, color: RGB8) {
        self.with(|config| config.set_background_color(color));
    }

    /// See [`DisplayConfig::set_border_mode`].
    pub fn set_border_mode(&self, mode: BorderMode) {
        self.with(|config| config.set_border_mode(mode));
    }

    /// See [`DisplayConfig::set_border_color`].
    pub fn set_border_color(&self, color: RGB8) {
        self.with(|config| config.set_border_color(color));
    }

    /// See [`DisplayConfig::set_warning`].
    pub fn set_warning(&self, indicator: usize, status_ok: bool, level: u8) {
        self.with(|config| config.set_warning(indicator, status_ok, level));
    }

    /// See [`DisplayConfig::set_brightness`].
    pub fn set_brightness(&self, scale: u8) {
        self.with(|config| config.set_brightness(scale));
    }
}

impl Default for ConfigCell {
    fn default() -> Self {
        Self::new()
    }
}
