//! Display rendering engine for a ping-pong ball LED clock.
//!
//! The clock is built from 128 individually addressable LEDs glued into a
//! parallelogram lattice of ping-pong balls. This crate turns abstract
//! display intent (show the time, run a thunderstorm in the background,
//! sweep the seconds around the border) into a flat array of 128 RGB values
//! ready for a WS2812-style strip driver.
//!
//! # Glossary
//!
//! - **Strip index:** the 0–127 physical position of an LED on the flat
//!   addressable strip.
//! - **Lattice:** the 7×20 logical `(row, col)` grid overlaying the physical
//!   ball arrangement; corner cells that do not exist are absent.
//! - **Glyph:** the sparse set of strip indices lit to render one digit.
//! - **Tick:** one complete run of the render pipeline producing an updated
//!   [`PixelFrame`].
//!
//! # Layers
//!
//! Each tick composites, in order: background animation, border, time
//! digits, warning indicators. Later layers win. The finished frame is
//! handed to a [`DisplaySink`] (the physical strip driver, outside this
//! crate).
//!
//! # Features
//!
//! - `defmt` — structured logging over RTT for on-device debugging.
//! - `host` — std-only tooling: PNG previews of rendered frames and the
//!   host-side test suite support.
#![cfg_attr(not(any(feature = "host", test)), no_std)]

#[macro_use]
mod fmt;

pub mod background;
pub mod border;
pub mod color;
pub mod config;
pub mod digits;
pub mod display;
mod error;
pub mod frame;
pub mod lattice;
pub mod rng;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::config::{ConfigCell, DisplayConfig};
pub use crate::display::{ClockDisplay, DisplaySink, TimeOfDay};
pub use crate::error::{Error, Result};
pub use crate::frame::PixelFrame;
