//! Hardware-independent core library for tickwatch
//!
//! This crate contains the platform-agnostic part of the watch UI: the font
//! table and text alignment, the drawing-surface contract, menu storage, the
//! software clock, the screen compositor and the display manager that feeds
//! it requests.
//!
//! It is `no_std` with `extern crate alloc` so it compiles on both the
//! ESP32-S3 firmware and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod display_manager;
pub mod fonts;
pub mod framebuffer;
pub mod surface;
pub mod text;
pub mod ui;

#[cfg(test)]
mod testing;

pub use fonts::{FontId, FontKey, FontStyle, size_multiplier};
pub use surface::{Canvas, DrawingSurface};
pub use text::{TextAlignment, draw_aligned, estimate_width};
