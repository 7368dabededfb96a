//! Color definitions for the watch display
//!
//! All colors are RGB565, the panel's native 16-bit format:
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! The values here are true RGB. Panels wired BGR are handled by the display
//! driver's color-order setting, not by swapping constants.

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const RED: Rgb565 = Rgb565::new(31, 0, 0);

pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);

pub const BLUE: Rgb565 = Rgb565::new(0, 0, 31);

pub const CYAN: Rgb565 = Rgb565::new(0, 63, 31);

pub const MAGENTA: Rgb565 = Rgb565::new(31, 0, 31);

pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);

// ============================================================================
// Grays
// ============================================================================

/// Card and toggle backgrounds (0x8410)
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// 0x7BEF
pub const DARK_GRAY: Rgb565 = Rgb565::new(15, 31, 15);

/// Hint text (0xC618)
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(24, 48, 24);
