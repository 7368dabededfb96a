//! UI configuration
//!
//! Everything here is chosen at build or boot time and stays fixed while the
//! watch runs. The firmware fills [`UiConfig`] from build-time environment
//! values; the simulator uses the defaults.

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::clock::TimeFormat;
use crate::ui::colors::{BLACK, BLUE, CYAN, WHITE};

/// Theme colors used by every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen clear color
    pub background: Rgb565,
    /// Primary text
    pub text: Rgb565,
    /// Selection outline in grids
    pub accent: Rgb565,
    /// Selected list row background
    pub highlight: Rgb565,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BLACK,
            text: WHITE,
            accent: CYAN,
            highlight: BLUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiConfig {
    pub theme: Theme,
    pub time_format: TimeFormat,
    /// Draw the item count / selection line at the bottom of the list menu
    pub show_debug_overlay: bool,
}

impl UiConfig {
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.show_debug_overlay = enabled;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
