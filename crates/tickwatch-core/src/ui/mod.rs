//! Watch UI: screens, menus and the clock they display
//!
//! - `layout` and `colors` hold the fixed geometry and palette
//! - `menu` stores bounded label lists and the selection
//! - `clock` keeps time of day from a monotonic timestamp
//! - `manager` draws every screen onto a [`DrawingSurface`](crate::surface::DrawingSurface)
//! - `window` is a retained list of shapes for ad-hoc screens

pub mod clock;
pub mod colors;
pub mod layout;
pub mod manager;
pub mod menu;
pub mod window;

// Re-export commonly used items
pub use clock::{ClockTime, TimeFormat, WatchClock};
pub use manager::{UiManager, WatchFaceData};
pub use menu::{IconMenuItem, Menu};
pub use window::Window;
