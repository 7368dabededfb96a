//! Menu label storage and selection
//!
//! Labels are copied into fixed-capacity storage owned by the menu, so callers
//! can pass short-lived strings. Anything that does not fit is dropped or cut
//! short rather than rejected.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};
use log::{debug, warn};

use crate::text::clip_to_boundary;

/// Maximum number of list-menu entries kept.
pub const MENU_CAPACITY: usize = 10;

/// Maximum label length in bytes.
pub const MENU_LABEL_LEN: usize = 19;

/// Maximum number of icon-menu entries (one 2x2 grid).
pub const ICON_MENU_CAPACITY: usize = 4;

pub type MenuLabel = String<MENU_LABEL_LEN>;

/// Copy `src` into a label, cutting it at [`MENU_LABEL_LEN`] bytes.
///
/// The cut moves back to the previous char boundary so multi-byte characters
/// are never split.
pub fn truncate_label(src: &str) -> MenuLabel {
    let mut label = MenuLabel::new();
    // Cannot fail: the clipped slice fits the capacity
    label.push_str(clip_to_boundary(src, MENU_LABEL_LEN)).ok();
    label
}

/// List menu: bounded labels plus the selected index.
#[derive(Debug, Default)]
pub struct Menu {
    items: Vec<MenuLabel, MENU_CAPACITY>,
    selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all labels and reset the selection to the first entry.
    ///
    /// Keeps at most [`MENU_CAPACITY`] items and truncates long labels.
    /// Returns the number of items stored.
    pub fn set_items<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.items.clear();
        self.selected = 0;

        let mut dropped = 0usize;
        for (i, item) in items.into_iter().enumerate() {
            if self.items.is_full() {
                dropped += 1;
                continue;
            }

            let label = truncate_label(item);
            if label.len() < item.len() {
                debug!("Menu item {} truncated to {:?}", i, label.as_str());
            }
            debug!("Stored menu item {}: {}", i, label.as_str());
            // Cannot fail: checked is_full above
            self.items.push(label).ok();
        }

        if dropped > 0 {
            warn!(
                "Menu holds {} items, dropped {} extra",
                MENU_CAPACITY, dropped
            );
        }

        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.as_str())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|s| s.as_str())
    }

    /// Index of the selected entry. Always 0 when the menu is empty.
    pub fn current(&self) -> usize {
        self.selected
    }

    /// Put the selection back on the first entry.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    /// Move the selection down, wrapping from the last entry to the first.
    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
        debug!("Menu selection -> {}", self.selected);
    }

    /// Move the selection up, wrapping from the first entry to the last.
    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let count = self.items.len();
        self.selected = (self.selected + count - 1) % count;
        debug!("Menu selection -> {}", self.selected);
    }
}

/// One tile of the icon grid.
#[derive(Debug, Clone, PartialEq)]
pub struct IconMenuItem {
    pub label: MenuLabel,
    pub icon_color: Rgb565,
    /// `Some(state)` draws an on/off switch under the icon
    pub toggle: Option<bool>,
}

impl IconMenuItem {
    pub fn new(label: &str, icon_color: Rgb565) -> Self {
        Self {
            label: truncate_label(label),
            icon_color,
            toggle: None,
        }
    }

    pub fn with_toggle(mut self, on: bool) -> Self {
        self.toggle = Some(on);
        self
    }
}

/// Copy up to [`ICON_MENU_CAPACITY`] items for the icon grid.
pub fn collect_icon_items<I>(items: I) -> Vec<IconMenuItem, ICON_MENU_CAPACITY>
where
    I: IntoIterator<Item = IconMenuItem>,
{
    let mut stored = Vec::new();
    let mut dropped = 0usize;
    for item in items {
        if stored.push(item).is_err() {
            dropped += 1;
        }
    }
    if dropped > 0 {
        warn!(
            "Icon menu shows {} items, dropped {} extra",
            ICON_MENU_CAPACITY, dropped
        );
    }
    stored
}
