//! Screen compositor
//!
//! [`UiManager`] owns the drawing surface together with the little UI state
//! the watch has: the clock, the list menu, the icon grid and the numbers
//! shown on the watch face. Each `draw_*` method paints one complete screen
//! or widget from fixed layout constants.

use core::fmt::Write;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};
use log::{debug, info};

use crate::config::UiConfig;
use crate::fonts::FontKey;
use crate::surface::{DrawingSurface, GLYPHS};
use crate::text::{TextAlignment, clip_to_boundary, draw_aligned};
use crate::ui::clock::{ClockTime, WatchClock};
use crate::ui::colors::{BLUE, GRAY, GREEN, LIGHT_GRAY, RED, WHITE, YELLOW};
use crate::ui::layout::*;
use crate::ui::menu::{
    ICON_MENU_CAPACITY, IconMenuItem, Menu, collect_icon_items, truncate_label,
};

use crate::fonts::FontId::{Gothic14, Gothic24};

/// Longest notification body shown on the card, in bytes.
pub const NOTIFICATION_MESSAGE_LEN: usize = 34;

/// List rows that fit between the title and the bottom edge.
const MENU_VISIBLE_ROWS: usize = ((SCREEN_HEIGHT - MENU_FIRST_ROW_Y) / MENU_ROW_PITCH) as usize;

/// Glyph row height at size 1.
const LINE_HEIGHT: i32 = GLYPHS.character_size.height as i32;

/// Figures shown under the time on the watch face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchFaceData {
    pub date: String<16>,
    pub steps: u32,
    pub battery_percent: u8,
}

impl Default for WatchFaceData {
    fn default() -> Self {
        let mut date = String::new();
        date.push_str("APR 3, 2025").ok();
        Self {
            date,
            steps: 8_421,
            battery_percent: 78,
        }
    }
}

impl WatchFaceData {
    pub fn new(date: &str, steps: u32, battery_percent: u8) -> Self {
        let mut stored = String::new();
        stored.push_str(clip_to_boundary(date, 16)).ok();
        Self {
            date: stored,
            steps,
            battery_percent: battery_percent.min(100),
        }
    }
}

/// Write `value` with `,` between groups of three digits.
fn write_grouped<W: Write>(out: &mut W, value: u32) -> core::fmt::Result {
    if value >= 1000 {
        write_grouped(out, value / 1000)?;
        write!(out, ",{:03}", value % 1000)
    } else {
        write!(out, "{}", value)
    }
}

/// UI state plus the surface it is drawn on.
pub struct UiManager<S> {
    surface: S,
    config: UiConfig,
    clock: WatchClock,
    menu: Menu,
    icon_items: Vec<IconMenuItem, ICON_MENU_CAPACITY>,
    icon_selected: usize,
    face: WatchFaceData,
}

impl<S> UiManager<S>
where
    S: DrawingSurface,
{
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, UiConfig::default())
    }

    /// Build with `config`; the surface clears to the theme background.
    pub fn with_config(mut surface: S, config: UiConfig) -> Self {
        surface.set_background(config.theme.background);
        Self {
            surface,
            config,
            clock: WatchClock::default(),
            menu: Menu::new(),
            icon_items: Vec::new(),
            icon_selected: 0,
            face: WatchFaceData::default(),
        }
    }

    /// Reset navigation state before the first screen is shown.
    pub fn begin(&mut self) {
        self.reset_menu_selection();
        info!(
            "UI ready: {}x{}, time {:?}",
            SCREEN_WIDTH, SCREEN_HEIGHT, self.config.time_format
        );
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------------

    /// Set the time of day; out-of-range fields are clamped.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.clock.set_time(ClockTime::new(hours, minutes, seconds));
    }

    pub fn time(&self) -> ClockTime {
        self.clock.time()
    }

    /// Advance the clock if a second has passed, without drawing.
    pub fn tick_clock(&mut self, now: Instant) -> bool {
        self.clock.update(now)
    }

    /// Advance the clock if a second has passed and redraw the watch face.
    ///
    /// Returns whether the time changed.
    pub fn update_time(&mut self, now: Instant) -> Result<bool, S::Error> {
        if !self.clock.update(now) {
            return Ok(false);
        }
        self.draw_watch_face()?;
        Ok(true)
    }

    pub fn set_watch_face_data(&mut self, data: WatchFaceData) {
        self.face = data;
    }

    // ------------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------------

    /// Store list-menu labels (at most 10, each at most 19 bytes) and select
    /// the first one. Returns the number stored.
    pub fn set_menu_items<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.menu.set_items(items)
    }

    /// Store up to four icon-grid tiles and select the first one.
    pub fn set_icon_menu_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = IconMenuItem>,
    {
        self.icon_items = collect_icon_items(items);
        self.icon_selected = 0;
        debug!("Stored {} icon menu items", self.icon_items.len());
    }

    pub fn menu_next(&mut self) {
        self.menu.next();
    }

    pub fn menu_previous(&mut self) {
        self.menu.previous();
    }

    /// Move the icon-grid selection forward, wrapping over the stored tiles.
    pub fn icon_next(&mut self) {
        let count = self.icon_items.len();
        if count == 0 {
            return;
        }
        self.icon_selected = (self.icon_selected + 1) % count;
        debug!("Icon selection -> {}", self.icon_selected);
    }

    pub fn icon_previous(&mut self) {
        let count = self.icon_items.len();
        if count == 0 {
            return;
        }
        self.icon_selected = (self.icon_selected + count - 1) % count;
        debug!("Icon selection -> {}", self.icon_selected);
    }

    /// Put both the list and the icon-grid selection on their first entry.
    pub fn reset_menu_selection(&mut self) {
        self.menu.reset_selection();
        self.icon_selected = 0;
    }

    pub fn current_menu_item(&self) -> usize {
        self.menu.current()
    }

    pub fn current_icon_item(&self) -> usize {
        self.icon_selected
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn icon_items(&self) -> &[IconMenuItem] {
        &self.icon_items
    }

    // ------------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------------

    pub fn draw_text_with_font<'a, K: FontKey>(
        &mut self,
        x: i32,
        y: i32,
        text: impl Into<Option<&'a str>>,
        font: K,
        alignment: TextAlignment,
        color: Rgb565,
    ) -> Result<(), S::Error> {
        draw_aligned(&mut self.surface, x, y, text, font, alignment, color)
    }

    /// Time, date, step count and battery level.
    pub fn draw_watch_face(&mut self) -> Result<(), S::Error> {
        self.surface.clear()?;
        self.draw_status_bar(true, true, true)?;

        let time = self.clock.time();
        let format = self.config.time_format;
        let text = self.config.theme.text;

        self.draw_text_with_font(
            CENTER_X,
            FACE_TIME_Y,
            time.format_full(format).as_str(),
            Gothic24,
            TextAlignment::Center,
            text,
        )?;
        if let Some(meridiem) = time.meridiem(format) {
            self.draw_text_with_font(
                SCREEN_WIDTH - 4,
                FACE_TIME_Y + 2 * LINE_HEIGHT,
                meridiem,
                Gothic14,
                TextAlignment::Right,
                text,
            )?;
        }

        let date = self.face.date.clone();
        self.draw_text_with_font(
            CENTER_X,
            FACE_DATE_Y,
            date.as_str(),
            Gothic14,
            TextAlignment::Center,
            text,
        )?;

        let mut steps: String<24> = String::new();
        write!(steps, "Steps: ").ok();
        write_grouped(&mut steps, self.face.steps).ok();
        self.draw_text_with_font(
            CENTER_X,
            FACE_STEPS_Y,
            steps.as_str(),
            Gothic14,
            TextAlignment::Center,
            GREEN,
        )?;

        let mut battery: String<16> = String::new();
        write!(battery, "Battery: {}%", self.face.battery_percent).ok();
        self.draw_text_with_font(
            CENTER_X,
            FACE_BATTERY_Y,
            battery.as_str(),
            Gothic14,
            TextAlignment::Center,
            YELLOW,
        )
    }

    /// Top strip with the short time, a bluetooth dot and a battery gauge.
    pub fn draw_status_bar(
        &mut self,
        show_battery: bool,
        show_bluetooth: bool,
        show_time: bool,
    ) -> Result<(), S::Error> {
        let theme = self.config.theme;
        self.surface
            .fill_rect(0, 0, SCREEN_WIDTH, STATUS_BAR_HEIGHT, theme.background)?;

        if show_time {
            let short = self.clock.time().format_short(self.config.time_format);
            self.draw_text_with_font(
                STATUS_TIME_X,
                STATUS_TIME_Y,
                short.as_str(),
                Gothic14,
                TextAlignment::Left,
                theme.text,
            )?;
        }

        if show_bluetooth {
            self.surface.fill_circle(
                BLUETOOTH_X,
                BLUETOOTH_Y,
                BLUETOOTH_RADIUS,
                BLUE,
            )?;
        }

        if show_battery {
            // Inner area is the outline minus a 2 px margin on each side
            let inner = BATTERY_WIDTH - 4;
            let fill = inner * self.face.battery_percent.min(100) as i32 / 100;
            self.surface.draw_rect(
                BATTERY_X,
                BATTERY_Y,
                BATTERY_WIDTH,
                BATTERY_HEIGHT,
                WHITE,
            )?;
            self.surface.fill_rect(
                BATTERY_X + 2,
                BATTERY_Y + 2,
                fill,
                BATTERY_HEIGHT - 4,
                GREEN,
            )?;
            self.surface.fill_rect(
                BATTERY_X + BATTERY_WIDTH,
                BATTERY_Y + 2,
                2,
                BATTERY_HEIGHT - 4,
                WHITE,
            )?;
        }

        Ok(())
    }

    /// First visible list row, scrolled so the selection is on screen.
    fn first_visible_row(&self) -> usize {
        let selected = self.menu.current();
        if selected < MENU_VISIBLE_ROWS {
            0
        } else {
            selected + 1 - MENU_VISIBLE_ROWS
        }
    }

    /// Title plus the list of labels with the selected row highlighted.
    pub fn draw_menu(&mut self) -> Result<(), S::Error> {
        let theme = self.config.theme;
        self.surface.clear()?;
        self.draw_status_bar(true, true, true)?;

        self.draw_text_with_font(
            TITLE_X,
            MENU_TITLE_Y,
            "Menu",
            Gothic24,
            TextAlignment::Left,
            theme.text,
        )?;

        let first = self.first_visible_row();
        let selected = self.menu.current();
        for (row, index) in (first..self.menu.len()).take(MENU_VISIBLE_ROWS).enumerate() {
            let y = MENU_FIRST_ROW_Y + row as i32 * MENU_ROW_PITCH;
            let label = truncate_label(self.menu.get(index).unwrap_or_default());

            let color = if index == selected {
                self.surface
                    .fill_rect(0, y - 2, SCREEN_WIDTH, MENU_ROW_HEIGHT, theme.highlight)?;
                YELLOW
            } else {
                theme.text
            };
            self.draw_text_with_font(
                MENU_LABEL_X,
                y,
                label.as_str(),
                Gothic14,
                TextAlignment::Left,
                color,
            )?;
        }

        if self.config.show_debug_overlay {
            let mut overlay: String<32> = String::new();
            write!(overlay, "Items: {} Sel: {}", self.menu.len(), selected).ok();
            self.draw_text_with_font(
                TITLE_X,
                SCREEN_HEIGHT - LINE_HEIGHT - 2,
                overlay.as_str(),
                Gothic14,
                TextAlignment::Left,
                RED,
            )?;
        }

        Ok(())
    }

    /// Full-screen notification with the message on a gray card.
    ///
    /// The message is cut to [`NOTIFICATION_MESSAGE_LEN`] bytes.
    pub fn draw_notification_card(&mut self, title: &str, message: &str) -> Result<(), S::Error> {
        let text = self.config.theme.text;
        self.surface.clear()?;

        self.draw_text_with_font(10, 10, "NOTIFICATION", Gothic14, TextAlignment::Left, YELLOW)?;
        self.draw_text_with_font(10, 35, title, Gothic14, TextAlignment::Left, text)?;

        self.surface.fill_rect(10, 50, SCREEN_WIDTH - 20, 80, GRAY)?;
        self.surface.draw_rect(10, 50, SCREEN_WIDTH - 20, 80, WHITE)?;

        let message = clip_to_boundary(message, NOTIFICATION_MESSAGE_LEN);
        self.draw_text_with_font(12, 60, message, Gothic14, TextAlignment::Left, text)?;

        self.draw_text_with_font(
            15,
            95,
            "Press SELECT",
            Gothic14,
            TextAlignment::Left,
            LIGHT_GRAY,
        )?;
        self.draw_text_with_font(
            39,
            95 + LINE_HEIGHT,
            "to dismiss",
            Gothic14,
            TextAlignment::Left,
            LIGHT_GRAY,
        )
    }

    /// 2x2 grid of colored tiles with labels, optional switches and an outline
    /// around the selected tile.
    pub fn draw_icon_menu(&mut self) -> Result<(), S::Error> {
        let theme = self.config.theme;
        self.surface.clear()?;
        self.draw_status_bar(true, true, true)?;

        self.draw_text_with_font(
            TITLE_X,
            ICON_MENU_TITLE_Y,
            "Settings",
            Gothic24,
            TextAlignment::Left,
            theme.text,
        )?;

        let selected = self.icon_selected;
        let items = self.icon_items.clone();
        for (i, item) in items.iter().enumerate() {
            let row = (i / ICON_GRID_COLUMNS) as i32;
            let col = (i % ICON_GRID_COLUMNS) as i32;
            let x = col * ICON_CELL_WIDTH + 5;
            let y = row * ICON_CELL_HEIGHT + ICON_GRID_TOP;

            self.surface
                .fill_rect(x + 5, y + 5, ICON_CELL_WIDTH - 15, 30, item.icon_color)?;
            self.draw_text_with_font(
                x + 8,
                y + 38,
                item.label.as_str(),
                Gothic14,
                TextAlignment::Left,
                theme.text,
            )?;

            if let Some(on) = item.toggle {
                self.surface
                    .fill_rect(x + ICON_CELL_WIDTH - 30, y + 38, 20, 10, GRAY)?;
                if on {
                    self.surface
                        .fill_circle(x + ICON_CELL_WIDTH - 15, y + 43, 6, GREEN)?;
                } else {
                    self.surface
                        .fill_circle(x + ICON_CELL_WIDTH - 25, y + 43, 6, RED)?;
                }
            }

            if i == selected {
                self.surface.draw_rect(
                    x,
                    y,
                    ICON_CELL_WIDTH - 10,
                    ICON_CELL_HEIGHT - 5,
                    theme.accent,
                )?;
            }
        }

        Ok(())
    }

    /// Recording indicator: title and a ringed dot in the middle of the screen.
    pub fn draw_recording_page(&mut self) -> Result<(), S::Error> {
        let accent = BLUE;
        self.surface.clear()?;
        self.draw_status_bar(true, true, true)?;

        self.draw_text_with_font(10, 35, "Recording", Gothic24, TextAlignment::Left, accent)?;

        let cy = SCREEN_HEIGHT / 2 + 15;
        self.surface.fill_circle(CENTER_X, cy, 25, accent)?;
        self.surface.draw_circle(CENTER_X, cy, 35, accent)
    }

    /// Outlined bar filled to `percentage` (clamped to 0..=100).
    pub fn draw_progress_bar(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        percentage: i32,
        color: Rgb565,
    ) -> Result<(), S::Error> {
        self.surface.draw_rect(x, y, width, height, WHITE)?;

        let fill_width = (width - 4) * percentage.clamp(0, 100) / 100;
        self.surface
            .fill_rect(x + 2, y + 2, fill_width, height - 4, color)
    }

    /// Right-hand strip with up/select/down hints.
    pub fn draw_action_bar(
        &mut self,
        show_up: bool,
        show_select: bool,
        show_down: bool,
    ) -> Result<(), S::Error> {
        self.surface.fill_rect(
            SCREEN_WIDTH - ACTION_BAR_WIDTH,
            0,
            ACTION_BAR_WIDTH,
            SCREEN_HEIGHT,
            GRAY,
        )?;

        if show_up {
            // Rows widen downwards into an upward-pointing arrow
            for i in 0..ACTION_ARROW_SIZE {
                self.arrow_row(ACTION_UP_TOP + i, i)?;
            }
        }

        if show_select {
            self.surface
                .fill_circle(ACTION_BAR_CENTER_X, SCREEN_HEIGHT / 2, 6, WHITE)?;
        }

        if show_down {
            for i in 0..ACTION_ARROW_SIZE {
                self.arrow_row(ACTION_DOWN_TOP + i, ACTION_ARROW_SIZE - i)?;
            }
        }

        Ok(())
    }

    fn arrow_row(&mut self, y: i32, width: i32) -> Result<(), S::Error> {
        self.surface.draw_line(
            ACTION_BAR_CENTER_X - width / 2,
            y,
            ACTION_BAR_CENTER_X + width / 2,
            y,
            WHITE,
        )
    }
}
