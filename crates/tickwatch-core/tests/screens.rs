//! Screens rendered into the RAM framebuffer, checked pixel by pixel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use tickwatch_core::config::{Theme, UiConfig};
use tickwatch_core::framebuffer::FrameBuffer;
use tickwatch_core::ui::colors::{BLUE, GRAY, GREEN, WHITE};
use tickwatch_core::ui::layout::*;
use tickwatch_core::ui::{IconMenuItem, UiManager, Window};
use tickwatch_core::{Canvas, DrawingSurface, FontId, TextAlignment};

type Ui = UiManager<Canvas<FrameBuffer>>;

fn ui() -> Ui {
    let mut ui = UiManager::new(Canvas::new(FrameBuffer::new()));
    ui.begin();
    ui
}

fn pixel(ui: &Ui, x: i32, y: i32) -> Option<Rgb565> {
    ui.surface().target().pixel(x, y)
}

/// Leftmost and rightmost columns holding `color` inside the given rows.
fn color_span(ui: &Ui, color: Rgb565, rows: core::ops::Range<i32>) -> Option<(i32, i32)> {
    let mut span: Option<(i32, i32)> = None;
    for y in rows {
        for x in 0..SCREEN_WIDTH {
            if pixel(ui, x, y) == Some(color) {
                span = Some(match span {
                    Some((lo, hi)) => (lo.min(x), hi.max(x)),
                    None => (x, x),
                });
            }
        }
    }
    span
}

#[test]
fn test_watch_face_status_bar() {
    let mut ui = ui();
    ui.draw_watch_face().unwrap();

    assert_eq!(pixel(&ui, BLUETOOTH_X, BLUETOOTH_Y), Some(BLUE));
    assert_eq!(pixel(&ui, BATTERY_X, BATTERY_Y), Some(WHITE));
    // 78% of the 16 px gauge is 12 px of fill
    assert_eq!(pixel(&ui, BATTERY_X + 2, BATTERY_Y + 2), Some(GREEN));
    assert_eq!(pixel(&ui, BATTERY_X + 13, BATTERY_Y + 2), Some(GREEN));
    assert_eq!(pixel(&ui, BATTERY_X + 14, BATTERY_Y + 2), Some(Rgb565::BLACK));
}

#[test]
fn test_themed_screen_clears_to_theme_background() {
    let theme = Theme {
        background: Rgb565::CSS_NAVY,
        ..Theme::default()
    };
    let config = UiConfig::default().with_theme(theme);
    let mut ui = UiManager::with_config(Canvas::new(FrameBuffer::new()), config);
    ui.draw_watch_face().unwrap();

    // Below the status bar and away from any text
    assert_eq!(pixel(&ui, 2, SCREEN_HEIGHT - 2), Some(Rgb565::CSS_NAVY));
    assert_eq!(pixel(&ui, 2, 2), Some(Rgb565::CSS_NAVY));
}

#[test]
fn test_watch_face_time_is_centered() {
    let mut ui = ui();
    ui.set_time(10, 8, 0);
    ui.draw_watch_face().unwrap();

    // "10:08:00" at size 2 covers x 16..112
    let (lo, hi) = color_span(&ui, WHITE, FACE_TIME_Y..FACE_TIME_Y + 20).unwrap();
    assert!(lo >= 16, "time starts at {}", lo);
    assert!(hi < 112, "time ends at {}", hi);
    assert!(lo < 30 && hi > 98);
}

#[test]
fn test_right_aligned_text_stays_left_of_anchor() {
    let mut ui = ui();
    ui.surface_mut().clear().unwrap();
    ui.draw_text_with_font(120, 10, "78%", FontId::Gothic24, TextAlignment::Right, WHITE)
        .unwrap();

    let (lo, hi) = color_span(&ui, WHITE, 10..30).unwrap();
    assert!(lo >= 84);
    assert!(hi < 120);
}

#[test]
fn test_menu_highlight_band() {
    let mut ui = ui();
    ui.set_menu_items(["Alarms", "Timer", "Settings"]);
    ui.menu_next();
    ui.draw_menu().unwrap();

    let row_top = MENU_FIRST_ROW_Y + MENU_ROW_PITCH - 2;
    assert_eq!(pixel(&ui, 2, row_top), Some(BLUE));
    assert_eq!(pixel(&ui, SCREEN_WIDTH - 1, row_top + MENU_ROW_HEIGHT - 1), Some(BLUE));
    assert_eq!(pixel(&ui, 2, row_top + MENU_ROW_HEIGHT), Some(Rgb565::BLACK));
    // Unselected row has no band
    assert_eq!(pixel(&ui, 2, MENU_FIRST_ROW_Y - 2), Some(Rgb565::BLACK));
}

#[test]
fn test_notification_card_frame() {
    let mut ui = ui();
    ui.draw_notification_card("Mail", "Dinner at eight?").unwrap();

    assert_eq!(pixel(&ui, 10, 50), Some(WHITE));
    assert_eq!(pixel(&ui, SCREEN_WIDTH - 11, 129), Some(WHITE));
    assert_eq!(pixel(&ui, 11, 125), Some(GRAY));
    assert_eq!(pixel(&ui, 9, 125), Some(Rgb565::BLACK));
}

#[test]
fn test_progress_bar_fill() {
    let mut ui = ui();
    ui.surface_mut().clear().unwrap();
    ui.draw_progress_bar(10, 100, 104, 12, 50, GREEN).unwrap();

    assert_eq!(pixel(&ui, 10, 100), Some(WHITE));
    assert_eq!(pixel(&ui, 12, 102), Some(GREEN));
    assert_eq!(pixel(&ui, 61, 109), Some(GREEN));
    assert_eq!(pixel(&ui, 62, 102), Some(Rgb565::BLACK));
}

#[test]
fn test_icon_grid_tiles() {
    let mut ui = ui();
    ui.set_icon_menu_items([
        IconMenuItem::new("Wifi", Rgb565::MAGENTA).with_toggle(true),
        IconMenuItem::new("Sound", Rgb565::YELLOW),
        IconMenuItem::new("Apps", Rgb565::RED),
    ]);
    ui.draw_icon_menu().unwrap();

    let x = 5;
    let y = ICON_GRID_TOP;
    assert_eq!(pixel(&ui, x + 5, y + 5), Some(Rgb565::MAGENTA));
    assert_eq!(pixel(&ui, ICON_CELL_WIDTH + x + 5, y + 5), Some(Rgb565::YELLOW));
    assert_eq!(pixel(&ui, x + 5, y + ICON_CELL_HEIGHT + 5), Some(Rgb565::RED));
    // Selection outline around the first tile
    assert_eq!(pixel(&ui, x, y), Some(Rgb565::CYAN));
    // Switch knob in the "on" position
    assert_eq!(pixel(&ui, x + ICON_CELL_WIDTH - 15, y + 43), Some(GREEN));
}

#[test]
fn test_window_draws_visible_elements() {
    let mut canvas = Canvas::new(FrameBuffer::new());
    let mut window = Window::new("Demo");
    let hidden = window.add_rect(0, 0, 10, 10, Rgb565::RED).unwrap();
    window.add_rect(20, 20, 10, 10, Rgb565::GREEN).unwrap();
    window.set_visible(hidden, false);

    window.draw(&mut canvas).unwrap();

    let fb = canvas.target();
    assert_eq!(fb.pixel(5, 5), Some(Rgb565::BLACK));
    assert_eq!(fb.pixel(25, 25), Some(Rgb565::GREEN));
    assert_eq!(fb.dirty_area().map(|r| r.top_left), Some(Point::new(20, 20)));
}
