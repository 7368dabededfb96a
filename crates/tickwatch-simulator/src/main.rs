//! Desktop simulator for the tickwatch UI.
//!
//! Renders tickwatch-core screens in an SDL2 window via
//! `embedded-graphics-simulator`. Requests travel through the same display
//! channel the firmware uses, so screen switching and clock ticks behave the
//! same way without hardware.
//!
//! # Key bindings
//!
//! | Key       | Action              |
//! |-----------|---------------------|
//! | 1         | Watch face          |
//! | 2         | List menu           |
//! | 3         | Icon menu           |
//! | 4         | Notification        |
//! | 5         | Recording           |
//! | Up / Down | Move menu selection |
//! | Q         | Quit                |
//!
//! `TICKWATCH_START_TIME` (`HH:MM[:SS]`) and `TICKWATCH_TIME_FORMAT`
//! (`12h`/`24h`) override the start time and clock format.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use tickwatch_core::Canvas;
use tickwatch_core::config::UiConfig;
use tickwatch_core::display_manager::{
    DisplayManager, DisplayRequest, Screen, get_display_receiver, get_display_sender,
};
use tickwatch_core::ui::colors::{BLUE, GREEN, MAGENTA, YELLOW};
use tickwatch_core::ui::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tickwatch_core::ui::{ClockTime, IconMenuItem, TimeFormat, UiManager};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const MENU_ITEMS: [&str; 12] = [
    "Alarms",
    "Timer",
    "Stopwatch",
    "Weather",
    "Music",
    "Notifications",
    "Settings",
    "Health",
    "Calendar",
    "Flashlight",
    "Compass",
    "About",
];

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

/// Read the clock settings from the environment, falling back to defaults.
fn config_from_env() -> (UiConfig, ClockTime) {
    let mut config = UiConfig::default();
    if let Ok(raw) = std::env::var("TICKWATCH_TIME_FORMAT") {
        match raw.parse::<TimeFormat>() {
            Ok(format) => config = config.with_time_format(format),
            Err(e) => warn!("Ignoring TICKWATCH_TIME_FORMAT={:?}: {}", raw, e),
        }
    }

    let mut start = ClockTime::default();
    if let Ok(raw) = std::env::var("TICKWATCH_START_TIME") {
        match raw.parse::<ClockTime>() {
            Ok(time) => start = time,
            Err(e) => warn!("Ignoring TICKWATCH_START_TIME={:?}: {}", raw, e),
        }
    }

    (config, start)
}

/// Map an SDL keycode to a display request.
fn keycode_to_request(keycode: Keycode) -> Option<DisplayRequest> {
    let screen = match keycode {
        Keycode::Num1 | Keycode::Kp1 => Screen::WatchFace,
        Keycode::Num2 | Keycode::Kp2 => Screen::Menu,
        Keycode::Num3 | Keycode::Kp3 => Screen::IconMenu,
        Keycode::Num4 | Keycode::Kp4 => {
            Screen::notification("Message", "Hey, are we still on for lunch today?")
        }
        Keycode::Num5 | Keycode::Kp5 => Screen::Recording,
        Keycode::Down => return Some(DisplayRequest::MenuNext),
        Keycode::Up => return Some(DisplayRequest::MenuPrevious),
        _ => return None,
    };
    Some(DisplayRequest::Show(screen))
}

/// Monotonic time since start-up in the form the core clock expects.
fn monotonic(start: Instant) -> embassy_time::Instant {
    embassy_time::Instant::from_millis(start.elapsed().as_millis() as u64)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting tickwatch simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        SCREEN_WIDTH, SCREEN_HEIGHT, WINDOW_SCALE
    );
    info!("Keys: 1=Face  2=Menu  3=Icons  4=Notification  5=Recording  Up/Down=Select  Q=Quit");

    let (config, start_time) = config_from_env();

    // SDL2 display and window
    let display =
        SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Tickwatch Simulator", &output_settings);

    let mut ui = UiManager::with_config(Canvas::new(display), config);
    ui.set_time(
        start_time.hours(),
        start_time.minutes(),
        start_time.seconds(),
    );
    ui.set_menu_items(MENU_ITEMS);
    ui.set_icon_menu_items([
        IconMenuItem::new("Wifi", BLUE).with_toggle(true),
        IconMenuItem::new("Sound", MAGENTA).with_toggle(false),
        IconMenuItem::new("Health", GREEN),
        IconMenuItem::new("Alarm", YELLOW).with_toggle(true),
    ]);

    let mut manager = DisplayManager::new(ui);
    let sender = get_display_sender();
    let receiver = get_display_receiver();
    let started = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = manager.render() {
        log::error!("Draw error: {:?}", e);
    }
    window.update(manager.ui().surface().target());

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if let Some(request) = keycode_to_request(keycode)
                        && sender.try_send(request).is_err()
                    {
                        warn!("Display channel full, key dropped");
                    }
                }

                _ => {}
            }
        }

        // --- Clock tick ---------------------------------------------------
        // A full queue just means the tick is retried next frame
        let _ = sender.try_send(DisplayRequest::Tick(monotonic(started)));

        // --- Requests and render ------------------------------------------
        while let Ok(request) = receiver.try_receive() {
            manager.handle_request(request);
        }
        if let Err(e) = manager.render() {
            log::error!("Draw error: {:?}", e);
        }

        window.update(manager.ui().surface().target());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
