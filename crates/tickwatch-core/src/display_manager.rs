//! Display manager for screen selection and rendering
//!
//! This module owns the [`UiManager`] and therefore the only handle to the
//! drawing surface. Other tasks never draw directly; they send
//! [`DisplayRequest`]s through [`DISPLAY_CHANNEL`]:
//! - `Show` switches the active screen
//! - `MenuNext` / `MenuPrevious` move the list selection
//! - `Tick` advances the clock
//! - `Redraw` forces a repaint
//!
//! A request only marks the manager dirty; [`DisplayManager::render`] paints
//! the active screen once per batch of changes.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Instant;
use heapless::String;
use log::{debug, error, info};

use crate::surface::DrawingSurface;
use crate::text::clip_to_boundary;
use crate::ui::manager::UiManager;

/// Channel capacity for display requests
const DISPLAY_REQUEST_CAPACITY: usize = 4;

/// Longest notification title kept by [`Screen::Notification`].
pub const NOTIFICATION_TITLE_LEN: usize = 31;

/// Longest notification body kept before the card clips it further.
pub const NOTIFICATION_BODY_LEN: usize = 63;

/// Screens the watch can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    WatchFace,
    Menu,
    IconMenu,
    Notification {
        title: String<NOTIFICATION_TITLE_LEN>,
        message: String<NOTIFICATION_BODY_LEN>,
    },
    Recording,
}

impl Screen {
    /// Build a notification screen, cutting long strings at char boundaries.
    pub fn notification(title: &str, message: &str) -> Self {
        let mut t = String::new();
        t.push_str(clip_to_boundary(title, NOTIFICATION_TITLE_LEN)).ok();
        let mut m = String::new();
        m.push_str(clip_to_boundary(message, NOTIFICATION_BODY_LEN)).ok();
        Screen::Notification {
            title: t,
            message: m,
        }
    }

    /// Whether the screen shows the time and so must repaint every second.
    pub fn shows_clock(&self) -> bool {
        !matches!(self, Screen::Notification { .. })
    }
}

/// Request to change what is shown or update the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRequest {
    /// Switch to a screen
    Show(Screen),
    /// Move the list selection down
    MenuNext,
    /// Move the list selection up
    MenuPrevious,
    /// Monotonic time from the clock task
    Tick(Instant),
    /// Force a redraw of the current screen
    Redraw,
}

/// Global channel for display requests
pub static DISPLAY_CHANNEL: Channel<
    CriticalSectionRawMutex,
    DisplayRequest,
    DISPLAY_REQUEST_CAPACITY,
> = Channel::new();

/// Owns the UI and repaints the active screen when something changed.
pub struct DisplayManager<S> {
    ui: UiManager<S>,
    screen: Screen,
    needs_redraw: bool,
}

impl<S> DisplayManager<S>
where
    S: DrawingSurface,
{
    /// Start on the watch face with a pending redraw.
    pub fn new(mut ui: UiManager<S>) -> Self {
        ui.begin();
        Self {
            ui,
            screen: Screen::default(),
            needs_redraw: true,
        }
    }

    pub fn ui(&self) -> &UiManager<S> {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiManager<S> {
        &mut self.ui
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Apply a request to the UI state. Returns whether a repaint is pending.
    pub fn handle_request(&mut self, request: DisplayRequest) -> bool {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::Show(screen) => {
                if screen == Screen::Menu || screen == Screen::IconMenu {
                    self.ui.reset_menu_selection();
                }
                self.screen = screen;
                self.needs_redraw = true;
            }
            DisplayRequest::MenuNext => match self.screen {
                Screen::Menu => {
                    self.ui.menu_next();
                    self.needs_redraw = true;
                }
                Screen::IconMenu => {
                    self.ui.icon_next();
                    self.needs_redraw = true;
                }
                _ => {}
            },
            DisplayRequest::MenuPrevious => match self.screen {
                Screen::Menu => {
                    self.ui.menu_previous();
                    self.needs_redraw = true;
                }
                Screen::IconMenu => {
                    self.ui.icon_previous();
                    self.needs_redraw = true;
                }
                _ => {}
            },
            DisplayRequest::Tick(now) => {
                if self.ui.tick_clock(now) && self.screen.shows_clock() {
                    self.needs_redraw = true;
                }
            }
            DisplayRequest::Redraw => {
                self.needs_redraw = true;
            }
        }
        self.needs_redraw
    }

    /// Paint the active screen if anything changed. Returns whether it drew.
    pub fn render(&mut self) -> Result<bool, S::Error> {
        if !self.needs_redraw {
            return Ok(false);
        }

        match &self.screen {
            Screen::WatchFace => self.ui.draw_watch_face()?,
            Screen::Menu => self.ui.draw_menu()?,
            Screen::IconMenu => self.ui.draw_icon_menu()?,
            Screen::Notification { title, message } => {
                self.ui.draw_notification_card(title, message)?
            }
            Screen::Recording => self.ui.draw_recording_page()?,
        }

        self.needs_redraw = false;
        Ok(true)
    }

    /// Run the display manager task
    ///
    /// Renders once, then handles requests from the channel forever.
    pub async fn run(
        &mut self,
        receiver: Receiver<'_, CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY>,
    ) where
        S::Error: core::fmt::Debug,
    {
        info!("Display manager task started");

        if let Err(e) = self.render() {
            error!("Display render error: {:?}", e);
        }

        loop {
            let request = receiver.receive().await;
            self.handle_request(request);
            if let Err(e) = self.render() {
                error!("Display render error: {:?}", e);
            }
        }
    }
}

/// Helper to get a display request sender
pub fn get_display_sender()
-> Sender<'static, CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY> {
    DISPLAY_CHANNEL.sender()
}

/// Helper to get a display request receiver
pub fn get_display_receiver()
-> Receiver<'static, CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY> {
    DISPLAY_CHANNEL.receiver()
}
