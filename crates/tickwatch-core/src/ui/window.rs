//! Retained element list
//!
//! A [`Window`] records simple shapes once and repaints them on demand. It is
//! the building block for ad-hoc screens that do not warrant a dedicated
//! `draw_*` method on the manager.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};
use log::{trace, warn};

use crate::surface::DrawingSurface;
use crate::text::clip_to_boundary;

/// Elements a window can hold.
pub const WINDOW_CAPACITY: usize = 16;

/// Longest title or text element, in bytes.
pub const WINDOW_TEXT_LEN: usize = 31;

pub type WindowText = String<WINDOW_TEXT_LEN>;

fn clipped(src: &str) -> WindowText {
    let mut text = WindowText::new();
    text.push_str(clip_to_boundary(src, WINDOW_TEXT_LEN)).ok();
    text
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled rectangle
    Rect { width: i32, height: i32 },
    /// Size-1 text with its top-left at the element origin
    Text(WindowText),
    /// Filled circle centered on the element origin
    Circle { radius: i32 },
    /// Line from the element origin to `(x1, y1)`
    Line { x1: i32, y1: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiElement {
    pub x: i32,
    pub y: i32,
    pub color: Rgb565,
    pub shape: Shape,
    pub visible: bool,
}

impl UiElement {
    fn draw<S: DrawingSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        match &self.shape {
            Shape::Rect { width, height } => {
                surface.fill_rect(self.x, self.y, *width, *height, self.color)
            }
            Shape::Text(text) => {
                surface.print_text_at_cursor(self.x, self.y, text.as_str(), self.color, 1)
            }
            Shape::Circle { radius } => surface.fill_circle(self.x, self.y, *radius, self.color),
            Shape::Line { x1, y1 } => surface.draw_line(self.x, self.y, *x1, *y1, self.color),
        }
    }
}

#[derive(Debug, Default)]
pub struct Window {
    title: WindowText,
    elements: Vec<UiElement, WINDOW_CAPACITY>,
}

impl Window {
    pub fn new(title: &str) -> Self {
        Self {
            title: clipped(title),
            elements: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&UiElement> {
        self.elements.get(index)
    }

    fn push(&mut self, x: i32, y: i32, color: Rgb565, shape: Shape) -> Option<usize> {
        let element = UiElement {
            x,
            y,
            color,
            shape,
            visible: true,
        };
        if self.elements.push(element).is_err() {
            warn!("Window {:?} is full, element dropped", self.title.as_str());
            return None;
        }
        Some(self.elements.len() - 1)
    }

    /// Add a text element, cut to [`WINDOW_TEXT_LEN`] bytes.
    ///
    /// Returns the element index, or `None` when the window is full.
    pub fn add_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) -> Option<usize> {
        self.push(x, y, color, Shape::Text(clipped(text)))
    }

    pub fn add_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb565,
    ) -> Option<usize> {
        self.push(x, y, color, Shape::Rect { width, height })
    }

    pub fn add_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb565) -> Option<usize> {
        self.push(x, y, color, Shape::Circle { radius })
    }

    pub fn add_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) -> Option<usize> {
        self.push(x0, y0, color, Shape::Line { x1, y1 })
    }

    /// Replace the text of a text element. Returns `false` if `index` is not a
    /// text element.
    pub fn update_text(&mut self, index: usize, text: &str) -> bool {
        match self.elements.get_mut(index) {
            Some(UiElement {
                shape: Shape::Text(current),
                ..
            }) => {
                *current = clipped(text);
                true
            }
            _ => false,
        }
    }

    /// Show or hide an element. Returns `false` for an unknown index.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.elements.get_mut(index) {
            Some(element) => {
                element.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Clear the surface and paint every visible element in insertion order.
    pub fn draw<S: DrawingSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        trace!("Drawing window {:?}", self.title.as_str());
        surface.clear()?;
        for element in self.elements.iter().filter(|e| e.visible) {
            element.draw(surface)?;
        }
        Ok(())
    }
}
