//! Drawing surface that records calls instead of rendering them.

use std::string::String;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;

use crate::surface::DrawingSurface;
use crate::text::BASE_CHAR_WIDTH;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    },
    DrawRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    },
    FillCircle {
        x: i32,
        y: i32,
        r: i32,
        color: Rgb565,
    },
    DrawCircle {
        x: i32,
        y: i32,
        r: i32,
        color: Rgb565,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Rgb565,
        size: u8,
    },
}

impl DrawOp {
    pub fn origin(&self) -> Option<(i32, i32)> {
        match self {
            DrawOp::Text { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub background: Rgb565,
    pub cursor: (i32, i32),
    pub text_color: Rgb565,
    pub text_size: u8,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            background: Rgb565::new(0, 0, 0),
            cursor: (0, 0),
            text_color: Rgb565::new(0, 0, 0),
            text_size: 1,
        }
    }
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .cloned()
            .collect()
    }

    pub fn text_strings(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| op.text().map(String::from))
            .collect()
    }

    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.text() == Some(needle))
    }
}

impl DrawingSurface for RecordingSurface {
    type Error = core::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn set_background(&mut self, color: Rgb565) {
        self.background = color;
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::DrawRect { x, y, w, h, color });
        Ok(())
    }

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::FillCircle { x, y, r, color });
        Ok(())
    }

    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::DrawCircle { x, y, r, color });
        Ok(())
    }

    fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        let (x, y) = self.cursor;
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            color: self.text_color,
            size: self.text_size,
        });
        self.cursor.0 += text.chars().count() as i32 * BASE_CHAR_WIDTH * self.text_size as i32;
        Ok(())
    }
}
