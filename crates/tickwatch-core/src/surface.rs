//! Drawing surface contract and its `embedded-graphics` implementation
//!
//! The UI layer talks to the screen through [`DrawingSurface`], a small
//! TFT-style API: pixel-addressed shapes plus a stateful text cursor. Setting
//! the color, size or cursor sticks until the next call changes it, and
//! `print` moves the cursor past the glyphs it emitted.
//!
//! [`Canvas`] implements the contract on top of any
//! `DrawTarget<Color = Rgb565>`, whether that is the RAM framebuffer, the SDL
//! simulator display, or a panel driver.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};

/// Glyph set rendered by [`Canvas`]. Its 6 px advance is the base width used
/// by [`crate::text::estimate_width`].
pub const GLYPHS: MonoFont<'static> = FONT_6X10;

/// Primitive 2D drawing API consumed by the font and screen layers.
///
/// Coordinates are signed pixels with the origin at the top-left corner,
/// x growing right and y growing down. Circles take a center and a radius.
pub trait DrawingSurface {
    type Error;

    /// Fill the whole surface with its background color.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Color used by later calls to [`clear`](Self::clear).
    fn set_background(&mut self, color: Rgb565);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565)
    -> Result<(), Self::Error>;

    /// One-pixel outline drawn inside the `w` x `h` area.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565)
    -> Result<(), Self::Error>;

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565)
    -> Result<(), Self::Error>;

    fn set_cursor(&mut self, x: i32, y: i32);

    fn set_text_color(&mut self, color: Rgb565);

    /// Set the glyph scale. Zero is treated as one.
    fn set_text_size(&mut self, size: u8);

    /// Emit `text` left to right from the cursor using the current color and
    /// size, leaving the cursor after the last glyph.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Set color, size and cursor, then print.
    ///
    /// The settings are not restored afterwards.
    fn print_text_at_cursor(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        size: u8,
    ) -> Result<(), Self::Error> {
        self.set_text_color(color);
        self.set_text_size(size);
        self.set_cursor(x, y);
        self.print(text)
    }
}

/// [`DrawingSurface`] over an `embedded-graphics` draw target.
pub struct Canvas<D> {
    target: D,
    background: Rgb565,
    cursor: Point,
    text_color: Rgb565,
    text_size: u8,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            background: Rgb565::BLACK,
            cursor: Point::zero(),
            text_color: Rgb565::WHITE,
            text_size: 1,
        }
    }

    /// Color used by [`DrawingSurface::clear`].
    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn text_color(&self) -> Rgb565 {
        self.text_color
    }

    pub fn text_size(&self) -> u8 {
        self.text_size
    }

    fn outline(color: Rgb565) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build()
    }

    fn rect_area(x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Rectangle::new(
            Point::new(x, y),
            Size::new(w as u32, h as u32),
        ))
    }

    fn circle_area(x: i32, y: i32, r: i32) -> Option<Circle> {
        if r < 0 {
            return None;
        }
        Some(Circle::with_center(Point::new(x, y), (2 * r + 1) as u32))
    }
}

impl<D> DrawingSurface for Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.target.clear(self.background)
    }

    fn set_background(&mut self, color: Rgb565) {
        self.background = color;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<(), D::Error> {
        match Self::rect_area(x, y, w, h) {
            Some(area) => self.target.fill_solid(&area, color),
            None => Ok(()),
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<(), D::Error> {
        if let Some(area) = Self::rect_area(x, y, w, h) {
            area.into_styled(Self::outline(color))
                .draw(&mut self.target)?;
        }
        Ok(())
    }

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), D::Error> {
        if let Some(circle) = Self::circle_area(x, y, r) {
            circle
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(&mut self.target)?;
        }
        Ok(())
    }

    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: Rgb565) -> Result<(), D::Error> {
        if let Some(circle) = Self::circle_area(x, y, r) {
            circle
                .into_styled(Self::outline(color))
                .draw(&mut self.target)?;
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn print(&mut self, text: &str) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(&GLYPHS, self.text_color);
        let scale = self.text_size as i32;

        let mut scaled = Scaled {
            parent: &mut self.target,
            origin: self.cursor,
            scale,
        };
        let next = Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(&mut scaled)?;

        self.cursor += next * scale;
        Ok(())
    }
}

/// Draw target adapter that blows every pixel up into a `scale` x `scale`
/// block anchored at `origin`.
struct Scaled<'a, D> {
    parent: &'a mut D,
    origin: Point,
    scale: i32,
}

impl<D> Dimensions for Scaled<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn bounding_box(&self) -> Rectangle {
        let parent = self.parent.bounding_box();
        let offset = parent.top_left - self.origin;
        let scale = self.scale as u32;

        Rectangle::new(
            Point::new(
                offset.x.div_euclid(self.scale),
                offset.y.div_euclid(self.scale),
            ),
            Size::new(
                parent.size.width / scale + 1,
                parent.size.height / scale + 1,
            ),
        )
    }
}

impl<D> DrawTarget for Scaled<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let origin = self.origin;
        let scale = self.scale;

        if scale == 1 {
            return self.parent.draw_iter(
                pixels
                    .into_iter()
                    .map(|Pixel(point, color)| Pixel(origin + point, color)),
            );
        }

        let block = Size::new_equal(scale as u32);
        for Pixel(point, color) in pixels {
            self.parent
                .fill_solid(&Rectangle::new(origin + point * scale, block), color)?;
        }
        Ok(())
    }
}
