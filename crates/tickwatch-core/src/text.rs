//! Text measurement and aligned drawing
//!
//! Widths are estimated, not measured: every glyph is assumed to advance
//! [`BASE_CHAR_WIDTH`] pixels times the font's size multiplier. That is exact
//! for the mono glyphs [`Canvas`](crate::surface::Canvas) renders and cheap
//! enough to call on every frame.

use embedded_graphics::pixelcolor::Rgb565;
use log::trace;

use crate::fonts::FontKey;
use crate::surface::DrawingSurface;

/// Glyph advance at size multiplier 1.
pub const BASE_CHAR_WIDTH: i32 = 6;

/// Horizontal placement relative to the reference x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Text starts at x
    #[default]
    Left,
    /// Text is centered on x
    Center,
    /// Text ends at x
    Right,
}

/// Estimated rendered width of `text` in pixels.
///
/// Returns 0 for missing or empty text and for a font that does not resolve.
/// Unlike [`size_multiplier`](crate::fonts::size_multiplier), there is no
/// fallback size here.
pub fn estimate_width<'a, K: FontKey>(text: impl Into<Option<&'a str>>, font: K) -> i32 {
    let (Some(text), Some(font)) = (text.into(), font.resolve()) else {
        return 0;
    };

    let size = font.descriptor().size_multiplier as i32;
    width_of_chars(text.chars().count(), size)
}

/// Width of `count` glyphs at `size`, saturating at `i32::MAX`.
fn width_of_chars(count: usize, size: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(BASE_CHAR_WIDTH * size)
}

/// Longest prefix of `src` that is at most `max_len` bytes and ends on a
/// char boundary.
pub fn clip_to_boundary(src: &str, max_len: usize) -> &str {
    let mut end = src.len().min(max_len);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    &src[..end]
}

/// Left edge of a run of `width` pixels aligned at `x`.
///
/// Centering divides with Rust's truncating `/`; widths are never negative,
/// so this is the same as rounding down.
pub fn aligned_origin_x(x: i32, width: i32, alignment: TextAlignment) -> i32 {
    match alignment {
        TextAlignment::Left => x,
        TextAlignment::Center => x - width / 2,
        TextAlignment::Right => x - width,
    }
}

/// Draw `text` at `(x, y)` with the given font, alignment and color.
///
/// Missing text or an unresolvable font is skipped without drawing. The
/// surface keeps the text color, size and cursor this call sets.
pub fn draw_aligned<'a, S, K>(
    surface: &mut S,
    x: i32,
    y: i32,
    text: impl Into<Option<&'a str>>,
    font: K,
    alignment: TextAlignment,
    color: Rgb565,
) -> Result<(), S::Error>
where
    S: DrawingSurface,
    K: FontKey,
{
    let text = text.into();
    let (Some(text), Some(font)) = (text, font.resolve()) else {
        trace!("Skipping text draw at ({}, {}): no text or unknown font", x, y);
        return Ok(());
    };

    let origin_x = match alignment {
        TextAlignment::Left => x,
        _ => aligned_origin_x(x, estimate_width(text, font), alignment),
    };

    surface.print_text_at_cursor(
        origin_x,
        y,
        text,
        color,
        font.descriptor().size_multiplier,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{FontId, size_multiplier};
    use crate::testing::{DrawOp, RecordingSurface};
    use embedded_graphics::prelude::*;

    #[test]
    fn test_empty_and_missing_text_have_no_width() {
        for font in FontId::ALL {
            assert_eq!(estimate_width("", font), 0);
            assert_eq!(estimate_width(None::<&str>, font), 0);
        }
    }

    #[test]
    fn test_width_is_linear_in_length_and_size() {
        let text = "Steps: 8,421";
        for font in FontId::ALL {
            assert_eq!(
                estimate_width(text, font),
                text.len() as i32 * 6 * size_multiplier(font) as i32
            );
        }
        assert_eq!(estimate_width("12:00", FontId::Bitham42Bold), 5 * 6 * 4);
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let text = "Caf\u{e9} \u{2603}";
        assert_eq!(text.len(), 9);
        assert_eq!(estimate_width(text, FontId::Gothic14), 6 * 6);
        assert_eq!(estimate_width(text, FontId::Bitham42Bold), 6 * 6 * 4);
    }

    #[test]
    fn test_width_saturates_instead_of_wrapping() {
        assert_eq!(width_of_chars(usize::MAX, 4), i32::MAX);
        assert_eq!(width_of_chars(i32::MAX as usize / 6, 4), i32::MAX);
        assert_eq!(width_of_chars(1000, 4), 24_000);
    }

    #[test]
    fn test_unknown_font_has_no_width() {
        assert_eq!(estimate_width("hello", FontId::COUNT as u8), 0);
        assert_eq!(estimate_width("hello", 42u8), 0);
        // Valid raw index behaves like the typed id
        assert_eq!(estimate_width("hello", 2u8), 5 * 6 * 2);
    }

    #[test]
    fn test_clip_to_boundary() {
        assert_eq!(clip_to_boundary("short", 34), "short");
        assert_eq!(clip_to_boundary("abcdef", 3), "abc");
        assert_eq!(clip_to_boundary("aé", 2), "a");
        assert_eq!(clip_to_boundary("", 0), "");
    }

    #[test]
    fn test_origin_for_each_alignment() {
        assert_eq!(aligned_origin_x(100, 40, TextAlignment::Left), 100);
        assert_eq!(aligned_origin_x(100, 40, TextAlignment::Center), 80);
        assert_eq!(aligned_origin_x(100, 40, TextAlignment::Right), 60);
        // Odd widths round toward zero
        assert_eq!(aligned_origin_x(100, 41, TextAlignment::Center), 80);
    }

    #[test]
    fn test_draw_aligned_centers_using_estimate() {
        let mut surface = RecordingSurface::default();
        draw_aligned(
            &mut surface,
            64,
            50,
            "12:00:00",
            FontId::Gothic24,
            TextAlignment::Center,
            Rgb565::WHITE,
        )
        .unwrap();

        // 8 chars * 6 * 2 = 96 wide, so the run starts at 64 - 48
        assert_eq!(
            surface.texts(),
            vec![DrawOp::Text {
                x: 16,
                y: 50,
                text: "12:00:00".into(),
                color: Rgb565::WHITE,
                size: 2,
            }]
        );
    }

    #[test]
    fn test_draw_aligned_right() {
        let mut surface = RecordingSurface::default();
        draw_aligned(
            &mut surface,
            120,
            5,
            "78%",
            FontId::Gothic14,
            TextAlignment::Right,
            Rgb565::GREEN,
        )
        .unwrap();

        assert_eq!(surface.texts()[0].origin(), Some((102, 5)));
    }

    #[test]
    fn test_draw_aligned_skips_missing_text_and_unknown_font() {
        let mut surface = RecordingSurface::default();
        draw_aligned(
            &mut surface,
            0,
            0,
            None::<&str>,
            FontId::Gothic14,
            TextAlignment::Left,
            Rgb565::WHITE,
        )
        .unwrap();
        draw_aligned(
            &mut surface,
            0,
            0,
            "hidden",
            FontId::COUNT as u8,
            TextAlignment::Center,
            Rgb565::WHITE,
        )
        .unwrap();

        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_draw_aligned_leaves_surface_state_set() {
        let mut surface = RecordingSurface::default();
        draw_aligned(
            &mut surface,
            10,
            10,
            "Hi",
            FontId::Gothic28,
            TextAlignment::Left,
            Rgb565::YELLOW,
        )
        .unwrap();

        assert_eq!(surface.text_color, Rgb565::YELLOW);
        assert_eq!(surface.text_size, 3);
        assert_eq!(surface.cursor, (10 + 2 * 6 * 3, 10));
    }
}
