//! Optional embedded-graphics glue for [`Board`](crate::Board)
//! implementations.
//!
//! The engine itself only speaks in [`Rect`] and raw RGB565 words; these
//! helpers let a firmware board map those calls onto any
//! [`DrawTarget`] without repeating the conversion boilerplate.
//! Rectangles are treated as half-open in both axes, matching the
//! one-pixel frame strips the slider draws.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::board::Color;
use crate::geometry::Rect;

/// Reinterpret a palette word as an embedded-graphics color.
pub fn rgb(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color))
}

/// Fill a screen rectangle.
pub fn fill_rect<D>(target: &mut D, rect: Rect, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::with_corners(
        Point::new(rect.x1 as i32, rect.y1 as i32),
        Point::new(rect.x2 as i32 - 1, rect.y2 as i32 - 1),
    )
    .into_styled(PrimitiveStyle::with_fill(rgb(color)))
    .draw(target)
}

/// Clear the whole panel.
pub fn clear<D>(target: &mut D, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(rgb(color))
}

/// Draw a text run with its top-left corner at `(x, y)`. Font sizes of
/// 16 and up use the large face.
pub fn draw_text<D>(
    target: &mut D,
    x: u16,
    y: u16,
    font_size: u8,
    text: &str,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let font = if font_size >= 16 {
        &FONT_10X20
    } else {
        &FONT_6X10
    };
    let style = MonoTextStyle::new(font, rgb(color));
    Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Top)
        .draw(target)
        .map(|_| ())
}
