//! Horizontal value sliders (temperature, distance).
//!
//! Geometry law shared by all sliders: a touch at `tx` inside the track
//! span maps to `clamp(max * (tx - left) / (right - left), 0, max)`.
//! The fill boundary sits at `left + span * value / max`, with a
//! fixed-width handle band just past it.

use crate::board::{Board, Color};
use crate::config::{SLIDER_HANDLE_WIDTH, SLIDER_TRACK_LEFT, SLIDER_TRACK_RIGHT};
use crate::geometry::Rect;

/// Map a translated touch X coordinate to a slider value in `0..=max`.
pub fn value_from_touch(tx: u16, max: u16) -> u16 {
    let tx = tx.clamp(SLIDER_TRACK_LEFT, SLIDER_TRACK_RIGHT);
    let span = (SLIDER_TRACK_RIGHT - SLIDER_TRACK_LEFT) as u32;
    ((max as u32 * (tx - SLIDER_TRACK_LEFT) as u32) / span) as u16
}

/// X coordinate of the fill boundary for `value` of `max`.
pub fn fill_boundary(value: u16, max: u16) -> u16 {
    let span = (SLIDER_TRACK_RIGHT - SLIDER_TRACK_LEFT) as u32;
    SLIDER_TRACK_LEFT + (span * value.min(max) as u32 / max.max(1) as u32) as u16
}

/// Draw the track centered on `y`: a one-pixel frame, the fill up to
/// the boundary, and the handle band.
pub fn draw<B: Board>(
    board: &mut B,
    y: u16,
    value: u16,
    max: u16,
    track_color: Color,
    handle_color: Color,
) {
    let left = SLIDER_TRACK_LEFT;
    let right = SLIDER_TRACK_RIGHT;
    let boundary = fill_boundary(value, max);

    // Frame
    board.fill_rect(Rect::new(left - 2, y - 17, right + 2, y - 16), track_color);
    board.fill_rect(Rect::new(left - 2, y + 16, right + 2, y + 17), track_color);
    board.fill_rect(Rect::new(left - 2, y - 17, left - 1, y + 17), track_color);
    board.fill_rect(Rect::new(right + 1, y - 17, right + 2, y + 17), track_color);

    // Fill
    if boundary > left {
        board.fill_rect(Rect::new(left, y - 15, boundary, y + 15), track_color);
    }

    // Handle band just past the boundary
    let handle_end = (boundary + SLIDER_HANDLE_WIDTH).min(right + 2);
    if handle_end > boundary {
        board.fill_rect(Rect::new(boundary, y - 20, handle_end, y + 20), handle_color);
    }
}
