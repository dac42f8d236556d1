//! Screen-space rectangles and point containment.

/// Axis-aligned rectangle in screen pixel space.
///
/// Invariant by construction convention: `x1 < x2`, `y1 < y2`.
/// Containment is inclusive on all four edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Rect {
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        debug_assert!(x1 < x2 && y1 < y2);
        Self { x1, y1, x2, y2 }
    }

    /// Inclusive containment test.
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Center point, used for label placement.
    pub const fn center(&self) -> (u16, u16) {
        (
            self.x1 + (self.x2 - self.x1) / 2,
            self.y1 + (self.y2 - self.y1) / 2,
        )
    }
}
