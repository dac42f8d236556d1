//! Typed events consumed by the screen state machine.
//!
//! Events are produced by the touch controller, the media-detect lines,
//! the two timers and the telemetry task, and consumed strictly in FIFO
//! order by a single dispatcher. Screens synthesize their own follow-up
//! `Init`/`Redraw` events, which jump the queue (front insertion) so a
//! transition target always observes its entry event before any stale
//! external event.

use crate::board::StorageDevice;

/// Raw touch sample: two 15-bit coordinate fields packed into a `u32`,
/// X in the high half, Y in the low half. This is the layout the touch
/// controller ISR delivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchRaw(u32);

impl TouchRaw {
    pub const fn pack(x: u16, y: u16) -> Self {
        Self((((x & 0x7fff) as u32) << 16) | ((y & 0x7fff) as u32))
    }

    pub const fn raw_x(self) -> u16 {
        ((self.0 >> 16) & 0x7fff) as u16
    }

    pub const fn raw_y(self) -> u16 {
        (self.0 & 0x7fff) as u16
    }
}

/// One UI event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Enter the current screen: full state reset and full redraw.
    Init,

    /// State-preserving partial refresh of the current screen.
    Redraw,

    /// Legacy alias of [`Event::Redraw`] still posted by some external
    /// producers; the dispatcher treats it identically.
    Toggle,

    /// Stylus/finger down at the given raw position.
    TouchDown(TouchRaw),

    /// Stylus/finger up at the given raw position.
    TouchUp(TouchRaw),

    /// A storage device was inserted.
    MediaInserted(StorageDevice),

    /// A storage device was removed.
    MediaRemoved(StorageDevice),

    /// Posted by the status-poll timer; refreshes the status strip and
    /// lets movement-aware screens request a fresh position report.
    ShowStatus,

    /// Posted by the idle timer; the driver returns to the Home screen.
    IdleTimeout,
}
