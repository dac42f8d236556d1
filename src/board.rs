//! The `Board` port: every hardware collaborator the menu engine talks
//! to, collected behind one trait.
//!
//! Firmware implements this for its LCD, touch calibration, beeper,
//! card readers, printer command queue and timers. Host tests implement
//! it with a recording mock. All calls are synchronous; the only ones
//! allowed to block are the downstream enqueues (filesystem, command
//! queue), each bounded by [`crate::config::DOWNSTREAM_TIMEOUT_MS`].

use crate::error::Error;
use crate::geometry::Rect;

/// RGB565 color.
pub type Color = u16;

/// Panel palette (RGB565).
pub mod color {
    use super::Color;

    pub const BLACK: Color = 0x0000;
    pub const WHITE: Color = 0xffff;
    pub const RED: Color = 0xf800;
    pub const GREEN: Color = 0x07e0;
    pub const ORANGE: Color = 0xfd20;
    pub const DANUBE: Color = 0x6498;
}

/// Removable storage device the file browser can list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageDevice {
    Sd,
    Usb,
}

impl StorageDevice {
    pub const fn label(self) -> &'static str {
        match self {
            StorageDevice::Sd => "SD",
            StorageDevice::Usb => "USB",
        }
    }
}

/// Named timers the screens start and stop.
///
/// A stopped timer never posts; that is the whole cancellation model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Fires [`crate::Event::IdleTimeout`] after
    /// [`crate::config::IDLE_TIMEOUT_SECS`] of inactivity.
    Idle,
    /// Fires [`crate::Event::ShowStatus`] every
    /// [`crate::config::STATUS_POLL_PERIOD_SECS`].
    StatusPoll,
}

/// One directory entry as reported by the filesystem collaborator.
#[derive(Clone, Copy, Debug)]
pub struct DirEntry<'a> {
    pub name: &'a str,
    pub is_dir: bool,
}

/// Hardware collaborators of the menu engine.
pub trait Board {
    // Drawing (assumed non-blocking)

    fn clear_screen(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, x: u16, y: u16, font_size: u8, text: &str, color: Color);

    // Touch

    /// Map a raw controller sample to screen coordinates for the current
    /// orientation. Calibration is opaque to the engine.
    fn translate_touch(&mut self, raw_x: u16, raw_y: u16) -> (u16, u16);

    // Sound

    /// Short audible acknowledgment of a touch-up on an active button.
    fn short_beep(&mut self);

    // Storage

    fn mount(&mut self, device: StorageDevice) -> Result<(), Error>;
    fn unmount(&mut self, device: StorageDevice);
    fn is_mounted(&self, device: StorageDevice) -> bool;

    /// Single linear pass over the device's root directory, calling
    /// `visit` once per entry in storage order.
    fn scan_dir(
        &mut self,
        device: StorageDevice,
        visit: &mut dyn FnMut(DirEntry<'_>),
    ) -> Result<(), Error>;

    // Printer command queue

    /// Enqueue a formatted ASCII command for the printer, bounded by the
    /// downstream timeout. `Err` means the command was dropped; the
    /// engine never retries and never awaits a reply.
    fn enqueue_command(&mut self, command: &str) -> Result<(), Error>;

    // Timers

    fn timer_start(&mut self, timer: TimerId);
    fn timer_stop(&mut self, timer: TimerId);
}
