//! Unified error type for tftmenu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! None of these is fatal: the state machine degrades to stale or
//! default screen content and recovers on the next navigation.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage
    /// Mounting a storage device failed.
    Mount,

    /// Opening or reading a directory failed; the file browser shows an
    /// empty page instead.
    DirUnavailable,

    // Printer command queue
    /// The downstream command queue did not accept the command within
    /// its timeout; the command is dropped.
    CommandDropped,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,

    /// Operation timed out.
    Timeout,
}
