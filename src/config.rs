//! Application-wide constants and compile-time configuration.
//!
//! All screen geometry, timing parameters and temperature limits live
//! here so they can be tuned in one place.

// Event queue

/// Capacity of the bounded UI event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Timeout a `Board` implementation should apply to downstream enqueues
/// (printer command queue, filesystem calls) before giving up (ms).
/// A timed-out enqueue is dropped, never retried.
pub const DOWNSTREAM_TIMEOUT_MS: u32 = 1000;

// Timers

/// Inactivity timeout before the UI returns to the Home screen (seconds).
pub const IDLE_TIMEOUT_SECS: u64 = 60;

/// Period of the printer status poll while in a movement-aware screen
/// (seconds).
pub const STATUS_POLL_PERIOD_SECS: u64 = 3;

// Screen geometry (landscape panel)

pub const SCREEN_WIDTH: u16 = 320;
pub const SCREEN_HEIGHT: u16 = 240;

/// Height of the status strip at the bottom of the screen (px).
pub const STATUS_LINE_HEIGHT: u16 = 9;

// Slider geometry

/// Horizontal span of a slider track in screen pixels.
pub const SLIDER_TRACK_LEFT: u16 = 5;
pub const SLIDER_TRACK_RIGHT: u16 = 315;

/// Width of the slider handle band (px).
pub const SLIDER_HANDLE_WIDTH: u16 = 20;

// Temperatures

/// Maximum settable extruder temperature (degrees C).
pub const MAX_EXTRUDER_TEMP: u16 = 270;

/// Maximum settable heated-bed temperature (degrees C).
pub const MAX_BED_TEMP: u16 = 120;

/// Default filament-change preheat temperature (degrees C).
pub const DEFAULT_CHANGE_TEMP: u16 = 220;

// File browser

/// Number of file entries shown per page.
pub const BROWSER_PAGE_SIZE: usize = 4;

/// Maximum file name length kept for display (characters).
pub const MAX_FILENAME_LEN: usize = 24;

// Commands / status

/// Maximum length of a formatted printer command.
pub const MAX_COMMAND_LEN: usize = 32;

/// Maximum length of the printer status line.
pub const MAX_STATUS_LEN: usize = 48;
