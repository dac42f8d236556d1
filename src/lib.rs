//! tftmenu - touchscreen menu engine for a 3D-printer controller.
//!
//! A `no_std` state machine that turns touch, timer and media events
//! into screen transitions, display drawing calls and printer commands.
//! Hardware stays behind the [`Board`] trait: firmware implements it
//! for the LCD, touch controller, beeper, card readers and command
//! queue, and host tests implement it with a recording mock.
//!
//! Wiring: producers (touch ISR, timers, telemetry task) post into a
//! shared [`EventBus`]; one task owns a [`UiMachine`] and calls
//! [`UiMachine::run_once`] per event. See `tests/machine.rs` for a
//! complete host-side setup.

#![cfg_attr(not(test), no_std)]

/// Debug logging, routed to defmt when the `defmt` feature is on and
/// compiled out otherwise.
macro_rules! ui_debug {
    ($s:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($s $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod gcode;
pub mod geometry;
pub mod machine;
#[cfg(feature = "embedded-graphics")]
pub mod panel;
pub mod queue;
pub mod ui;

pub use board::{Board, Color, DirEntry, StorageDevice, TimerId};
pub use error::Error;
pub use event::{Event, TouchRaw};
pub use geometry::Rect;
pub use machine::UiMachine;
pub use queue::EventBus;
pub use ui::Screen;
