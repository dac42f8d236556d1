//! Ambient UI state shared by all screens.
//!
//! Owned by the state-machine driver and mutated only by screen
//! handlers; the telemetry fields are written by the external telemetry
//! collaborator between events and are read-only for screens. Exactly
//! one task ever executes handler code, which is what makes this safe.

use heapless::{String, Vec};

use crate::board::StorageDevice;
use crate::config::{BROWSER_PAGE_SIZE, DEFAULT_CHANGE_TEMP, MAX_FILENAME_LEN, MAX_STATUS_LEN};
use crate::ui::{Axis, Heater, StepSize};

/// Jog screen state.
#[derive(Clone, Copy, Debug)]
pub struct JogState {
    /// Highlighted axis, target of the -/+ nudge buttons.
    pub axis: Axis,
    pub step: StepSize,
}

/// Temperature screens state.
#[derive(Clone, Copy, Debug)]
pub struct TempState {
    /// Staged slider value; takes effect only on Apply.
    pub pending: u16,
    /// Confirmed targets, indexed by [`Heater::index`].
    pub target: [u16; 3],
}

/// File browser state.
#[derive(Clone, Debug)]
pub struct BrowserState {
    pub device: StorageDevice,
    /// First visible entry index; always within
    /// `[0, max(0, total - page))`.
    pub offset: usize,
    /// Total non-directory entries seen by the last successful scan.
    pub total: usize,
    /// Names filling the visible slots, in positional order.
    pub entries: Vec<String<MAX_FILENAME_LEN>, BROWSER_PAGE_SIZE>,
}

/// Filament-change wizard state.
#[derive(Clone, Copy, Debug)]
pub struct FilamentState {
    /// Extruder chosen for the change.
    pub extruder: Heater,
    /// Preheat temperature; applied directly by the slider, no staging.
    pub change_temp: u16,
}

/// Print screen state.
#[derive(Clone, Debug, Default)]
pub struct PrintState {
    pub file: String<MAX_FILENAME_LEN>,
    pub paused: bool,
}

/// Values owned by the external telemetry collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Telemetry {
    /// Measured heater temperatures, indexed by [`Heater::index`].
    pub current_temp: [i16; 3],
    /// Axis positions in millimetres, indexed by [`Axis::index`].
    pub position: [f32; 3],
}

/// Process-wide UI state, passed to every handler by the driver.
#[derive(Clone, Debug)]
pub struct UiContext {
    pub jog: JogState,
    pub temp: TempState,
    pub browser: BrowserState,
    pub filament: FilamentState,
    pub print: PrintState,
    pub telemetry: Telemetry,
    /// Latest printer status line, drawn on `ShowStatus`.
    pub status: String<MAX_STATUS_LEN>,
    /// Gates print-start actions while a job is running.
    pub is_printing: bool,
    /// Most recent translated touch point, consumed by drag actions.
    pub last_touch: (u16, u16),
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            jog: JogState {
                axis: Axis::X,
                step: StepSize::Ten,
            },
            temp: TempState {
                pending: 0,
                target: [0; 3],
            },
            browser: BrowserState {
                device: StorageDevice::Sd,
                offset: 0,
                total: 0,
                entries: Vec::new(),
            },
            filament: FilamentState {
                extruder: Heater::Extruder1,
                change_temp: DEFAULT_CHANGE_TEMP,
            },
            print: PrintState::default(),
            telemetry: Telemetry::default(),
            status: String::new(),
            is_printing: false,
            last_touch: (0, 0),
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
