//! User interface vocabulary: screens, axes, step ladder, heaters.
//!
//! The "current screen" of the state machine is a value of the closed
//! [`Screen`] enum. Besides the full menu screens it contains the small
//! action handlers (axis select, step cycle, slider drag, pagination,
//! apply/cancel): touching a button transitions to the action, which
//! performs its side effect on the front-queued `Init` and immediately
//! toggles back to its parent with a `Redraw`.

pub mod browser;
pub mod button;
pub mod context;
pub mod slider;

use crate::board::StorageDevice;
use crate::config::{MAX_BED_TEMP, MAX_EXTRUDER_TEMP};

/// Printer axis selectable on the jog screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn letter(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Direction of a jog nudge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogDir {
    Minus,
    Plus,
}

/// Jog step ladder in millimetres: 0.1, 1, 5, 10, wrapping.
///
/// The 100 mm tier of an earlier firmware revision is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepSize {
    Tenth,
    One,
    Five,
    Ten,
}

impl StepSize {
    /// Next ladder tier, wrapping back to 0.1 mm.
    pub const fn cycle(self) -> Self {
        match self {
            StepSize::Tenth => StepSize::One,
            StepSize::One => StepSize::Five,
            StepSize::Five => StepSize::Ten,
            StepSize::Ten => StepSize::Tenth,
        }
    }

    /// Decimal text used in both the step label and jog commands.
    pub const fn as_str(self) -> &'static str {
        match self {
            StepSize::Tenth => "0.1",
            StepSize::One => "1",
            StepSize::Five => "5",
            StepSize::Ten => "10",
        }
    }

    pub const fn value_mm(self) -> f32 {
        match self {
            StepSize::Tenth => 0.1,
            StepSize::One => 1.0,
            StepSize::Five => 5.0,
            StepSize::Ten => 10.0,
        }
    }
}

/// Heat target: one of the two extruders or the heated bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Heater {
    Extruder1,
    Extruder2,
    Bed,
}

impl Heater {
    /// Index into the per-heater state arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tool number for `M104 T<n>`; the bed has none (`M140`).
    pub const fn tool(self) -> Option<u8> {
        match self {
            Heater::Extruder1 => Some(0),
            Heater::Extruder2 => Some(1),
            Heater::Bed => None,
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Heater::Extruder1 => "E1",
            Heater::Extruder2 => "E2",
            Heater::Bed => "Bed",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Heater::Extruder1 => "Extruder 1 temperature",
            Heater::Extruder2 => "Extruder 2 temperature",
            Heater::Bed => "Bed temperature",
        }
    }

    /// Upper bound of the settable temperature range.
    pub const fn max_temp(self) -> u16 {
        match self {
            Heater::Extruder1 | Heater::Extruder2 => MAX_EXTRUDER_TEMP,
            Heater::Bed => MAX_BED_TEMP,
        }
    }
}

/// Every handler the state machine can make current.
///
/// The first group are full screens; the second are action handlers
/// reached only through button tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    // Full screens
    Boot,
    Home,
    Setup,
    Jog,
    TemperatureMenu,
    TempSlider(Heater),
    FileBrowser,
    Print,
    FilamentMenu,
    FilamentPreheat,
    FilamentReplace,
    FilamentFeed,

    // Action handlers
    JogAxis(Axis),
    JogStepCycle,
    JogNudge(JogDir),
    SliderDrag(Heater),
    TempApply(Heater),
    TempCancel(Heater),
    BrowserPageUp,
    BrowserPageDown,
    BrowserDevice(StorageDevice),
    SelectFile(u8),
    PrintPauseToggle,
    PrintCancel,
    FilamentSelect(Heater),
    FilamentSliderDrag,
    FilamentDone,
}
