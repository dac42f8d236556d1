//! Declarative button tables and hit-testing.
//!
//! Each screen owns an ordered table of rectangular hit-regions. Tables
//! are rebuilt on every handler invocation; highlight colors and
//! dynamic labels derive from ambient state at build time, so no table
//! outlives its event.

use crate::board::Color;
use crate::geometry::Rect;
use crate::ui::{Heater, Screen};

/// Dynamic label kinds, rendered by the driver from ambient state at
/// the owning rectangle's center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DynLabel {
    /// Current jog step, e.g. `0.1 mm`.
    JogStep,
    /// Live axis positions.
    JogCoords,
    /// One-line summary of all three heaters.
    HeaterSummary,
    /// `cur/target` readout for one heater.
    HeaterReadout(Heater),
    /// The staged slider temperature, e.g. `135 C`.
    PendingTemp,
    /// The filament-change preheat temperature.
    FilamentTemp,
    /// Temperature slider track for one heater.
    TempTrack(Heater),
    /// Filament-change preheat slider track.
    FilamentTrack,
    /// File name in one browser slot (may be empty).
    FileSlot(u8),
    /// Name of the file being printed.
    PrintFile,
}

/// Button label: static text, a dynamic label, or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    None,
    Text(&'static str),
    Dynamic(DynLabel),
}

/// One interactive region of a screen.
///
/// Handlers are transition targets; a button without handlers is a
/// passive label area. Regions within a table are disjoint by
/// convention (first match wins, not enforced).
#[derive(Clone, Copy, Debug)]
pub struct Button {
    pub rect: Rect,
    pub color: Color,
    pub label: Label,
    pub on_touch_down: Option<Screen>,
    pub on_touch_up: Option<Screen>,
}

impl Button {
    pub const fn new(rect: Rect, color: Color, label: Label) -> Self {
        Self {
            rect,
            color,
            label,
            on_touch_down: None,
            on_touch_up: None,
        }
    }

    pub const fn on_up(mut self, target: Screen) -> Self {
        self.on_touch_up = Some(target);
        self
    }

    pub const fn on_down(mut self, target: Screen) -> Self {
        self.on_touch_down = Some(target);
        self
    }
}

/// First button in `table` whose rectangle contains `(x, y)`, or none.
pub fn hit_test(table: &[Button], x: u16, y: u16) -> Option<&Button> {
    table.iter().find(|b| b.rect.contains(x, y))
}
