//! Printer command formatting.
//!
//! Fixed-size, newline-terminated ASCII commands handed to the `Board`
//! command queue. The engine only emits these strings; the protocol and
//! its replies live outside this crate.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_COMMAND_LEN;
use crate::ui::{Axis, Heater, JogDir, StepSize};

/// One formatted printer command.
pub type Command = String<MAX_COMMAND_LEN>;

fn literal(text: &str) -> Command {
    let mut cmd = Command::new();
    let _ = cmd.push_str(text);
    cmd
}

/// Relative move of one step along one axis, e.g. `G1 X-0.1`.
pub fn jog_move(axis: Axis, step: StepSize, dir: JogDir) -> Command {
    let mut cmd = Command::new();
    let sign = match dir {
        JogDir::Minus => "-",
        JogDir::Plus => "",
    };
    let _ = write!(cmd, "G1 {}{}{}\n", axis.letter(), sign, step.as_str());
    cmd
}

/// Set a heater target: `M104 T<n> S<temp>` for extruders, `M140
/// S<temp>` for the bed.
pub fn set_heater(heater: Heater, temp: u16) -> Command {
    let mut cmd = Command::new();
    match heater.tool() {
        Some(tool) => {
            let _ = write!(cmd, "M104 T{} S{}\n", tool, temp);
        }
        None => {
            let _ = write!(cmd, "M140 S{}\n", temp);
        }
    }
    cmd
}

/// Request a position report.
pub fn report_position() -> Command {
    literal("M114\n")
}

/// Select a file for printing.
pub fn select_file(name: &str) -> Command {
    let mut cmd = Command::new();
    let _ = write!(cmd, "M23 {}\n", name);
    cmd
}

/// Start or resume the selected print.
pub fn start_print() -> Command {
    literal("M24\n")
}

/// Pause the running print.
pub fn pause_print() -> Command {
    literal("M25\n")
}

/// Abort the running print.
pub fn abort_print() -> Command {
    literal("M26\n")
}

/// Slow extrude used by the filament-feed wizard step.
pub fn feed_filament() -> Command {
    literal("G1 E50 F300\n")
}
