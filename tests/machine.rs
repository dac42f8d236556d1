//! End-to-end tests driving the menu engine through a recording board.

use critical_section as _;

use tftmenu::board::{Board, Color, DirEntry, StorageDevice, TimerId};
use tftmenu::error::Error;
use tftmenu::event::{Event, TouchRaw};
use tftmenu::geometry::Rect;
use tftmenu::queue::EventBus;
use tftmenu::ui::{Axis, Heater, Screen, StepSize};
use tftmenu::UiMachine;

#[derive(Default)]
struct MockBoard {
    ops: Vec<String>,
    commands: Vec<String>,
    beeps: usize,
    mounted: [bool; 2],
    mount_fails: bool,
    scan_fails: bool,
    files: Vec<&'static str>,
    timer_running: [bool; 2],
}

impl MockBoard {
    fn new() -> Self {
        Self::default()
    }

    fn with_files(files: &[&'static str]) -> Self {
        Self {
            files: files.to_vec(),
            ..Self::default()
        }
    }

    fn clears(&self) -> usize {
        self.ops.iter().filter(|op| *op == "clear").count()
    }

    fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| op.strip_prefix("text "))
            .collect()
    }

    fn device_index(device: StorageDevice) -> usize {
        match device {
            StorageDevice::Sd => 0,
            StorageDevice::Usb => 1,
        }
    }

    fn timer_index(timer: TimerId) -> usize {
        match timer {
            TimerId::Idle => 0,
            TimerId::StatusPoll => 1,
        }
    }

    fn idle_running(&self) -> bool {
        self.timer_running[0]
    }

    fn poll_running(&self) -> bool {
        self.timer_running[1]
    }
}

impl Board for MockBoard {
    fn clear_screen(&mut self) {
        self.ops.push("clear".into());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops
            .push(format!("fill {},{},{},{} {:04x}", rect.x1, rect.y1, rect.x2, rect.y2, color));
    }

    fn draw_text(&mut self, _x: u16, _y: u16, _font_size: u8, text: &str, _color: Color) {
        self.ops.push(format!("text {}", text));
    }

    fn translate_touch(&mut self, raw_x: u16, raw_y: u16) -> (u16, u16) {
        (raw_x, raw_y)
    }

    fn short_beep(&mut self) {
        self.beeps += 1;
    }

    fn mount(&mut self, device: StorageDevice) -> Result<(), Error> {
        if self.mount_fails {
            return Err(Error::Mount);
        }
        self.mounted[Self::device_index(device)] = true;
        Ok(())
    }

    fn unmount(&mut self, device: StorageDevice) {
        self.mounted[Self::device_index(device)] = false;
    }

    fn is_mounted(&self, device: StorageDevice) -> bool {
        self.mounted[Self::device_index(device)]
    }

    fn scan_dir(
        &mut self,
        _device: StorageDevice,
        visit: &mut dyn FnMut(DirEntry<'_>),
    ) -> Result<(), Error> {
        if self.scan_fails {
            return Err(Error::DirUnavailable);
        }
        visit(DirEntry {
            name: "system",
            is_dir: true,
        });
        for name in &self.files {
            visit(DirEntry {
                name,
                is_dir: false,
            });
        }
        Ok(())
    }

    fn enqueue_command(&mut self, command: &str) -> Result<(), Error> {
        self.commands.push(command.to_string());
        Ok(())
    }

    fn timer_start(&mut self, timer: TimerId) {
        self.timer_running[Self::timer_index(timer)] = true;
    }

    fn timer_stop(&mut self, timer: TimerId) {
        self.timer_running[Self::timer_index(timer)] = false;
    }
}

fn tap(machine: &mut UiMachine<MockBoard>, bus: &EventBus, x: u16, y: u16) {
    bus.post(Event::TouchDown(TouchRaw::pack(x, y)));
    bus.post(Event::TouchUp(TouchRaw::pack(x, y)));
    machine.run_until_idle();
}

fn touch_down(machine: &mut UiMachine<MockBoard>, bus: &EventBus, x: u16, y: u16) {
    bus.post(Event::TouchDown(TouchRaw::pack(x, y)));
    machine.run_until_idle();
}

fn boot(board: MockBoard, bus: &EventBus) -> UiMachine<'_, MockBoard> {
    let mut machine = UiMachine::new(bus, board);
    machine.run_until_idle();
    machine
}

/// Home -> Setup via the bottom-right button.
fn goto_setup(machine: &mut UiMachine<MockBoard>, bus: &EventBus) {
    tap(machine, bus, 235, 200);
    assert_eq!(machine.current_screen(), Screen::Setup);
}

#[test]
fn boot_mounts_sd_and_lands_on_home() {
    let bus = EventBus::new();
    let machine = boot(MockBoard::new(), &bus);

    assert_eq!(machine.current_screen(), Screen::Home);
    assert!(machine.board().is_mounted(StorageDevice::Sd));
    assert!(!machine.board().idle_running());
    assert!(!machine.board().poll_running());
    assert!(machine.board().texts().contains(&"Ready"));
}

#[test]
fn boot_survives_a_failed_mount() {
    let bus = EventBus::new();
    let board = MockBoard {
        mount_fails: true,
        ..MockBoard::new()
    };
    let machine = boot(board, &bus);
    assert_eq!(machine.current_screen(), Screen::Home);
}

#[test]
fn touch_up_transitions_and_beeps_once() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);

    bus.post(Event::TouchDown(TouchRaw::pack(235, 200)));
    machine.run_until_idle();
    assert_eq!(machine.current_screen(), Screen::Home);
    assert_eq!(machine.board().beeps, 0);

    bus.post(Event::TouchUp(TouchRaw::pack(235, 200)));
    machine.run_until_idle();
    assert_eq!(machine.current_screen(), Screen::Setup);
    assert_eq!(machine.board().beeps, 1);
}

#[test]
fn touch_outside_all_buttons_does_nothing() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);

    tap(&mut machine, &bus, 160, 160);
    assert_eq!(machine.current_screen(), Screen::Home);
    assert_eq!(machine.board().beeps, 0);
}

#[test]
fn transition_init_overtakes_stale_events() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);

    // The touch-up's synthesized Init must be consumed before the
    // status poll that was already queued behind the touch.
    bus.post(Event::TouchUp(TouchRaw::pack(235, 200)));
    bus.post(Event::ShowStatus);

    machine.run_once();
    assert_eq!(machine.current_screen(), Screen::Setup);
    let clears_before = machine.board().clears();

    machine.run_once();
    // The entry redraw, not the status strip.
    assert_eq!(machine.board().clears(), clears_before + 1);
    machine.run_until_idle();
}

#[test]
fn media_insert_mounts_and_redraws() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    let clears_before = machine.board().clears();

    bus.post(Event::MediaInserted(StorageDevice::Usb));
    machine.run_until_idle();

    assert!(machine.board().is_mounted(StorageDevice::Usb));
    assert_eq!(machine.current_screen(), Screen::Home);
    // Redraw, not a fresh Init.
    assert_eq!(machine.board().clears(), clears_before);
}

#[test]
fn media_remove_unmounts() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    assert!(machine.board().is_mounted(StorageDevice::Sd));

    bus.post(Event::MediaRemoved(StorageDevice::Sd));
    machine.run_until_idle();
    assert!(!machine.board().is_mounted(StorageDevice::Sd));
}

#[test]
fn status_line_is_drawn_on_poll() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    let _ = machine.context_mut().status.push_str("T:25 B:24");

    bus.post(Event::ShowStatus);
    machine.run_until_idle();
    assert!(machine.board().texts().contains(&"T:25 B:24"));
}

#[test]
fn jog_entry_swaps_idle_for_position_polling() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    assert!(machine.board().idle_running());

    tap(&mut machine, &bus, 280, 200); // Move
    assert_eq!(machine.current_screen(), Screen::Jog);
    assert!(!machine.board().idle_running());
    assert!(machine.board().poll_running());
    assert_eq!(machine.board().commands, vec!["M114\n"]);
}

#[test]
fn jog_poll_requests_a_fresh_position() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 280, 200);

    bus.post(Event::ShowStatus);
    machine.run_until_idle();
    assert_eq!(machine.board().commands, vec!["M114\n", "M114\n"]);
}

#[test]
fn jog_axis_select_is_a_toggle_not_a_reentry() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 280, 200);

    tap(&mut machine, &bus, 120, 50); // Y axis button
    assert_eq!(machine.current_screen(), Screen::Jog);
    assert_eq!(machine.context().jog.axis, Axis::Y);
    // No second position request: the toggle skips entry side effects.
    assert_eq!(machine.board().commands, vec!["M114\n"]);
}

#[test]
fn jog_nudge_sends_a_relative_move() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 280, 200);

    tap(&mut machine, &bus, 120, 50); // select Y
    tap(&mut machine, &bus, 150, 200); // "-"
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("G1 Y-10\n"));

    tap(&mut machine, &bus, 260, 200); // "+"
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("G1 Y10\n"));
}

#[test]
fn jog_step_cycles_through_the_ladder() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 280, 200);
    assert_eq!(machine.context().jog.step, StepSize::Ten);

    tap(&mut machine, &bus, 280, 50); // step button
    assert_eq!(machine.context().jog.step, StepSize::Tenth);
    tap(&mut machine, &bus, 150, 200); // "-"
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("G1 X-0.1\n"));
}

#[test]
fn slider_drag_stages_without_sending() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200); // Temp
    assert_eq!(machine.current_screen(), Screen::TemperatureMenu);

    tap(&mut machine, &bus, 50, 50); // extruder 1
    assert_eq!(machine.current_screen(), Screen::TempSlider(Heater::Extruder1));
    assert_eq!(machine.context().temp.pending, 0);

    touch_down(&mut machine, &bus, 160, 125); // mid-track
    assert_eq!(machine.current_screen(), Screen::TempSlider(Heater::Extruder1));
    assert_eq!(machine.context().temp.pending, 135);
    assert!(machine.board().commands.is_empty());
}

#[test]
fn slider_apply_commits_the_staged_value() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200);
    tap(&mut machine, &bus, 50, 50);
    touch_down(&mut machine, &bus, 160, 125);

    tap(&mut machine, &bus, 265, 200); // Apply
    assert_eq!(machine.current_screen(), Screen::TemperatureMenu);
    assert_eq!(machine.board().commands, vec!["M104 T0 S135\n"]);
    assert_eq!(machine.context().temp.target[0], 135);
}

#[test]
fn slider_cancel_forces_the_heater_off() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200);
    tap(&mut machine, &bus, 50, 50);
    touch_down(&mut machine, &bus, 160, 125);

    tap(&mut machine, &bus, 150, 200); // Cancel
    assert_eq!(machine.current_screen(), Screen::TemperatureMenu);
    assert_eq!(machine.board().commands, vec!["M104 T0 S0\n"]);
    assert_eq!(machine.context().temp.target[0], 0);
}

#[test]
fn bed_slider_respects_the_lower_limit() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200);
    tap(&mut machine, &bus, 260, 50); // bed

    touch_down(&mut machine, &bus, 315, 125); // full right
    assert_eq!(machine.context().temp.pending, 120);

    tap(&mut machine, &bus, 265, 200); // Apply
    assert_eq!(machine.board().commands, vec!["M140 S120\n"]);
}

#[test]
fn idle_timeout_returns_home_without_commands() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);

    bus.post(Event::IdleTimeout);
    machine.run_until_idle();
    assert_eq!(machine.current_screen(), Screen::Home);
    assert!(machine.board().commands.is_empty());
    assert!(!machine.board().idle_running());
}

#[test]
fn browser_pages_through_a_long_listing() {
    let files = [
        "a.gco", "b.gco", "c.gco", "d.gco", "e.gco", "f.gco", "g.gco", "h.gco", "i.gco", "j.gco",
    ];
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::with_files(&files), &bus);

    tap(&mut machine, &bus, 85, 200); // Print
    assert_eq!(machine.current_screen(), Screen::FileBrowser);
    assert!(machine.board().idle_running());
    let names: Vec<&str> = machine.context().browser.entries.iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ["a.gco", "b.gco", "c.gco", "d.gco"]);
    assert_eq!(machine.context().browser.total, 10);

    tap(&mut machine, &bus, 260, 200); // Next
    assert_eq!(machine.context().browser.offset, 4);
    let names: Vec<&str> = machine.context().browser.entries.iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ["e.gco", "f.gco", "g.gco", "h.gco"]);

    tap(&mut machine, &bus, 260, 200); // Next clamps to the tail window
    assert_eq!(machine.context().browser.offset, 6);
    let names: Vec<&str> = machine.context().browser.entries.iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ["g.gco", "h.gco", "i.gco", "j.gco"]);

    tap(&mut machine, &bus, 140, 200); // Prev snaps to the page boundary
    assert_eq!(machine.context().browser.offset, 4);
    tap(&mut machine, &bus, 140, 200);
    assert_eq!(machine.context().browser.offset, 0);
}

#[test]
fn browser_shows_an_empty_page_when_the_scan_fails() {
    let bus = EventBus::new();
    let board = MockBoard {
        scan_fails: true,
        ..MockBoard::new()
    };
    let mut machine = boot(board, &bus);

    tap(&mut machine, &bus, 85, 200);
    assert!(machine.context().browser.entries.is_empty());

    // Tapping an empty slot stays put and starts nothing.
    tap(&mut machine, &bus, 100, 35);
    assert_eq!(machine.current_screen(), Screen::FileBrowser);
    assert!(machine.board().commands.is_empty());
}

#[test]
fn browser_device_switch_mounts_and_rewinds() {
    let files = ["a.gco", "b.gco", "c.gco", "d.gco", "e.gco", "f.gco"];
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::with_files(&files), &bus);

    tap(&mut machine, &bus, 85, 200);
    tap(&mut machine, &bus, 260, 200); // Next
    assert_eq!(machine.context().browser.offset, 2);

    tap(&mut machine, &bus, 280, 85); // USB
    assert_eq!(machine.context().browser.device, StorageDevice::Usb);
    assert_eq!(machine.context().browser.offset, 0);
    assert!(machine.board().is_mounted(StorageDevice::Usb));
}

#[test]
fn selecting_a_file_starts_the_print() {
    let files = ["first.gco", "second.gco"];
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::with_files(&files), &bus);

    tap(&mut machine, &bus, 85, 200);
    tap(&mut machine, &bus, 100, 70); // slot 1
    assert_eq!(machine.current_screen(), Screen::Print);
    assert!(machine.context().is_printing);
    assert_eq!(machine.board().commands, vec!["M23 second.gco\n", "M24\n"]);
    assert!(!machine.board().idle_running());
}

#[test]
fn print_pause_and_resume() {
    let files = ["part.gco"];
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::with_files(&files), &bus);
    tap(&mut machine, &bus, 85, 200);
    tap(&mut machine, &bus, 100, 35); // slot 0

    tap(&mut machine, &bus, 40, 200); // Pause
    assert!(machine.context().print.paused);
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("M25\n"));

    tap(&mut machine, &bus, 40, 200); // Resume
    assert!(!machine.context().print.paused);
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("M24\n"));
}

#[test]
fn print_stop_aborts_and_returns_home() {
    let files = ["part.gco"];
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::with_files(&files), &bus);
    tap(&mut machine, &bus, 85, 200);
    tap(&mut machine, &bus, 100, 35);

    tap(&mut machine, &bus, 260, 200); // Stop
    assert_eq!(machine.current_screen(), Screen::Home);
    assert!(!machine.context().is_printing);
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("M26\n"));
}

#[test]
fn slider_cancel_is_hidden_while_printing() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200);
    machine.context_mut().is_printing = true;
    tap(&mut machine, &bus, 50, 50);
    assert_eq!(machine.current_screen(), Screen::TempSlider(Heater::Extruder1));

    // The Cancel rectangle is not in the table while printing.
    tap(&mut machine, &bus, 150, 200);
    assert_eq!(machine.current_screen(), Screen::TempSlider(Heater::Extruder1));
    assert!(machine.board().commands.is_empty());
}

#[test]
fn filament_wizard_heats_feeds_and_cools() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);

    tap(&mut machine, &bus, 120, 200); // Filament
    assert_eq!(machine.current_screen(), Screen::FilamentMenu);

    tap(&mut machine, &bus, 260, 200); // Extruder 2
    assert_eq!(machine.current_screen(), Screen::FilamentPreheat);
    assert_eq!(machine.board().commands, vec!["M104 T1 S220\n"]);

    tap(&mut machine, &bus, 85, 200); // Continue
    assert_eq!(machine.current_screen(), Screen::FilamentReplace);

    tap(&mut machine, &bus, 85, 200); // Continue
    assert_eq!(machine.current_screen(), Screen::FilamentFeed);
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("G1 E50 F300\n"));

    tap(&mut machine, &bus, 165, 200); // Finish
    assert_eq!(machine.current_screen(), Screen::Setup);
    assert_eq!(machine.board().commands.last().map(String::as_str), Some("M104 T1 S0\n"));
}

#[test]
fn filament_wizard_entry_stops_the_idle_timer() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    assert!(machine.board().idle_running());

    tap(&mut machine, &bus, 120, 200); // Filament
    assert_eq!(machine.current_screen(), Screen::FilamentMenu);
    assert!(!machine.board().idle_running());

    tap(&mut machine, &bus, 120, 200); // Extruder 1
    assert_eq!(machine.current_screen(), Screen::FilamentPreheat);
    assert!(!machine.board().idle_running());

    tap(&mut machine, &bus, 85, 200); // Continue
    assert_eq!(machine.current_screen(), Screen::FilamentReplace);
    assert!(!machine.board().idle_running());

    tap(&mut machine, &bus, 85, 200); // Continue
    assert_eq!(machine.current_screen(), Screen::FilamentFeed);
    assert!(!machine.board().idle_running());

    tap(&mut machine, &bus, 165, 200); // Finish
    assert_eq!(machine.current_screen(), Screen::Setup);
    assert!(machine.board().idle_running());
}

#[test]
fn slider_repaint_clears_the_full_handle_span() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 202, 200);
    tap(&mut machine, &bus, 50, 50);

    // Drag to the far right: the handle band reaches two pixels past
    // the track, then drag back down.
    touch_down(&mut machine, &bus, 315, 125);
    assert_eq!(machine.context().temp.pending, 270);
    touch_down(&mut machine, &bus, 160, 125);
    assert_eq!(machine.context().temp.pending, 135);

    // The repaint clears out past the right frame edge, leaving no
    // handle residue.
    assert!(machine
        .board()
        .ops
        .iter()
        .any(|op| op == "fill 5,103,317,147 0000"));
}

#[test]
fn filament_preheat_slider_adjusts_the_change_temperature() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 120, 200);
    assert_eq!(machine.context().filament.change_temp, 220);

    touch_down(&mut machine, &bus, 160, 125);
    assert_eq!(machine.context().filament.change_temp, 135);
    assert_eq!(machine.current_screen(), Screen::FilamentMenu);

    tap(&mut machine, &bus, 120, 200); // Extruder 1
    assert_eq!(machine.board().commands, vec!["M104 T0 S135\n"]);
}

#[test]
fn wizard_cancel_returns_to_setup() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    goto_setup(&mut machine, &bus);
    tap(&mut machine, &bus, 120, 200);
    tap(&mut machine, &bus, 120, 200); // Extruder 1

    tap(&mut machine, &bus, 235, 200); // Cancel
    assert_eq!(machine.current_screen(), Screen::Setup);
}

#[test]
fn toggle_event_is_a_plain_redraw() {
    let bus = EventBus::new();
    let mut machine = boot(MockBoard::new(), &bus);
    let clears_before = machine.board().clears();

    bus.post(Event::Toggle);
    machine.run_until_idle();
    assert_eq!(machine.current_screen(), Screen::Home);
    assert_eq!(machine.board().clears(), clears_before);
}
