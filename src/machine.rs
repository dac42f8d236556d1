//! Screen state machine driver, event dispatcher and default handler.
//!
//! Exactly one task runs [`UiMachine::run_once`], draining the shared
//! [`EventBus`] one event at a time. Handlers execute to completion
//! without suspension; transitions synthesize a priority `Init` (full
//! entry) or `Redraw` (state-preserving refresh) so the target screen
//! always observes its own continuation before stale external events.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::board::{color, Board, StorageDevice, TimerId};
use crate::config::{
    BROWSER_PAGE_SIZE, MAX_FILENAME_LEN, MAX_STATUS_LEN, SCREEN_HEIGHT, SCREEN_WIDTH,
    STATUS_LINE_HEIGHT,
};
use crate::event::Event;
use crate::gcode;
use crate::geometry::Rect;
use crate::queue::EventBus;
use crate::ui::button::{hit_test, Button, DynLabel, Label};
use crate::ui::context::UiContext;
use crate::ui::{browser, slider, Axis, Heater, JogDir, Screen};

/// Pixel rectangle of the staged-temperature readout on slider screens.
const SLIDER_VALUE_RECT: Rect = Rect::new(190, 70, 240, 99);

/// Pixel rectangle cleared when repainting a slider track. Covers the
/// handle overhang above, below and past the right frame edge (the
/// handle band reaches two pixels beyond the track).
const SLIDER_CLEAR_RECT: Rect = Rect::new(5, 103, 317, 147);

/// Center of the slider track area.
const SLIDER_CENTER: (u16, u16) = (160, 125);

/// The menu engine: current screen, ambient state, board and bus.
pub struct UiMachine<'a, B: Board> {
    bus: &'a EventBus,
    board: B,
    ctx: UiContext,
    current: Screen,
}

impl<'a, B: Board> UiMachine<'a, B> {
    /// Create the machine on the Boot screen and queue its entry event.
    pub fn new(bus: &'a EventBus, board: B) -> Self {
        bus.post_front(Event::Init);
        Self {
            bus,
            board,
            ctx: UiContext::new(),
            current: Screen::Boot,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// Mutable ambient state, for the telemetry collaborator (measured
    /// temperatures, axis positions, status line).
    pub fn context_mut(&mut self) -> &mut UiContext {
        &mut self.ctx
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Process one queued event. Returns `false` when the queue is empty.
    pub fn run_once(&mut self) -> bool {
        match self.bus.take() {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Drain the queue.
    pub fn run_until_idle(&mut self) {
        while self.run_once() {}
    }

    fn dispatch(&mut self, event: Event) {
        // The idle timer only runs in parked/menu screens; when it
        // fires, the answer is always the same regardless of screen.
        if matches!(event, Event::IdleTimeout) {
            self.full_transition(Screen::Home);
            return;
        }

        match self.current {
            Screen::Boot => self.boot(event),
            Screen::Home => self.home(event),
            Screen::Setup => self.setup(event),
            Screen::Jog => self.jog(event),
            Screen::TemperatureMenu => self.temperature_menu(event),
            Screen::TempSlider(heater) => self.temp_slider(heater, event),
            Screen::FileBrowser => self.file_browser(event),
            Screen::Print => self.print_screen(event),
            Screen::FilamentMenu => self.filament_menu(event),
            Screen::FilamentPreheat => self.filament_preheat(event),
            Screen::FilamentReplace => self.filament_replace(event),
            Screen::FilamentFeed => self.filament_feed(event),

            Screen::JogAxis(axis) => self.act_jog_axis(axis, event),
            Screen::JogStepCycle => self.act_jog_step_cycle(event),
            Screen::JogNudge(dir) => self.act_jog_nudge(dir, event),
            Screen::SliderDrag(heater) => self.act_slider_drag(heater, event),
            Screen::TempApply(heater) => self.act_temp_apply(heater, event),
            Screen::TempCancel(heater) => self.act_temp_cancel(heater, event),
            Screen::BrowserPageUp => self.act_browser_page_up(event),
            Screen::BrowserPageDown => self.act_browser_page_down(event),
            Screen::BrowserDevice(device) => self.act_browser_device(device, event),
            Screen::SelectFile(slot) => self.act_select_file(slot, event),
            Screen::PrintPauseToggle => self.act_print_pause_toggle(event),
            Screen::PrintCancel => self.act_print_cancel(event),
            Screen::FilamentSelect(heater) => self.act_filament_select(heater, event),
            Screen::FilamentSliderDrag => self.act_filament_slider_drag(event),
            Screen::FilamentDone => self.act_filament_done(event),
        }
    }

    // Transition primitives

    /// Enter a logically new screen: full reset and full redraw.
    fn full_transition(&mut self, next: Screen) {
        ui_debug!("transition -> {:?}", next);
        self.current = next;
        self.bus.post_front(Event::Init);
    }

    /// Return to a screen after a sub-action: partial refresh, entry
    /// side effects (timers, snapshots, scroll reset) are not repeated.
    fn toggle_transition(&mut self, next: Screen) {
        self.current = next;
        self.bus.post_front(Event::Redraw);
    }

    fn send(&mut self, command: gcode::Command) {
        if self.board.enqueue_command(command.as_str()).is_err() {
            ui_debug!("printer command dropped");
        }
    }

    // Default button-table event handling, reusable by every screen.

    fn handle_default(&mut self, table: &[Button], event: Event) {
        match event {
            Event::Init => {
                // Screens that manage their own drawing pass an empty
                // table.
                if table.is_empty() {
                    return;
                }
                self.board.clear_screen();
                self.draw_table(table);
            }

            Event::Redraw | Event::Toggle => {
                self.draw_table(table);
            }

            Event::MediaInserted(device) => {
                if self.board.mount(device).is_err() {
                    ui_debug!("mount failed for {:?}", device);
                }
                self.bus.post_front(Event::Redraw);
            }

            Event::MediaRemoved(device) => {
                self.board.unmount(device);
                self.bus.post_front(Event::Redraw);
            }

            Event::TouchDown(raw) | Event::TouchUp(raw) => {
                let (x, y) = self.board.translate_touch(raw.raw_x(), raw.raw_y());
                self.ctx.last_touch = (x, y);

                let is_up = matches!(event, Event::TouchUp(_));
                let target = hit_test(table, x, y).and_then(|b| {
                    if is_up {
                        b.on_touch_up
                    } else {
                        b.on_touch_down
                    }
                });
                if let Some(next) = target {
                    if is_up {
                        self.board.short_beep();
                    }
                    self.full_transition(next);
                }
            }

            Event::ShowStatus => {
                self.draw_status_line();
            }

            _ => {}
        }
    }

    fn draw_status_line(&mut self) {
        let strip = Rect::new(
            0,
            SCREEN_HEIGHT - STATUS_LINE_HEIGHT,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
        );
        self.board.fill_rect(strip, color::BLACK);
        let status = self.ctx.status.clone();
        if !status.is_empty() {
            self.board.draw_text(
                10,
                SCREEN_HEIGHT - STATUS_LINE_HEIGHT,
                8,
                status.as_str(),
                color::WHITE,
            );
        }
    }

    fn draw_table(&mut self, table: &[Button]) {
        for button in table {
            self.draw_button(button);
        }
    }

    fn draw_button(&mut self, button: &Button) {
        self.board.fill_rect(button.rect, button.color);
        let (cx, cy) = button.rect.center();
        match button.label {
            Label::None => {}
            Label::Text(text) => self.draw_centered(cx, cy, text),
            Label::Dynamic(label) => self.render_label(label, cx, cy),
        }
    }

    /// Size-16 text centered on a point (8x16 glyphs).
    fn draw_centered(&mut self, cx: u16, cy: u16, text: &str) {
        let x = cx.saturating_sub(text.len() as u16 * 4);
        let y = cy.saturating_sub(8);
        self.board.draw_text(x, y, 16, text, color::WHITE);
    }

    fn render_label(&mut self, label: DynLabel, cx: u16, cy: u16) {
        let mut text: String<MAX_STATUS_LEN> = String::new();
        match label {
            DynLabel::JogStep => {
                let _ = write!(text, "{} mm", self.ctx.jog.step.as_str());
            }
            DynLabel::JogCoords => {
                let p = self.ctx.telemetry.position;
                let _ = write!(text, "X:{:.1} Y:{:.1} Z:{:.1}", p[0], p[1], p[2]);
            }
            DynLabel::HeaterSummary => {
                let t = self.ctx.telemetry.current_temp;
                let _ = write!(text, "E1:{} E2:{} Bed:{}", t[0], t[1], t[2]);
            }
            DynLabel::HeaterReadout(heater) => {
                let cur = self.ctx.telemetry.current_temp[heater.index()];
                let target = self.ctx.temp.target[heater.index()];
                let _ = write!(text, "{} {}/{}", heater.short_name(), cur, target);
            }
            DynLabel::PendingTemp => {
                let _ = write!(text, "{:>3} C", self.ctx.temp.pending);
            }
            DynLabel::FilamentTemp => {
                let _ = write!(text, "{:>3} C", self.ctx.filament.change_temp);
            }
            DynLabel::TempTrack(heater) => {
                let pending = self.ctx.temp.pending;
                slider::draw(
                    &mut self.board,
                    cy,
                    pending,
                    heater.max_temp(),
                    color::DANUBE,
                    color::RED,
                );
                return;
            }
            DynLabel::FilamentTrack => {
                let temp = self.ctx.filament.change_temp;
                slider::draw(
                    &mut self.board,
                    cy,
                    temp,
                    Heater::Extruder1.max_temp(),
                    color::DANUBE,
                    color::RED,
                );
                return;
            }
            DynLabel::FileSlot(slot) => {
                if let Some(name) = self.ctx.browser.entries.get(slot as usize) {
                    let _ = text.push_str(name.as_str());
                }
            }
            DynLabel::PrintFile => {
                let _ = text.push_str(self.ctx.print.file.as_str());
            }
        }
        if !text.is_empty() {
            self.draw_centered(cx, cy, text.as_str());
        }
    }

    // Screen handlers

    /// Power-on screen: bring up default storage, then enter Home.
    fn boot(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.clear_screen();
            if self.board.mount(StorageDevice::Sd).is_err() {
                ui_debug!("SD mount failed at boot");
            }
            self.full_transition(Screen::Home);
        } else {
            self.handle_default(&[], event);
        }
    }

    fn home(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
            self.board.timer_stop(TimerId::StatusPoll);
            self.ctx.is_printing = false;
        }

        let table = [
            Button::new(Rect::new(0, 0, 320, 110), color::BLACK, Label::Text("Ready")),
            Button::new(
                Rect::new(0, 110, 320, 150),
                color::BLACK,
                Label::Dynamic(DynLabel::HeaterSummary),
            ),
            Button::new(
                Rect::new(20, 170, 150, 230),
                color::DANUBE,
                Label::Text("Print"),
            )
            .on_up(Screen::FileBrowser),
            Button::new(
                Rect::new(170, 170, 300, 230),
                color::DANUBE,
                Label::Text("Setup"),
            )
            .on_up(Screen::Setup),
        ];
        self.handle_default(&table, event);
    }

    fn setup(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_start(TimerId::Idle);
            self.board.timer_stop(TimerId::StatusPoll);
        }

        let table = [
            Button::new(Rect::new(0, 0, 320, 60), color::BLACK, Label::Text("Setup")),
            Button::new(
                Rect::new(0, 110, 320, 150),
                color::BLACK,
                Label::Dynamic(DynLabel::HeaterSummary),
            ),
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::Home),
            Button::new(
                Rect::new(85, 170, 160, 230),
                color::ORANGE,
                Label::Text("Filament"),
            )
            .on_up(Screen::FilamentMenu),
            Button::new(
                Rect::new(165, 170, 240, 230),
                color::ORANGE,
                Label::Text("Temp"),
            )
            .on_up(Screen::TemperatureMenu),
            Button::new(
                Rect::new(245, 170, 315, 230),
                color::ORANGE,
                Label::Text("Move"),
            )
            .on_up(Screen::Jog),
        ];
        self.handle_default(&table, event);
    }

    fn jog(&mut self, event: Event) {
        match event {
            Event::Init => {
                // Jogging is time-critical: no idle return, but keep the
                // position display fresh.
                self.board.timer_stop(TimerId::Idle);
                self.board.timer_start(TimerId::StatusPoll);
                self.send(gcode::report_position());
            }
            Event::ShowStatus => {
                self.send(gcode::report_position());
            }
            _ => {}
        }

        let axis = self.ctx.jog.axis;
        let axis_color = |a: Axis| {
            if axis == a {
                color::GREEN
            } else {
                color::ORANGE
            }
        };

        let table = [
            Button::new(Rect::new(5, 20, 80, 80), axis_color(Axis::X), Label::Text("X"))
                .on_up(Screen::JogAxis(Axis::X)),
            Button::new(Rect::new(85, 20, 160, 80), axis_color(Axis::Y), Label::Text("Y"))
                .on_up(Screen::JogAxis(Axis::Y)),
            Button::new(Rect::new(165, 20, 240, 80), axis_color(Axis::Z), Label::Text("Z"))
                .on_up(Screen::JogAxis(Axis::Z)),
            Button::new(
                Rect::new(245, 20, 315, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::JogStep),
            )
            .on_up(Screen::JogStepCycle),
            Button::new(
                Rect::new(20, 100, 300, 130),
                color::BLACK,
                Label::Dynamic(DynLabel::JogCoords),
            ),
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::Setup),
            Button::new(Rect::new(85, 170, 210, 230), color::ORANGE, Label::Text("-"))
                .on_up(Screen::JogNudge(JogDir::Minus)),
            Button::new(Rect::new(215, 170, 315, 230), color::ORANGE, Label::Text("+"))
                .on_up(Screen::JogNudge(JogDir::Plus)),
        ];
        self.handle_default(&table, event);
    }

    fn temperature_menu(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_start(TimerId::Idle);
        }

        let table = [
            Button::new(
                Rect::new(5, 20, 100, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Extruder1)),
            )
            .on_up(Screen::TempSlider(Heater::Extruder1)),
            Button::new(
                Rect::new(110, 20, 205, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Extruder2)),
            )
            .on_up(Screen::TempSlider(Heater::Extruder2)),
            Button::new(
                Rect::new(215, 20, 315, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Bed)),
            )
            .on_up(Screen::TempSlider(Heater::Bed)),
            Button::new(
                Rect::new(20, 100, 300, 130),
                color::BLACK,
                Label::Text("Select heater"),
            ),
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::Setup),
        ];
        self.handle_default(&table, event);
    }

    fn temp_slider(&mut self, heater: Heater, event: Event) {
        if matches!(event, Event::Init) {
            // Stage the confirmed target; nothing is sent until Apply.
            self.ctx.temp.pending = self.ctx.temp.target[heater.index()];
        }

        // Cancelling heat mid-print would ruin the job, so the Cancel
        // edge is only offered while parked.
        let cancel_allowed = !self.ctx.is_printing;

        let mut table: Vec<Button, 7> = Vec::new();
        let _ = table.push(Button::new(
            Rect::new(20, 30, 300, 69),
            color::BLACK,
            Label::Text(heater.title()),
        ));
        let _ = table.push(Button::new(
            Rect::new(20, 70, 186, 99),
            color::BLACK,
            Label::Text("Set temperature"),
        ));
        let _ = table.push(Button::new(
            SLIDER_VALUE_RECT,
            color::BLACK,
            Label::Dynamic(DynLabel::PendingTemp),
        ));
        let _ = table.push(
            Button::new(
                Rect::new(5, 107, 315, 143),
                color::BLACK,
                Label::Dynamic(DynLabel::TempTrack(heater)),
            )
            .on_down(Screen::SliderDrag(heater)),
        );
        let _ = table.push(
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::TemperatureMenu),
        );
        if cancel_allowed {
            let _ = table.push(
                Button::new(
                    Rect::new(85, 170, 210, 230),
                    color::ORANGE,
                    Label::Text("Cancel"),
                )
                .on_up(Screen::TempCancel(heater)),
            );
        }
        let _ = table.push(
            Button::new(
                Rect::new(215, 170, 315, 230),
                color::ORANGE,
                Label::Text("Apply"),
            )
            .on_up(Screen::TempApply(heater)),
        );
        self.handle_default(&table, event);
    }

    fn file_browser(&mut self, event: Event) {
        match event {
            Event::Init => {
                self.board.timer_start(TimerId::Idle);
                self.ctx.browser.offset = 0;
                self.scan_browser_page();
            }
            Event::Redraw | Event::Toggle => {
                // Keep the offset; pick up external changes lazily.
                self.scan_browser_page();
            }
            _ => {}
        }

        let device = self.ctx.browser.device;
        let device_color = |d: StorageDevice| {
            if device == d {
                color::GREEN
            } else {
                color::ORANGE
            }
        };

        let mut table: Vec<Button, 9> = Vec::new();
        for slot in 0..BROWSER_PAGE_SIZE as u8 {
            let y1 = 20 + slot as u16 * 35;
            let _ = table.push(
                Button::new(
                    Rect::new(5, y1, 250, y1 + 30),
                    color::BLACK,
                    Label::Dynamic(DynLabel::FileSlot(slot)),
                )
                .on_up(Screen::SelectFile(slot)),
            );
        }
        let _ = table.push(
            Button::new(
                Rect::new(255, 20, 315, 60),
                device_color(StorageDevice::Sd),
                Label::Text("SD"),
            )
            .on_up(Screen::BrowserDevice(StorageDevice::Sd)),
        );
        let _ = table.push(
            Button::new(
                Rect::new(255, 65, 315, 105),
                device_color(StorageDevice::Usb),
                Label::Text("USB"),
            )
            .on_up(Screen::BrowserDevice(StorageDevice::Usb)),
        );
        let _ = table.push(
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::Home),
        );
        let _ = table.push(
            Button::new(
                Rect::new(85, 170, 195, 230),
                color::ORANGE,
                Label::Text("Prev"),
            )
            .on_up(Screen::BrowserPageUp),
        );
        let _ = table.push(
            Button::new(
                Rect::new(200, 170, 315, 230),
                color::ORANGE,
                Label::Text("Next"),
            )
            .on_up(Screen::BrowserPageDown),
        );
        self.handle_default(&table, event);
    }

    /// Single linear pass over the current device: fill the visible
    /// slots and count the total. A failed scan keeps the previous
    /// total and shows an empty page - absence of entries is the error
    /// signal.
    fn scan_browser_page(&mut self) {
        let UiMachine { board, ctx, .. } = self;
        let offset = ctx.browser.offset;
        let device = ctx.browser.device;
        let entries = &mut ctx.browser.entries;
        entries.clear();

        let mut idx = 0usize;
        let result = board.scan_dir(device, &mut |entry| {
            if entry.is_dir {
                return;
            }
            if idx >= offset && idx < offset + BROWSER_PAGE_SIZE {
                let mut name: String<MAX_FILENAME_LEN> = String::new();
                for c in entry.name.chars().take(MAX_FILENAME_LEN) {
                    let _ = name.push(c);
                }
                let _ = entries.push(name);
            }
            idx += 1;
        });

        match result {
            Ok(()) => ctx.browser.total = idx,
            Err(_) => ui_debug!("directory scan failed on {:?}", device),
        }
    }

    fn print_screen(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
            self.ctx.is_printing = true;
            self.ctx.print.paused = false;
            let file = self.ctx.print.file.clone();
            self.send(gcode::select_file(file.as_str()));
            self.send(gcode::start_print());
        }

        let pause_label = if self.ctx.print.paused {
            "Resume"
        } else {
            "Pause"
        };

        let table = [
            Button::new(
                Rect::new(5, 20, 100, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Extruder1)),
            ),
            Button::new(
                Rect::new(110, 20, 205, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Extruder2)),
            ),
            Button::new(
                Rect::new(215, 20, 315, 80),
                color::ORANGE,
                Label::Dynamic(DynLabel::HeaterReadout(Heater::Bed)),
            ),
            Button::new(
                Rect::new(20, 100, 300, 130),
                color::BLACK,
                Label::Dynamic(DynLabel::PrintFile),
            ),
            Button::new(
                Rect::new(5, 170, 80, 230),
                color::ORANGE,
                Label::Text(pause_label),
            )
            .on_up(Screen::PrintPauseToggle),
            Button::new(
                Rect::new(85, 170, 210, 230),
                color::ORANGE,
                Label::Text("Filament"),
            )
            .on_up(Screen::FilamentMenu),
            Button::new(
                Rect::new(215, 170, 315, 230),
                color::RED,
                Label::Text("Stop"),
            )
            .on_up(Screen::PrintCancel),
        ];
        self.handle_default(&table, event);
    }

    fn filament_menu(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
        }

        let table = [
            Button::new(
                Rect::new(20, 30, 300, 69),
                color::BLACK,
                Label::Text("Filament change"),
            ),
            Button::new(
                Rect::new(20, 70, 186, 99),
                color::BLACK,
                Label::Text("Heat temperature"),
            ),
            Button::new(
                SLIDER_VALUE_RECT,
                color::BLACK,
                Label::Dynamic(DynLabel::FilamentTemp),
            ),
            Button::new(
                Rect::new(5, 107, 315, 143),
                color::BLACK,
                Label::Dynamic(DynLabel::FilamentTrack),
            )
            .on_down(Screen::FilamentSliderDrag),
            Button::new(Rect::new(5, 170, 80, 230), color::RED, Label::Text("Back"))
                .on_up(Screen::Setup),
            Button::new(
                Rect::new(85, 170, 210, 230),
                color::ORANGE,
                Label::Text("Extruder 1"),
            )
            .on_up(Screen::FilamentSelect(Heater::Extruder1)),
            Button::new(
                Rect::new(215, 170, 315, 230),
                color::ORANGE,
                Label::Text("Extruder 2"),
            )
            .on_up(Screen::FilamentSelect(Heater::Extruder2)),
        ];
        self.handle_default(&table, event);
    }

    fn filament_preheat(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
        }

        let table = [
            Button::new(
                Rect::new(0, 0, 320, 70),
                color::BLACK,
                Label::Text("Heating extruder"),
            ),
            Button::new(
                Rect::new(20, 70, 186, 99),
                color::BLACK,
                Label::Text("Target temperature"),
            ),
            Button::new(
                SLIDER_VALUE_RECT,
                color::BLACK,
                Label::Dynamic(DynLabel::FilamentTemp),
            ),
            Button::new(
                Rect::new(0, 100, 320, 116),
                color::BLACK,
                Label::Text("When heated, press Continue"),
            ),
            Button::new(
                Rect::new(0, 116, 320, 132),
                color::BLACK,
                Label::Text("to retract the old filament"),
            ),
            Button::new(
                Rect::new(20, 170, 150, 230),
                color::DANUBE,
                Label::Text("Continue"),
            )
            .on_up(Screen::FilamentReplace),
            Button::new(
                Rect::new(170, 170, 300, 230),
                color::DANUBE,
                Label::Text("Cancel"),
            )
            .on_up(Screen::Setup),
        ];
        self.handle_default(&table, event);
    }

    fn filament_replace(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
        }

        let table = [
            Button::new(
                Rect::new(0, 0, 320, 70),
                color::BLACK,
                Label::Text("Old filament retracted"),
            ),
            Button::new(
                Rect::new(0, 100, 320, 116),
                color::BLACK,
                Label::Text("Insert the new filament and"),
            ),
            Button::new(
                Rect::new(0, 116, 320, 132),
                color::BLACK,
                Label::Text("press Continue to feed it"),
            ),
            Button::new(
                Rect::new(20, 170, 150, 230),
                color::DANUBE,
                Label::Text("Continue"),
            )
            .on_up(Screen::FilamentFeed),
            Button::new(
                Rect::new(170, 170, 300, 230),
                color::DANUBE,
                Label::Text("Cancel"),
            )
            .on_up(Screen::Setup),
        ];
        self.handle_default(&table, event);
    }

    fn filament_feed(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.board.timer_stop(TimerId::Idle);
            self.send(gcode::feed_filament());
        }

        let table = [
            Button::new(
                Rect::new(0, 0, 320, 70),
                color::BLACK,
                Label::Text("Feeding filament"),
            ),
            Button::new(
                Rect::new(0, 100, 320, 116),
                color::BLACK,
                Label::Text("When plastic extrudes cleanly,"),
            ),
            Button::new(
                Rect::new(0, 116, 320, 132),
                color::BLACK,
                Label::Text("press Finish to stop and cool"),
            ),
            Button::new(
                Rect::new(100, 170, 230, 230),
                color::DANUBE,
                Label::Text("Finish"),
            )
            .on_up(Screen::FilamentDone),
        ];
        self.handle_default(&table, event);
    }

    // Action handlers: side effect on the front-queued Init, then back
    // to the parent with a Redraw.

    fn act_jog_axis(&mut self, axis: Axis, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.jog.axis = axis;
        }
        self.toggle_transition(Screen::Jog);
    }

    fn act_jog_step_cycle(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.jog.step = self.ctx.jog.step.cycle();
        }
        self.toggle_transition(Screen::Jog);
    }

    fn act_jog_nudge(&mut self, dir: JogDir, event: Event) {
        if matches!(event, Event::Init) {
            let jog = self.ctx.jog;
            self.send(gcode::jog_move(jog.axis, jog.step, dir));
        }
        self.toggle_transition(Screen::Jog);
    }

    fn act_slider_drag(&mut self, heater: Heater, event: Event) {
        if matches!(event, Event::Init) {
            let value = slider::value_from_touch(self.ctx.last_touch.0, heater.max_temp());
            if value != self.ctx.temp.pending {
                self.ctx.temp.pending = value;
                self.repaint_slider(DynLabel::PendingTemp, DynLabel::TempTrack(heater));
            }
        }
        self.toggle_transition(Screen::TempSlider(heater));
    }

    fn act_filament_slider_drag(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            let max = Heater::Extruder1.max_temp();
            let value = slider::value_from_touch(self.ctx.last_touch.0, max);
            if value != self.ctx.filament.change_temp {
                self.ctx.filament.change_temp = value;
                self.repaint_slider(DynLabel::FilamentTemp, DynLabel::FilamentTrack);
            }
        }
        self.toggle_transition(Screen::FilamentMenu);
    }

    /// Repaint only the value readout and the track, not the screen.
    fn repaint_slider(&mut self, value_label: DynLabel, track_label: DynLabel) {
        self.board.fill_rect(SLIDER_VALUE_RECT, color::BLACK);
        let (vx, vy) = SLIDER_VALUE_RECT.center();
        self.render_label(value_label, vx, vy);

        self.board.fill_rect(SLIDER_CLEAR_RECT, color::BLACK);
        self.render_label(track_label, SLIDER_CENTER.0, SLIDER_CENTER.1);
    }

    fn act_temp_apply(&mut self, heater: Heater, event: Event) {
        if matches!(event, Event::Init) {
            let temp = self.ctx.temp.pending;
            self.ctx.temp.target[heater.index()] = temp;
            self.send(gcode::set_heater(heater, temp));
        }
        self.full_transition(Screen::TemperatureMenu);
    }

    /// Cancel is not a no-op: it forces the target to zero and still
    /// writes the off-command.
    fn act_temp_cancel(&mut self, heater: Heater, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.temp.pending = 0;
            self.ctx.temp.target[heater.index()] = 0;
            self.send(gcode::set_heater(heater, 0));
        }
        self.full_transition(Screen::TemperatureMenu);
    }

    fn act_browser_page_up(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.browser.offset = browser::page_up(self.ctx.browser.offset);
        }
        self.toggle_transition(Screen::FileBrowser);
    }

    fn act_browser_page_down(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.browser.offset =
                browser::page_down(self.ctx.browser.offset, self.ctx.browser.total);
        }
        self.toggle_transition(Screen::FileBrowser);
    }

    fn act_browser_device(&mut self, device: StorageDevice, event: Event) {
        if matches!(event, Event::Init) {
            if !self.board.is_mounted(device) && self.board.mount(device).is_err() {
                ui_debug!("mount failed for {:?}", device);
            }
            self.ctx.browser.device = device;
            self.ctx.browser.offset = 0;
        }
        self.toggle_transition(Screen::FileBrowser);
    }

    fn act_select_file(&mut self, slot: u8, event: Event) {
        if matches!(event, Event::Init) && !self.ctx.is_printing {
            if let Some(name) = self.ctx.browser.entries.get(slot as usize) {
                self.ctx.print.file = name.clone();
                self.full_transition(Screen::Print);
                return;
            }
        }
        self.toggle_transition(Screen::FileBrowser);
    }

    fn act_print_pause_toggle(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            let paused = !self.ctx.print.paused;
            self.ctx.print.paused = paused;
            if paused {
                self.send(gcode::pause_print());
            } else {
                self.send(gcode::start_print());
            }
        }
        self.toggle_transition(Screen::Print);
    }

    fn act_print_cancel(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            self.send(gcode::abort_print());
        }
        self.full_transition(Screen::Home);
    }

    fn act_filament_select(&mut self, heater: Heater, event: Event) {
        if matches!(event, Event::Init) {
            self.ctx.filament.extruder = heater;
            let temp = self.ctx.filament.change_temp;
            self.send(gcode::set_heater(heater, temp));
            self.full_transition(Screen::FilamentPreheat);
        } else {
            self.toggle_transition(Screen::FilamentMenu);
        }
    }

    fn act_filament_done(&mut self, event: Event) {
        if matches!(event, Event::Init) {
            let extruder = self.ctx.filament.extruder;
            self.send(gcode::set_heater(extruder, 0));
        }
        self.full_transition(Screen::Setup);
    }
}
