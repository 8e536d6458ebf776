use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use term_layers::components::{ConfirmAction, DialogSurface, PanelSurface};
use term_layers::drivers::InputDriver;
use term_layers::drivers::headless::{HeadlessOutputDriver, ScriptedInputDriver};
use term_layers::event_loop::ControlFlow;
use term_layers::runner::{LayerApp, run_layer_app};
use term_layers::{Layer, LayerPos, LayerSize, LayerStack, ModalState};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Quits after a few frames without input.
struct ScriptedApp {
    stack: LayerStack,
    idle_frames: usize,
    quit_on: Option<char>,
}

impl ScriptedApp {
    fn new() -> Self {
        Self {
            stack: LayerStack::new(),
            idle_frames: 0,
            quit_on: None,
        }
    }
}

impl LayerApp for ScriptedApp {
    fn stack(&mut self) -> &mut LayerStack {
        &mut self.stack
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        self.idle_frames = 0;
        match (event, self.quit_on) {
            (Event::Key(key), Some(quit)) if key.code == KeyCode::Char(quit) => ControlFlow::Quit,
            _ => ControlFlow::Continue,
        }
    }

    fn after_update(&mut self) -> ControlFlow {
        self.idle_frames += 1;
        if self.idle_frames > 3 {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    }
}

/// Delivers at most one event between frames so every event is seen by its
/// own update pass.
struct Paced {
    events: VecDeque<Event>,
    armed: bool,
}

impl Paced {
    fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            armed: true,
        }
    }
}

impl InputDriver for Paced {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        if self.armed && !self.events.is_empty() {
            self.armed = false;
            return Ok(true);
        }
        self.armed = true;
        Ok(false)
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}

fn run(app: &mut ScriptedApp, events: impl IntoIterator<Item = Event>) -> HeadlessOutputDriver {
    let mut output = HeadlessOutputDriver::new(60, 20).expect("headless output");
    let mut input = Paced::new(events);
    run_layer_app(&mut input, &mut output, app, Duration::ZERO).expect("run");
    output
}

#[test]
fn pointer_drag_moves_panel_through_the_host_loop() {
    let mut app = ScriptedApp::new();
    let panel = Layer::new(PanelSurface::new("drag", LayerSize::new(16, 5)));
    app.stack.add_control(&panel, LayerPos::new(4, 4));

    let output = run(
        &mut app,
        [
            mouse(MouseEventKind::Down(MouseButton::Left), 8, 4),
            mouse(MouseEventKind::Drag(MouseButton::Left), 20, 10),
            mouse(MouseEventKind::Up(MouseButton::Left), 20, 10),
        ],
    );

    assert_eq!(panel.position(), LayerPos::new(16, 10));
    assert!(app.stack.layers().pointer_capture().is_none());
    let title_row: String = (16..32)
        .map(|x| output.buffer()[(x, 10)].symbol().to_string())
        .collect();
    assert!(title_row.contains("drag"));
}

#[test]
fn clicking_a_dialog_button_ends_the_modal_session() {
    let mut app = ScriptedApp::new();
    app.stack.resize(ratatui::layout::Rect::new(0, 0, 60, 20));
    let container = app.stack.size();
    let dialog = DialogSurface::new("Quit", "Sure?").open(
        app.stack.layers_mut(),
        container,
        ModalState::new,
    );
    // A 40x8 dialog centered in 60x20 sits at (10, 6). Its confirm button is
    // right aligned on the second to last row.
    run(
        &mut app,
        [mouse(MouseEventKind::Down(MouseButton::Left), 44, 12)],
    );

    assert!(!dialog.is_attached());
    assert!(app.stack.modal().is_none());
    assert_eq!(
        dialog.borrow_as::<DialogSurface>().and_then(|d| d.result()),
        Some(ConfirmAction::Confirm)
    );
}

#[test]
fn handler_can_quit_immediately() {
    let mut app = ScriptedApp::new();
    app.quit_on = Some('q');
    let mut input = ScriptedInputDriver::new([Event::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
    ))]);
    let mut output = HeadlessOutputDriver::new(10, 4).expect("headless output");
    run_layer_app(&mut input, &mut output, &mut app, Duration::ZERO).expect("run");
    assert!(input.is_drained());
    assert_eq!(app.idle_frames, 0);
}
