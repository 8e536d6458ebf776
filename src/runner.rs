use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::context::{PointerState, UpdateContext};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};
use crate::stack::LayerStack;

/// An application built around a single layer stack.
pub trait LayerApp {
    fn stack(&mut self) -> &mut LayerStack;

    /// Area the stack occupies for a given terminal area.
    fn stack_area(&self, area: Rect) -> Rect {
        area
    }

    /// Called for every input event before the next frame. Mouse events have
    /// already been folded into the pointer the stack will see.
    fn handle_event(&mut self, _event: &Event) -> ControlFlow {
        ControlFlow::Continue
    }

    /// Called after each update pass, before drawing.
    fn after_update(&mut self) -> ControlFlow {
        ControlFlow::Continue
    }

    fn mouse_capture(&self) -> bool {
        true
    }
}

/// Drive `app` until it asks to quit.
///
/// Every frame resizes the stack to the current output area, runs one update
/// pass with the pointer accumulated since the previous frame, and renders.
/// The output driver is always restored, even when the loop fails.
pub fn run_layer_app<D, O, A>(
    input: &mut D,
    output: &mut O,
    app: &mut A,
    frame_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
    A: LayerApp,
{
    output.enter()?;
    let result = pump(input, output, app, frame_interval);
    let restored = output.exit();
    result.and(restored)
}

fn pump<D, O, A>(
    input: &mut D,
    output: &mut O,
    app: &mut A,
    frame_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
    A: LayerApp,
{
    let mut pointer = PointerState::new();
    let mut event_loop = EventLoop::new(input, frame_interval);
    event_loop.driver().set_mouse_capture(app.mouse_capture())?;

    event_loop.run(|_, event| match event {
        LoopEvent::Input(event) => {
            match &event {
                Event::Mouse(mouse) => pointer.apply(mouse),
                Event::FocusLost => pointer.leave(),
                _ => {}
            }
            Ok(app.handle_event(&event))
        }
        LoopEvent::Frame(elapsed) => {
            let area = app.stack_area(output.area()?);
            app.stack().resize(area);
            let ctx = UpdateContext::new(pointer.frame());
            app.stack().update(&ctx, elapsed);
            if app.after_update() == ControlFlow::Quit {
                return Ok(ControlFlow::Quit);
            }
            output.draw(|mut frame| app.stack().render(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
    })
}
