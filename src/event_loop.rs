use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// An input event from the driver.
    Input(Event),
    /// Time to advance and draw. Carries the time since the previous frame.
    Frame(Duration),
}

/// Frame-paced driver of the UI thread.
///
/// Each iteration emits one `Frame`, then waits up to the frame interval for
/// input and drains every event that is ready before the next frame. Draining
/// keeps bursts of mouse motion from piling up behind rendering.
pub struct EventLoop<D> {
    driver: D,
    frame_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, frame_interval: Duration) -> Self {
        Self {
            driver,
            frame_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Run until the handler returns `ControlFlow::Quit`.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        let mut last_frame: Option<Instant> = None;
        loop {
            let now = Instant::now();
            let elapsed = last_frame.map_or(Duration::ZERO, |prev| now.duration_since(prev));
            last_frame = Some(now);
            if handler(&mut self.driver, LoopEvent::Frame(elapsed))? == ControlFlow::Quit {
                return Ok(());
            }

            let wait = self.frame_interval.saturating_sub(now.elapsed());
            if self.driver.poll(wait)? {
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, LoopEvent::Input(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::headless::ScriptedInputDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn frames_interleave_with_drained_input() {
        let driver = ScriptedInputDriver::new([key('a'), key('b')]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        event_loop
            .run(|_, event| {
                seen.push(match event {
                    LoopEvent::Frame(_) => "frame".to_string(),
                    LoopEvent::Input(Event::Key(k)) => format!("{:?}", k.code),
                    LoopEvent::Input(_) => "other".to_string(),
                });
                let frames = seen.iter().filter(|s| *s == "frame").count();
                Ok(if frames == 2 {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, vec!["frame", "Char('a')", "Char('b')", "frame"]);
    }

    #[test]
    fn first_frame_has_zero_elapsed() {
        let mut event_loop = EventLoop::new(ScriptedInputDriver::default(), Duration::ZERO);
        let mut first = None;
        event_loop
            .run(|_, event| {
                if let LoopEvent::Frame(elapsed) = event {
                    first.get_or_insert(elapsed);
                }
                Ok(ControlFlow::Quit)
            })
            .unwrap();
        assert_eq!(first, Some(Duration::ZERO));
    }
}
