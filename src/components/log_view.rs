use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::constants::DEFAULT_LOG_LINES;
use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::LayerSize;
use crate::layout::floating::clamp_floating_size;
use crate::surface::Surface;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl LogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

/// Shared, bounded line buffer fed by the tracing subscriber.
#[derive(Clone, Debug)]
pub struct LogHandle {
    inner: Arc<Mutex<LogBuffer>>,
}

impl LogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let Ok(buffer) = self.inner.lock() else {
            return Vec::new();
        };
        let skip = buffer.lines.len().saturating_sub(count);
        buffer.lines.iter().skip(skip).cloned().collect()
    }

    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LINES)
    }
}

/// `io::Write` adapter that splits output into lines.
///
/// Partial lines are held until a newline arrives or the writer is flushed.
#[derive(Debug)]
pub struct LogWriter {
    handle: LogHandle,
    pending: Vec<u8>,
}

impl LogWriter {
    pub fn new(handle: LogHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        if self.pending.is_empty() {
            return;
        }
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            self.handle.push(line.trim_end_matches('\r'));
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.flush_pending(true);
    }
}

/// Floating view over a `LogHandle` that follows the tail. Wheel movement
/// over the view scrolls back through older lines.
#[derive(Debug)]
pub struct LogViewSurface {
    handle: LogHandle,
    size: LayerSize,
    /// Lines scrolled back from the tail; zero follows new output.
    scroll_back: usize,
}

impl LogViewSurface {
    pub fn new(handle: LogHandle, size: LayerSize) -> Self {
        Self {
            handle,
            size: clamp_floating_size(size),
            scroll_back: 0,
        }
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    fn view_height(&self) -> usize {
        self.size.height.saturating_sub(2) as usize
    }
}

impl Surface for LogViewSurface {
    fn size(&self) -> LayerSize {
        self.size
    }

    fn set_size(&mut self, size: LayerSize) -> LayerSize {
        self.size = clamp_floating_size(size);
        self.size
    }

    fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = Rect::new(0, 0, self.size.width, self.size.height);
        frame.fill(
            area,
            " ",
            Style::default().bg(theme::panel_bg()).fg(theme::panel_fg()),
        );
        let view = self.view_height();
        let lines = self.handle.tail(view + self.scroll_back);
        let shown = lines.len().saturating_sub(self.scroll_back);
        let text = Text::from(
            lines
                .into_iter()
                .take(shown)
                .map(Line::from)
                .collect::<Vec<_>>(),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::panel_border()))
            .title(" log ");
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, _layers: &mut Layers, _elapsed: Duration) {
        let Some(pointer) = ctx.pointer() else {
            return;
        };
        if pointer.scroll == 0 {
            return;
        }
        let max_back = self.handle.len().saturating_sub(self.view_height());
        let next = self.scroll_back as i64 - pointer.scroll as i64;
        self.scroll_back = next.clamp(0, max_back as i64) as usize;
    }
}
