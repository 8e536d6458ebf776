use std::fmt;
use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::{LayerPos, LayerSize};
use crate::surface::Surface;
use crate::theme;
use crate::ui::UiFrame;

type ClickHandler = Box<dyn FnMut(&mut Layers, LayerPos)>;

/// Full-size background that tiles a pattern and shows a status line.
///
/// Only pointer input that no layer took reaches the backdrop, which makes it
/// the place to react to clicks on empty space.
pub struct BackdropSurface {
    size: LayerSize,
    status: String,
    hover: Option<LayerPos>,
    clicks: usize,
    on_click: Option<ClickHandler>,
}

impl BackdropSurface {
    pub fn new() -> Self {
        Self {
            size: LayerSize::default(),
            status: String::new(),
            hover: None,
            clicks: 0,
            on_click: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Called with the click position for every left click on empty space.
    pub fn on_click(mut self, handler: impl FnMut(&mut Layers, LayerPos) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn hover(&self) -> Option<LayerPos> {
        self.hover
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }
}

impl Default for BackdropSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BackdropSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackdropSurface")
            .field("size", &self.size)
            .field("hover", &self.hover)
            .field("clicks", &self.clicks)
            .finish_non_exhaustive()
    }
}

impl Surface for BackdropSurface {
    fn size(&self) -> LayerSize {
        self.size
    }

    fn set_size(&mut self, size: LayerSize) -> LayerSize {
        self.size = size;
        size
    }

    fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = Rect::new(0, 0, self.size.width, self.size.height);
        frame.fill(
            area,
            theme::BACKDROP_SYMBOL,
            Style::default()
                .fg(theme::backdrop_fg())
                .bg(theme::backdrop_bg()),
        );
        if self.size.height == 0 {
            return;
        }
        let pointer = match self.hover {
            Some(p) => format!("{},{}", p.x, p.y),
            None => "-".to_string(),
        };
        let line = format!(" {}  pointer {} ", self.status, pointer);
        frame.set_string(
            0,
            self.size.height as i32 - 1,
            &line,
            Style::default().fg(theme::panel_fg()).bg(theme::panel_bg()),
        );
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, layers: &mut Layers, _elapsed: Duration) {
        let pointer = ctx.pointer();
        self.hover = pointer.map(|p| p.position);
        let Some(p) = pointer.filter(|p| p.left_clicked()) else {
            return;
        };
        self.clicks += 1;
        if let Some(handler) = self.on_click.as_mut() {
            handler(layers, p.position);
        }
    }
}
