//! Draggable floating panel.
//!
//! Clicking anywhere on a panel raises it. Pressing on the header strip
//! starts a drag that captures the pointer until the button is released, so
//! fast motion that outruns the panel still moves it. The `[x]` button
//! detaches the panel from its stack.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::floating::{HeaderDrag, clamp_floating_size, floating_header, keep_visible};
use crate::layout::{FloatRect, LayerPos, LayerSize};
use crate::surface::Surface;
use crate::theme;
use crate::ui::UiFrame;

const CLOSE_LABEL: &str = "[x]";

#[derive(Debug)]
pub struct PanelSurface {
    title: String,
    body: Vec<String>,
    size: LayerSize,
    closable: bool,
    drag: Option<HeaderDrag>,
    hovered: bool,
    closed: bool,
}

impl PanelSurface {
    pub fn new(title: impl Into<String>, size: LayerSize) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
            size: clamp_floating_size(size),
            closable: true,
            drag: None,
            hovered: false,
            closed: false,
        }
    }

    pub fn with_body(mut self, body: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.body = body.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_body(&mut self, body: impl IntoIterator<Item = impl Into<String>>) {
        self.body = body.into_iter().map(Into::into).collect();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the close button detached this panel.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn close_button(&self) -> Option<FloatRect> {
        if !self.closable || self.size.width < 8 {
            return None;
        }
        Some(FloatRect {
            x: self.size.width as i32 - 1 - CLOSE_LABEL.len() as i32,
            y: 0,
            width: CLOSE_LABEL.len() as u16,
            height: 1,
        })
    }
}

impl Surface for PanelSurface {
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
        let border = if self.hovered || self.drag.is_some() {
            theme::accent()
        } else {
            theme::panel_border()
        };
        let title_style = Style::default()
            .fg(theme::panel_header_fg())
            .bg(theme::panel_header_bg())
            .add_modifier(Modifier::BOLD);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Line::styled(format!(" {} ", self.title), title_style));
        let body = Paragraph::new(
            self.body
                .iter()
                .map(|line| Line::from(line.as_str()))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(theme::panel_fg()))
        .wrap(Wrap { trim: false })
        .block(block);
        frame.render_widget(body, area);

        if let Some(close) = self.close_button() {
            frame.set_string(close.x, close.y, CLOSE_LABEL, title_style);
        }
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, layers: &mut Layers, _elapsed: Duration) {
        let Some(layer) = ctx.layer() else {
            return;
        };
        let pointer = ctx.pointer();
        self.hovered = pointer.is_some();

        if let Some(drag) = self.drag {
            match (pointer, ctx.pointer_in_parent()) {
                (Some(p), Some(parent)) if p.left_pressed() => {
                    let mut target = drag.target(parent);
                    if let Some(bounds) = ctx.bounds() {
                        target = keep_visible(target, self.size, bounds);
                    }
                    layer.set_position(target);
                }
                _ => {
                    self.drag = None;
                    layers.release_pointer(layer);
                    tracing::trace!(layer = ?layer.id(), "drag ended");
                }
            }
            return;
        }

        let Some(p) = pointer else {
            return;
        };
        if !p.left_clicked() {
            return;
        }
        layers.bring_to_top(layer);
        if self
            .close_button()
            .is_some_and(|close| close.contains(p.position))
        {
            self.closed = true;
            layers.remove_control(layer);
            return;
        }
        if floating_header(self.size).is_some_and(|header| header.contains(p.position)) {
            self.drag = Some(HeaderDrag::begin(p.position, layer.position()));
            layers.capture_pointer(layer);
            tracing::trace!(layer = ?layer.id(), "drag started");
        }
    }
}

/// Position that centers a surface of `size` inside `bounds`.
pub fn centered(size: LayerSize, bounds: LayerSize) -> LayerPos {
    LayerPos::new(
        (bounds.width as i32 - size.width as i32) / 2,
        (bounds.height as i32 - size.height as i32) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Pointer;
    use crate::stack::LayerStack;
    use crate::surface::Layer;
    use crossterm::event::MouseButton;
    use ratatui::buffer::Buffer;

    fn stack() -> LayerStack {
        let mut stack = LayerStack::new();
        stack.resize(Rect::new(0, 0, 40, 20));
        stack
    }

    fn frame_with(pointer: Pointer) -> UpdateContext<'static> {
        UpdateContext::new(Some(pointer))
    }

    #[test]
    fn click_raises_panel() {
        let mut stack = stack();
        let low = Layer::new(PanelSurface::new("low", LayerSize::new(10, 5)));
        let high = Layer::new(PanelSurface::new("high", LayerSize::new(10, 5)));
        stack.add_control(&low, LayerPos::new(0, 0));
        stack.add_control(&high, LayerPos::new(20, 0));
        let click = Pointer::at(LayerPos::new(2, 2)).with_click(MouseButton::Left);
        stack.update(&frame_with(click), Duration::ZERO);
        assert_eq!(stack.layers().topmost(), Some(&low));
    }

    #[test]
    fn header_drag_moves_and_releases_capture() {
        let mut stack = stack();
        let panel = Layer::new(PanelSurface::new("p", LayerSize::new(12, 5)));
        stack.add_control(&panel, LayerPos::new(5, 5));

        let grab = Pointer::at(LayerPos::new(8, 5)).with_click(MouseButton::Left);
        stack.update(&frame_with(grab), Duration::ZERO);
        assert_eq!(stack.layers().pointer_capture(), Some(&panel));

        let moved = Pointer::at(LayerPos::new(13, 9)).with_pressed(MouseButton::Left);
        stack.update(&frame_with(moved), Duration::ZERO);
        assert_eq!(panel.position(), LayerPos::new(10, 9));

        let released = Pointer::at(LayerPos::new(13, 9)).with_release(MouseButton::Left);
        stack.update(&frame_with(released), Duration::ZERO);
        assert!(stack.layers().pointer_capture().is_none());
        assert_eq!(panel.borrow_as::<PanelSurface>().map(|p| p.is_dragging()), Some(false));
    }

    #[test]
    fn drag_keeps_panel_reachable() {
        let mut stack = stack();
        let panel = Layer::new(PanelSurface::new("p", LayerSize::new(12, 5)));
        stack.add_control(&panel, LayerPos::new(5, 5));
        stack.update(
            &frame_with(Pointer::at(LayerPos::new(8, 5)).with_click(MouseButton::Left)),
            Duration::ZERO,
        );
        stack.update(
            &frame_with(Pointer::at(LayerPos::new(3, 40)).with_pressed(MouseButton::Left)),
            Duration::ZERO,
        );
        assert_eq!(panel.position().y, 19);
    }

    #[test]
    fn close_button_detaches_panel() {
        let mut stack = stack();
        let panel = Layer::new(PanelSurface::new("p", LayerSize::new(12, 5)));
        stack.add_control(&panel, LayerPos::new(0, 0));
        let click = Pointer::at(LayerPos::new(9, 0)).with_click(MouseButton::Left);
        stack.update(&frame_with(click), Duration::ZERO);
        assert!(!panel.is_attached());
        assert!(stack.order().is_empty());
        assert_eq!(panel.borrow_as::<PanelSurface>().map(|p| p.is_closed()), Some(true));
    }

    #[test]
    fn render_draws_title_and_close_button() {
        let mut panel = PanelSurface::new("hi", LayerSize::new(12, 4)).with_body(["body"]);
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            panel.render(&mut frame);
        }
        let row = |y: u16| -> String { (0..12).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(0).contains(" hi "));
        assert!(row(0).contains(CLOSE_LABEL));
        assert!(row(1).contains("body"));
    }

    #[test]
    fn centered_splits_slack() {
        assert_eq!(
            centered(LayerSize::new(10, 4), LayerSize::new(40, 20)),
            LayerPos::new(15, 8)
        );
    }
}
