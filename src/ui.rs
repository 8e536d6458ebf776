//! UiFrame: a thin wrapper around a ratatui `Buffer` that clamps drawing to
//! the visible area and carries a translation stack.
//!
//! Surfaces draw in their own local coordinates. The layer stack pushes a
//! translation to a surface's top-left corner before asking it to render and
//! pops it afterwards, so a surface never needs to know where it sits on
//! screen. Every draw call is clipped to the frame area, which keeps layers
//! that hang off an edge from writing out of bounds.
//!
//! Translations nest and must be balanced: each `push_translate` is paired
//! with one `pop_translate`. An unbalanced pop is ignored and reported as
//! `false`.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};

use crate::layout::{FloatRect, LayerPos};
use crate::theme;

/// Wrapper around a ratatui buffer that clips and translates drawing.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
    origin: LayerPos,
    saved: Vec<LayerPos>,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self::from_parts(area, buffer)
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    ///
    /// This powers offscreen rendering and tests, where surfaces draw into a
    /// plain `Buffer` instead of a live terminal frame.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self {
            area,
            buffer,
            origin: LayerPos::ORIGIN,
            saved: Vec::new(),
        }
    }

    /// Visible area in untranslated screen coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Current translation applied to local coordinates.
    pub fn origin(&self) -> LayerPos {
        self.origin
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    pub fn push_translate(&mut self, dx: i32, dy: i32) {
        self.saved.push(self.origin);
        self.origin = self.origin.offset(dx, dy);
    }

    pub fn pop_translate(&mut self) -> bool {
        match self.saved.pop() {
            Some(previous) => {
                self.origin = previous;
                true
            }
            None => false,
        }
    }

    pub fn translate_depth(&self) -> usize {
        self.saved.len()
    }

    /// Map a local rectangle to screen space.
    pub fn to_screen(&self, rect: FloatRect) -> FloatRect {
        rect.offset(self.origin.x, self.origin.y)
    }

    fn clip_local(&self, area: Rect) -> Option<Rect> {
        self.to_screen(FloatRect::from(area)).clip_to(self.area)
    }

    /// Run `draw` over a local rectangle. A rectangle cut by the frame edge is
    /// laid out at full size offscreen and only its visible part is copied
    /// back, so borders and wrapping stay where the surface put them.
    fn draw_local<F>(&mut self, area: Rect, draw: F)
    where
        F: FnOnce(Rect, &mut Buffer),
    {
        let Some(clipped) = self.clip_local(area) else {
            return;
        };
        if clipped.width == area.width && clipped.height == area.height {
            draw(clipped, self.buffer);
            return;
        }
        let local = Rect::new(0, 0, area.width, area.height);
        let mut scratch = Buffer::empty(local);
        let screen = self.to_screen(FloatRect::from(area));
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                let sx = (x as i32 - screen.x) as u16;
                let sy = (y as i32 - screen.y) as u16;
                if let (Some(under), Some(cell)) =
                    (self.buffer.cell((x, y)), scratch.cell_mut((sx, sy)))
                {
                    *cell = under.clone();
                }
            }
        }
        draw(local, &mut scratch);
        self.blit_from_signed(&scratch, FloatRect::from(area));
    }

    /// Render a widget into a local rectangle, clipped to the frame.
    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        self.draw_local(area, |rect, buf| widget.render(rect, buf));
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        self.draw_local(area, |rect, buf| widget.render(rect, buf, state));
    }

    /// Draw `text` starting at local `(x, y)`. Characters falling outside the
    /// frame on either side are dropped.
    pub fn set_string(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let screen = LayerPos::new(x, y).offset(self.origin.x, self.origin.y);
        let left = self.area.x as i32;
        if screen.y < 0 || screen.y > u16::MAX as i32 {
            return;
        }
        let skip = (left - screen.x).max(0) as usize;
        let start = screen.x.max(left);
        if start > u16::MAX as i32 {
            return;
        }
        let visible: String = text.chars().skip(skip).collect();
        safe_set_string(
            self.buffer,
            self.area,
            start as u16,
            screen.y as u16,
            &visible,
            style,
        );
    }

    /// Fill a local rectangle with `symbol` in `style`. Whatever was drawn
    /// there before, including its modifiers, is replaced.
    pub fn fill(&mut self, area: Rect, symbol: &str, style: Style) {
        let Some(clipped) = self.clip_local(area) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Dim everything already drawn inside a local rectangle.
    pub fn dim_area(&mut self, area: Rect) {
        let Some(clipped) = self.clip_local(area) else {
            return;
        };
        let style = theme::lightbox_style();
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_style(style);
                }
            }
        }
    }

    /// Copy `src` (whose area starts at the origin) onto the local
    /// rectangle `dest`, clipping against the frame.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: FloatRect) {
        let dest = self.to_screen(dest);
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        for sy in 0..dest.height as i32 {
            let dy = dest.y + sy;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in 0..dest.width as i32 {
                let dx = dest.x + sx;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn area(width: u16, height: u16) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn translation_stack_is_balanced() {
        let mut buf = Buffer::empty(area(4, 4));
        let mut frame = UiFrame::from_parts(area(4, 4), &mut buf);
        frame.push_translate(2, 1);
        frame.push_translate(-1, 1);
        assert_eq!(frame.origin(), LayerPos::new(1, 2));
        assert_eq!(frame.translate_depth(), 2);
        assert!(frame.pop_translate());
        assert!(frame.pop_translate());
        assert_eq!(frame.origin(), LayerPos::ORIGIN);
        assert!(!frame.pop_translate());
    }

    #[test]
    fn set_string_honors_translation() {
        let mut buf = Buffer::empty(area(8, 2));
        {
            let mut frame = UiFrame::from_parts(area(8, 2), &mut buf);
            frame.push_translate(3, 1);
            frame.set_string(0, 0, "hi", Style::default());
            frame.pop_translate();
        }
        assert_eq!(row(&buf, 1), "   hi   ");
    }

    #[test]
    fn set_string_drops_characters_left_of_frame() {
        let mut buf = Buffer::empty(area(5, 1));
        {
            let mut frame = UiFrame::from_parts(area(5, 1), &mut buf);
            frame.push_translate(-2, 0);
            frame.set_string(0, 0, "abcdef", Style::default());
        }
        assert_eq!(row(&buf, 0), "cdef ");
    }

    #[test]
    fn fill_clips_to_frame() {
        let mut buf = Buffer::empty(area(4, 2));
        {
            let mut frame = UiFrame::from_parts(area(4, 2), &mut buf);
            frame.push_translate(2, 0);
            frame.fill(area(5, 5), "#", Style::default());
        }
        assert_eq!(row(&buf, 0), "  ##");
        assert_eq!(row(&buf, 1), "  ##");
    }

    #[test]
    fn dim_area_marks_cells() {
        let mut buf = Buffer::empty(area(3, 1));
        {
            let mut frame = UiFrame::from_parts(area(3, 1), &mut buf);
            frame.dim_area(area(2, 1));
        }
        assert!(buf[(0, 0)].modifier.contains(Modifier::DIM));
        assert!(buf[(1, 0)].modifier.contains(Modifier::DIM));
        assert!(!buf[(2, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn blit_from_signed_clips_negative_offsets() {
        let frame_area = area(4, 2);
        let mut dest = Buffer::empty(frame_area);
        let mut frame = UiFrame::from_parts(frame_area, &mut dest);
        let mut src = Buffer::empty(area(3, 2));
        for y in 0..2 {
            for x in 0..3 {
                if let Some(cell) = src.cell_mut((x, y)) {
                    cell.set_symbol("#");
                }
            }
        }
        frame.blit_from_signed(
            &src,
            FloatRect {
                x: -1,
                y: 0,
                width: 3,
                height: 2,
            },
        );
        let buffer = frame.buffer_mut();
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn render_widget_clips_translated_area() {
        struct FillWidget;
        impl Widget for FillWidget {
            fn render(self, area: Rect, buf: &mut Buffer) {
                for y in area.y..area.y.saturating_add(area.height) {
                    for x in area.x..area.x.saturating_add(area.width) {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol("A");
                        }
                    }
                }
            }
        }

        let mut buf = Buffer::empty(area(5, 3));
        {
            let mut ui = UiFrame::from_parts(area(5, 3), &mut buf);
            ui.push_translate(3, 1);
            ui.render_widget(FillWidget, area(5, 5));
            ui.pop_translate();
        }
        assert_eq!(row(&buf, 0), "     ");
        assert_eq!(row(&buf, 1), "   AA");
        assert_eq!(row(&buf, 2), "   AA");
    }

    #[test]
    fn render_widget_cuts_off_a_border_hanging_off_the_left() {
        use ratatui::widgets::{Block, Borders};

        let mut buf = Buffer::empty(area(4, 3));
        {
            let mut ui = UiFrame::from_parts(area(4, 3), &mut buf);
            ui.fill(area(4, 3), ".", Style::default());
            ui.push_translate(-2, 0);
            ui.render_widget(Block::default().borders(Borders::ALL), area(5, 3));
            ui.pop_translate();
        }
        assert_eq!(row(&buf, 0), "──┐.");
        assert_eq!(row(&buf, 1), "..│.");
        assert_eq!(row(&buf, 2), "──┘.");
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }
}
