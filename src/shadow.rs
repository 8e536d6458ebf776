//! Drop shadows.
//!
//! A `ShadowStyle` says which skin region paints the shadow and how far it
//! is cast. The actual cells come from a `Skin`, which turns a region and a
//! target size into a drawable buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::constants::DEFAULT_SHADOW_WIDTH;
use crate::layout::{FloatRect, LayerSize};
use crate::theme;
use crate::ui::UiFrame;

/// Named region of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinRegion(&'static str);

impl SkinRegion {
    pub const SHADOW: Self = Self("shadow");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

pub trait Skin {
    /// Produce a drawable surface for `region` at `size`. The returned
    /// buffer's area starts at the origin.
    fn surface(&self, region: SkinRegion, size: LayerSize) -> Buffer;
}

/// Skin backed by the crate theme. Unknown regions come back blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeSkin;

impl Skin for ThemeSkin {
    fn surface(&self, region: SkinRegion, size: LayerSize) -> Buffer {
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buffer = Buffer::empty(area);
        if region == SkinRegion::SHADOW {
            let style = Style::default()
                .fg(theme::shadow_fg())
                .bg(theme::shadow_bg());
            for y in 0..size.height {
                for x in 0..size.width {
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        cell.set_symbol(theme::SHADOW_SYMBOL);
                        cell.set_style(style);
                    }
                }
            }
        }
        buffer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowStyle {
    pub region: SkinRegion,
    /// Horizontal cast distance in columns. Zero disables the shadow.
    pub width: u16,
}

impl ShadowStyle {
    pub const fn new(region: SkinRegion, width: u16) -> Self {
        Self { region, width }
    }

    pub const fn none() -> Self {
        Self::new(SkinRegion::SHADOW, 0)
    }

    pub const fn is_visible(&self) -> bool {
        self.width > 0
    }

    /// Offset of the shadow from its caster. Rows are cast half as far as
    /// columns, rounded up.
    pub const fn offset(&self) -> (i32, i32) {
        (self.width as i32, self.width.div_ceil(2) as i32)
    }

    /// Rectangle covered by the shadow of `caster`, or `None` when the
    /// shadow is disabled or the caster is empty.
    pub fn shadow_rect(&self, caster: FloatRect) -> Option<FloatRect> {
        if !self.is_visible() || caster.width == 0 || caster.height == 0 {
            return None;
        }
        let (dx, dy) = self.offset();
        Some(caster.offset(dx, dy))
    }
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self::new(SkinRegion::SHADOW, DEFAULT_SHADOW_WIDTH)
    }
}

/// Pass-scoped view of the container's shadow style and skin.
#[derive(Clone, Copy)]
pub struct ShadowContext<'a> {
    style: ShadowStyle,
    skin: &'a dyn Skin,
}

impl<'a> ShadowContext<'a> {
    pub fn new(style: ShadowStyle, skin: &'a dyn Skin) -> Self {
        Self { style, skin }
    }

    pub fn style(&self) -> ShadowStyle {
        self.style
    }

    /// Draw the shadow cast by `caster` (in the frame's current space).
    pub fn draw(&self, frame: &mut UiFrame<'_>, caster: FloatRect) {
        let Some(rect) = self.style.shadow_rect(caster) else {
            return;
        };
        let surface = self.skin.surface(self.style.region, rect.size());
        frame.blit_from_signed(&surface, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayerPos;

    #[test]
    fn offset_halves_rows() {
        assert_eq!(ShadowStyle::new(SkinRegion::SHADOW, 2).offset(), (2, 1));
        assert_eq!(ShadowStyle::new(SkinRegion::SHADOW, 3).offset(), (3, 2));
    }

    #[test]
    fn disabled_shadow_has_no_rect() {
        let caster = FloatRect::new(LayerPos::ORIGIN, LayerSize::new(4, 4));
        assert!(ShadowStyle::none().shadow_rect(caster).is_none());
        let empty = FloatRect::new(LayerPos::ORIGIN, LayerSize::new(0, 4));
        assert!(ShadowStyle::default().shadow_rect(empty).is_none());
    }

    #[test]
    fn theme_skin_fills_shadow_region_only() {
        let skin = ThemeSkin;
        let shadow = skin.surface(SkinRegion::SHADOW, LayerSize::new(2, 1));
        assert_eq!(shadow.cell((1, 0)).unwrap().symbol(), theme::SHADOW_SYMBOL);
        let other = skin.surface(SkinRegion::new("menu"), LayerSize::new(2, 1));
        assert_eq!(other.cell((1, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn draw_blits_offset_rect() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            let ctx = ShadowContext::new(ShadowStyle::new(SkinRegion::SHADOW, 2), &ThemeSkin);
            ctx.draw(
                &mut frame,
                FloatRect::new(LayerPos::new(0, 0), LayerSize::new(2, 2)),
            );
        }
        assert_eq!(buf.cell((2, 1)).unwrap().symbol(), theme::SHADOW_SYMBOL);
        assert_eq!(buf.cell((3, 2)).unwrap().symbol(), theme::SHADOW_SYMBOL);
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((4, 1)).unwrap().symbol(), " ");
    }
}
