use super::{FloatRect, LayerPos, LayerSize};

use crate::constants::MIN_FLOATING_VISIBLE_MARGIN;

pub const FLOATING_MIN_WIDTH: u16 = 6;
pub const FLOATING_MIN_HEIGHT: u16 = 3;

/// Clamp a requested floating size to the smallest size that still fits the
/// border and a title row.
pub fn clamp_floating_size(size: LayerSize) -> LayerSize {
    LayerSize {
        width: size.width.max(FLOATING_MIN_WIDTH),
        height: size.height.max(FLOATING_MIN_HEIGHT),
    }
}

/// Header strip of a bordered floating surface in its local coordinates.
///
/// The strip is the top border row minus the corners. Surfaces narrower or
/// shorter than three cells have no header to grab.
pub fn floating_header(size: LayerSize) -> Option<FloatRect> {
    if size.width < 3 || size.height < 3 {
        return None;
    }
    Some(FloatRect {
        x: 1,
        y: 0,
        width: size.width.saturating_sub(2),
        height: 1,
    })
}

/// In-progress header drag.
///
/// `grab` is where the pointer landed inside the surface when the drag
/// started; keeping it fixed makes the surface follow the pointer without
/// jumping its top-left corner onto the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub grab: LayerPos,
    pub start: LayerPos,
}

impl HeaderDrag {
    pub fn begin(grab: LayerPos, start: LayerPos) -> Self {
        Self { grab, start }
    }

    /// Container-space position the dragged surface should move to for a
    /// pointer at `pointer` (also in container space).
    pub fn target(&self, pointer: LayerPos) -> LayerPos {
        pointer.relative_to(self.grab)
    }
}

/// Pull `position` back so at least `MIN_FLOATING_VISIBLE_MARGIN` cells of a
/// surface of `size` stay inside `bounds`, keeping its chrome reachable.
pub fn keep_visible(position: LayerPos, size: LayerSize, bounds: LayerSize) -> LayerPos {
    let margin = MIN_FLOATING_VISIBLE_MARGIN as i32;
    let min_x = margin.min(size.width as i32) - size.width as i32;
    let max_x = (bounds.width as i32 - margin.min(size.width as i32)).max(min_x);
    // The header row must stay on screen, so vertical clamping is stricter.
    let max_y = (bounds.height as i32 - 1).max(0);
    LayerPos {
        x: position.x.clamp(min_x, max_x),
        y: position.y.clamp(0, max_y),
    }
}
