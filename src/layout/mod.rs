pub mod floating;

use ratatui::layout::Rect;

/// Signed position in container space.
///
/// Layers may hang off the top or left edge of their container, so positions
/// are signed even though the terminal buffer itself is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerPos {
    pub x: i32,
    pub y: i32,
}

impl LayerPos {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Express `self` in the coordinate space whose origin sits at `origin`.
    pub const fn relative_to(self, origin: LayerPos) -> Self {
        Self {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerSize {
    pub width: u16,
    pub height: u16,
}

impl LayerSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<Rect> for LayerSize {
    fn from(rect: Rect) -> Self {
        Self::new(rect.width, rect.height)
    }
}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(position: LayerPos, size: LayerSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub const fn position(&self) -> LayerPos {
        LayerPos::new(self.x, self.y)
    }

    pub const fn size(&self) -> LayerSize {
        LayerSize::new(self.width, self.height)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, point: LayerPos) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        let (px, py) = (point.x as i64, point.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }

    /// Intersect with an unsigned rectangle, returning `None` when nothing
    /// overlaps.
    pub fn clip_to(&self, bounds: Rect) -> Option<Rect> {
        let left = (self.x as i64).max(bounds.x as i64);
        let top = (self.y as i64).max(bounds.y as i64);
        let right = (self.x as i64 + self.width as i64).min(bounds.right() as i64);
        let bottom = (self.y as i64 + self.height as i64).min(bounds.bottom() as i64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

impl From<Rect> for FloatRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rect_contains_is_half_open() {
        let r = FloatRect::new(LayerPos::new(-2, 3), LayerSize::new(4, 2));
        assert!(r.contains(LayerPos::new(-2, 3)));
        assert!(r.contains(LayerPos::new(1, 4)));
        assert!(!r.contains(LayerPos::new(2, 4)));
        assert!(!r.contains(LayerPos::new(0, 5)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = FloatRect::new(LayerPos::ORIGIN, LayerSize::new(0, 5));
        assert!(!r.contains(LayerPos::ORIGIN));
    }

    #[test]
    fn clip_to_handles_negative_origins() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };
        let r = FloatRect::new(LayerPos::new(-3, -1), LayerSize::new(5, 4));
        assert_eq!(
            r.clip_to(bounds),
            Some(Rect {
                x: 0,
                y: 0,
                width: 2,
                height: 3
            })
        );
        let outside = FloatRect::new(LayerPos::new(-8, 0), LayerSize::new(5, 4));
        assert_eq!(outside.clip_to(bounds), None);
    }

    #[test]
    fn relative_to_subtracts_origin() {
        let p = LayerPos::new(75, 75).relative_to(LayerPos::new(50, 50));
        assert_eq!(p, LayerPos::new(25, 25));
    }
}
