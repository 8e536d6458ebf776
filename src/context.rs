//! Update-pass context.
//!
//! `UpdateContext` carries the pointer as seen from one scope of the layer
//! tree: the host, the container, or a single layer. Deriving a child
//! context translates the pointer into the child's coordinate space, or
//! withholds it entirely when the child is occluded or blocked by a modal.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::layout::{LayerPos, LayerSize};
use crate::surface::Layer;

/// Pointer state delivered to a surface for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    /// Position in the receiving scope's coordinates.
    pub position: LayerPos,
    /// Button currently held down.
    pub pressed: Option<MouseButton>,
    /// Button that went down during this frame.
    pub clicked: Option<MouseButton>,
    /// Button that was released during this frame.
    pub released: Option<MouseButton>,
    /// Accumulated wheel movement; positive scrolls down.
    pub scroll: i16,
}

impl Pointer {
    pub const fn at(position: LayerPos) -> Self {
        Self {
            position,
            pressed: None,
            clicked: None,
            released: None,
            scroll: 0,
        }
    }

    pub const fn with_click(mut self, button: MouseButton) -> Self {
        self.pressed = Some(button);
        self.clicked = Some(button);
        self
    }

    pub const fn with_pressed(mut self, button: MouseButton) -> Self {
        self.pressed = Some(button);
        self
    }

    pub const fn with_release(mut self, button: MouseButton) -> Self {
        self.pressed = None;
        self.released = Some(button);
        self
    }

    pub const fn with_scroll(mut self, scroll: i16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn left_clicked(&self) -> bool {
        self.clicked == Some(MouseButton::Left)
    }

    pub fn left_pressed(&self) -> bool {
        self.pressed == Some(MouseButton::Left)
    }

    /// The same pointer expressed relative to `origin`.
    pub const fn translated(mut self, origin: LayerPos) -> Self {
        self.position = self.position.relative_to(origin);
        self
    }
}

/// Accumulates host mouse events between frames.
///
/// Clicks, releases, and wheel movement are edge-triggered: they are reported
/// once by `frame` and then cleared. Position and held buttons persist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    position: Option<LayerPos>,
    pressed: Option<MouseButton>,
    clicked: Option<MouseButton>,
    released: Option<MouseButton>,
    scroll: i16,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, mouse: &MouseEvent) {
        self.position = Some(LayerPos::new(mouse.column as i32, mouse.row as i32));
        match mouse.kind {
            MouseEventKind::Down(button) => {
                self.pressed = Some(button);
                self.clicked = Some(button);
            }
            MouseEventKind::Up(button) => {
                self.pressed = None;
                self.released = Some(button);
            }
            MouseEventKind::Drag(button) => self.pressed = Some(button),
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
    }

    /// Forget the pointer, e.g. when the terminal loses focus.
    pub fn leave(&mut self) {
        *self = Self::default();
    }

    /// Snapshot the pointer for one frame and clear edge-triggered state.
    pub fn frame(&mut self) -> Option<Pointer> {
        let pointer = self.position.map(|position| Pointer {
            position,
            pressed: self.pressed,
            clicked: self.clicked,
            released: self.released,
            scroll: self.scroll,
        });
        self.clicked = None;
        self.released = None;
        self.scroll = 0;
        pointer
    }
}

/// Context handed to `Surface::update`.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    pointer: Option<Pointer>,
    layer: Option<&'a Layer>,
    position: LayerPos,
    bounds: Option<LayerSize>,
}

impl<'a> UpdateContext<'a> {
    /// Root context in host coordinates.
    pub const fn new(pointer: Option<Pointer>) -> Self {
        Self {
            pointer,
            layer: None,
            position: LayerPos::ORIGIN,
            bounds: None,
        }
    }

    /// Pointer in this scope's coordinates, `None` when unavailable or
    /// blocked.
    pub const fn pointer(&self) -> Option<Pointer> {
        self.pointer
    }

    pub const fn pointer_available(&self) -> bool {
        self.pointer.is_some()
    }

    /// The layer this context is scoped to. `None` for the host, the
    /// container, and the background.
    pub const fn layer(&self) -> Option<&'a Layer> {
        self.layer
    }

    /// Position of this scope in its parent's coordinates.
    pub const fn position(&self) -> LayerPos {
        self.position
    }

    /// Size of the enclosing container, when known.
    pub const fn bounds(&self) -> Option<LayerSize> {
        self.bounds
    }

    pub const fn with_bounds(mut self, bounds: LayerSize) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Pointer translated back into the parent's coordinates.
    pub fn pointer_in_parent(&self) -> Option<LayerPos> {
        self.pointer
            .map(|p| p.position.offset(self.position.x, self.position.y))
    }

    /// Same scope with a different pointer, already in this scope's
    /// coordinates.
    pub const fn with_pointer(mut self, pointer: Option<Pointer>) -> Self {
        self.pointer = pointer;
        self
    }

    /// Derive the context of a child placed at `position` in this scope.
    ///
    /// When `blocked` is set the child sees no pointer at all. The container
    /// bounds carry over unchanged.
    pub fn child<'b>(
        &self,
        layer: Option<&'b Layer>,
        position: LayerPos,
        blocked: bool,
    ) -> UpdateContext<'b> {
        UpdateContext {
            pointer: if blocked {
                None
            } else {
                self.pointer.map(|p| p.translated(position))
            },
            layer,
            position,
            bounds: self.bounds,
        }
    }
}

impl Default for UpdateContext<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}
