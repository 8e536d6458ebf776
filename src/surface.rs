//! Surfaces and the layer handles that carry them.
//!
//! A `Surface` is anything that can report a size, draw itself, and advance
//! its own state once per frame. A `Layer` is a cheap, cloneable handle that
//! wraps a surface with the bookkeeping the layer stack needs: a stable
//! identity, a container-space position, and a back-reference to the stack
//! it is attached to.
//!
//! The stack holds layers by membership only. Whoever created a layer keeps
//! its own clone and decides when the surface goes away; detaching a layer
//! never drops it.

use std::any::Any;
use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::{FloatRect, LayerPos, LayerSize};
use crate::shadow::ShadowContext;
use crate::ui::UiFrame;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_STACK_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identity of a layer stack, used as the owner back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackId(u64);

impl StackId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

pub trait Surface {
    fn size(&self) -> LayerSize;

    /// Request a new size. Returns the size actually applied, which may be
    /// clamped or left unchanged.
    fn set_size(&mut self, size: LayerSize) -> LayerSize;

    /// Draw the surface. The frame is already translated so local `(0, 0)`
    /// is the surface's top-left corner.
    fn render(&mut self, frame: &mut UiFrame<'_>);

    /// Draw the drop shadow in untranslated container space.
    fn render_shadow(
        &self,
        frame: &mut UiFrame<'_>,
        position: LayerPos,
        shadow: &ShadowContext<'_>,
    ) {
        shadow.draw(frame, FloatRect::new(position, self.size()));
    }

    fn update(&mut self, _ctx: &UpdateContext<'_>, _layers: &mut Layers, _elapsed: Duration) {}
}

/// A surface that can be layered and downcast back to its concrete type.
pub trait FloatingSurface: Surface + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Surface + Any> FloatingSurface for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct LayerInner {
    id: LayerId,
    owner: Cell<Option<StackId>>,
    position: Cell<LayerPos>,
    last_size: Cell<LayerSize>,
    surface: RefCell<Box<dyn FloatingSurface>>,
}

/// Shared handle to a floating surface.
///
/// Clones refer to the same surface. Equality is identity.
#[derive(Clone)]
pub struct Layer {
    inner: Rc<LayerInner>,
}

impl Layer {
    pub fn new<S: Surface + 'static>(surface: S) -> Self {
        let size = surface.size();
        Self {
            inner: Rc::new(LayerInner {
                id: LayerId::next(),
                owner: Cell::new(None),
                position: Cell::new(LayerPos::ORIGIN),
                last_size: Cell::new(size),
                surface: RefCell::new(Box::new(surface)),
            }),
        }
    }

    pub fn id(&self) -> LayerId {
        self.inner.id
    }

    pub fn owner(&self) -> Option<StackId> {
        self.inner.owner.get()
    }

    pub fn is_attached(&self) -> bool {
        self.owner().is_some()
    }

    pub(crate) fn set_owner(&self, owner: Option<StackId>) {
        self.inner.owner.set(owner);
    }

    pub fn position(&self) -> LayerPos {
        self.inner.position.get()
    }

    pub fn set_position(&self, position: LayerPos) {
        self.inner.position.set(position);
    }

    /// Current size of the surface.
    ///
    /// While the surface is busy (for instance when a surface asks for its
    /// own size from inside `update`), the size observed at the end of its
    /// last pass is returned instead.
    pub fn size(&self) -> LayerSize {
        match self.inner.surface.try_borrow() {
            Ok(surface) => surface.size(),
            Err(_) => self.inner.last_size.get(),
        }
    }

    /// Resize the surface, returning the size it actually took. A busy
    /// surface keeps its current size.
    pub fn set_size(&self, size: LayerSize) -> LayerSize {
        match self.inner.surface.try_borrow_mut() {
            Ok(mut surface) => {
                let applied = surface.set_size(size);
                self.inner.last_size.set(applied);
                applied
            }
            Err(_) => {
                tracing::warn!(layer = ?self.id(), "resize ignored, surface is busy");
                self.inner.last_size.get()
            }
        }
    }

    /// Container-space rectangle covered by the layer.
    pub fn bounds(&self) -> FloatRect {
        FloatRect::new(self.position(), self.size())
    }

    /// Borrow the surface as its concrete type.
    ///
    /// Returns `None` when the type does not match or the surface is
    /// already borrowed.
    pub fn borrow_as<T: Surface + 'static>(&self) -> Option<RefMut<'_, T>> {
        let guard = self.inner.surface.try_borrow_mut().ok()?;
        RefMut::filter_map(guard, |surface| (**surface).as_any_mut().downcast_mut::<T>()).ok()
    }

    /// Run `f` with exclusive access to the surface. Returns `None` without
    /// calling `f` when the surface is already borrowed.
    pub(crate) fn with_surface_mut<R>(
        &self,
        f: impl FnOnce(&mut dyn FloatingSurface) -> R,
    ) -> Option<R> {
        let mut guard = self.inner.surface.try_borrow_mut().ok()?;
        let out = f(&mut **guard);
        self.inner.last_size.set(guard.size());
        Some(out)
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Layer {}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id())
            .field("owner", &self.owner())
            .field("position", &self.position())
            .finish()
    }
}
