//! The layer stack container.
//!
//! A `LayerStack` composes an optional background with an ordered set of
//! floating layers. The host drives it once per frame:
//!
//! - `update` walks the layers top to bottom. Only the topmost layer under
//!   the pointer sees it; everything beneath is told the pointer is
//!   unavailable. A modal session adds a hard floor below which nothing sees
//!   the pointer unless fallthrough is enabled. The background goes last and
//!   gets whatever pointer is left.
//! - `render` draws the background, then every layer bottom to top, each
//!   preceded by its drop shadow. A lightboxed modal dims everything drawn
//!   before its floor.
//!
//! Both passes iterate a snapshot of the order taken when the pass starts.
//! Surfaces may add, remove, or raise layers from inside `update`; the
//! snapshot keeps the current pass stable and the next pass sees the result.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::StackConfig;
use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::{FloatRect, LayerPos, LayerSize};
use crate::modal::ModalState;
use crate::shadow::{ShadowContext, ShadowStyle, Skin, ThemeSkin};
use crate::surface::{FloatingSurface, Layer, StackId, Surface};
use crate::ui::UiFrame;

pub struct LayerStack {
    layers: Layers,
    background: Option<Box<dyn FloatingSurface>>,
    bounds: Rect,
    skin: Box<dyn Skin>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: Layers::new(),
            background: None,
            bounds: Rect::default(),
            skin: Box::new(ThemeSkin),
        }
    }

    pub fn from_config(config: &StackConfig) -> Self {
        let mut stack = Self::new();
        stack.layers.set_shadow(config.shadow_style());
        stack
    }

    pub fn id(&self) -> StackId {
        self.layers.id()
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut Layers {
        &mut self.layers
    }

    pub fn add_control(&mut self, layer: &Layer, position: LayerPos) -> bool {
        self.layers.add_control(layer, position)
    }

    pub fn remove_control(&mut self, layer: &Layer) -> bool {
        self.layers.remove_control(layer)
    }

    pub fn bring_to_top(&mut self, layer: &Layer) -> bool {
        self.layers.bring_to_top(layer)
    }

    pub fn order(&self) -> &[Layer] {
        self.layers.order()
    }

    pub fn modal(&self) -> Option<&ModalState> {
        self.layers.modal()
    }

    pub fn set_modal(&mut self, modal: ModalState) {
        self.layers.set_modal(modal);
    }

    pub fn begin_modal(&mut self, modal: ModalState) -> bool {
        self.layers.begin_modal(modal)
    }

    pub fn clear_modal(&mut self) -> Option<ModalState> {
        self.layers.clear_modal()
    }

    pub fn shadow_style(&self) -> ShadowStyle {
        self.layers.shadow()
    }

    pub fn set_shadow_style(&mut self, shadow: ShadowStyle) {
        self.layers.set_shadow(shadow);
    }

    pub fn set_skin(&mut self, skin: impl Skin + 'static) {
        self.skin = Box::new(skin);
    }

    /// Install the background, sized to the container.
    pub fn set_background<S: Surface + 'static>(&mut self, background: S) {
        let mut background: Box<dyn FloatingSurface> = Box::new(background);
        background.set_size(LayerSize::from(self.bounds));
        self.background = Some(background);
    }

    pub fn take_background(&mut self) -> Option<Box<dyn FloatingSurface>> {
        self.background.take()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Borrow the background as its concrete type.
    pub fn background_as<T: Surface + 'static>(&mut self) -> Option<&mut T> {
        let background: &mut dyn FloatingSurface = self.background.as_deref_mut()?;
        background.as_any_mut().downcast_mut::<T>()
    }

    /// Screen area occupied by the container.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn size(&self) -> LayerSize {
        LayerSize::from(self.bounds)
    }

    /// Move or resize the container. Only the background follows; floating
    /// layers keep their own sizes.
    pub fn resize(&mut self, bounds: Rect) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        if let Some(background) = self.background.as_mut() {
            let applied = background.set_size(LayerSize::from(bounds));
            tracing::trace!(width = applied.width, height = applied.height, "background resized");
        }
    }

    fn origin(&self) -> LayerPos {
        LayerPos::new(self.bounds.x as i32, self.bounds.y as i32)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let origin = self.origin();
        let full = Rect::new(0, 0, self.bounds.width, self.bounds.height);
        frame.push_translate(origin.x, origin.y);

        if let Some(background) = self.background.as_mut() {
            background.render(frame);
        }

        let snapshot: Vec<Layer> = self.layers.order().to_vec();
        let dim_before = self
            .layers
            .active_modal()
            .filter(|modal| modal.lightbox())
            .map(|modal| modal.floor().id());
        let shadow = ShadowContext::new(self.layers.shadow(), self.skin.as_ref());

        for layer in &snapshot {
            if Some(layer.id()) == dim_before {
                frame.dim_area(full);
            }
            let position = layer.position();
            let rendered = layer.with_surface_mut(|surface| {
                if shadow.style().is_visible() {
                    surface.render_shadow(frame, position, &shadow);
                }
                frame.push_translate(position.x, position.y);
                surface.render(frame);
                frame.pop_translate();
            });
            if rendered.is_none() {
                tracing::warn!(layer = ?layer.id(), "render skipped, surface is busy");
            }
        }

        frame.pop_translate();
    }

    /// Run one update pass.
    ///
    /// `ctx` is in the host's coordinates; the stack derives its own
    /// container-relative scope from its bounds. A pointer outside the
    /// container is treated as unavailable unless a layer has captured it.
    pub fn update(&mut self, ctx: &UpdateContext<'_>, elapsed: Duration) {
        let container = ctx
            .child(None, self.origin(), false)
            .with_bounds(self.size());
        let snapshot: Vec<Layer> = self.layers.order().to_vec();
        let modal = self.layers.active_modal().cloned();
        let floor = modal
            .as_ref()
            .and_then(|modal| modal.floor_index(&snapshot));
        let admitted = |index: usize| match (&modal, floor) {
            (Some(modal), Some(floor)) => modal.admits(index, floor),
            _ => true,
        };
        let capture = self.layers.pointer_capture().and_then(|captured| {
            snapshot
                .iter()
                .position(|layer| layer == captured)
                .filter(|index| admitted(*index))
                .map(|_| captured.clone())
        });
        // A captured pointer follows its layer even past the container edge.
        let area = FloatRect::new(LayerPos::ORIGIN, self.size());
        let mut live = container
            .pointer()
            .filter(|pointer| capture.is_some() || area.contains(pointer.position));

        for (index, layer) in snapshot.iter().enumerate().rev() {
            let position = layer.position();
            let receives = match live {
                Some(pointer) if admitted(index) => match &capture {
                    Some(captured) => captured == layer,
                    None => layer.bounds().contains(pointer.position),
                },
                _ => false,
            };
            let child = container
                .with_pointer(live)
                .child(Some(layer), position, !receives);
            let layers = &mut self.layers;
            let dispatched =
                layer.with_surface_mut(|surface| surface.update(&child, layers, elapsed));
            if dispatched.is_none() {
                tracing::warn!(layer = ?layer.id(), "update skipped, surface is busy");
            }
            if receives {
                live = None;
            }
        }

        if let Some(background) = self.background.as_mut() {
            let blocked = capture.is_some()
                || matches!((&modal, floor), (Some(modal), Some(_)) if !modal.mouse_fallthrough());
            let pointer = if blocked { None } else { live };
            let child = container.with_pointer(pointer);
            background.update(&child, &mut self.layers, elapsed);
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}
