//! Authoritative layer membership.
//!
//! `Layers` owns the z-order (last = topmost), the modal session, the
//! default shadow style and pointer capture. The layer stack hands a
//! `&mut Layers` to every surface during the update pass, so surfaces can
//! add, remove, or raise layers (themselves included) while the pass walks
//! its own snapshot of the order.

use crate::layout::LayerPos;
use crate::modal::ModalState;
use crate::shadow::ShadowStyle;
use crate::surface::{Layer, StackId};

#[derive(Debug)]
pub struct Layers {
    id: StackId,
    order: Vec<Layer>,
    modal: Option<ModalState>,
    shadow: ShadowStyle,
    capture: Option<Layer>,
}

impl Layers {
    pub fn new() -> Self {
        Self {
            id: StackId::next(),
            order: Vec::new(),
            modal: None,
            shadow: ShadowStyle::default(),
            capture: None,
        }
    }

    pub fn id(&self) -> StackId {
        self.id
    }

    /// Attach `layer` at `position` as the new topmost layer.
    ///
    /// Layers already attached to any stack, this one included, are left
    /// untouched. Returns whether the layer was attached.
    pub fn add_control(&mut self, layer: &Layer, position: LayerPos) -> bool {
        if let Some(owner) = layer.owner() {
            tracing::debug!(layer = ?layer.id(), ?owner, "add ignored, layer already attached");
            return false;
        }
        layer.set_owner(Some(self.id));
        layer.set_position(position);
        self.order.push(layer.clone());
        tracing::debug!(layer = ?layer.id(), x = position.x, y = position.y, "layer attached");
        true
    }

    /// Detach `layer` if this stack owns it. Returns whether it was removed.
    pub fn remove_control(&mut self, layer: &Layer) -> bool {
        if layer.owner() != Some(self.id) {
            return false;
        }
        layer.set_owner(None);
        self.order.retain(|existing| existing != layer);
        if self.capture.as_ref() == Some(layer) {
            self.capture = None;
        }
        tracing::debug!(layer = ?layer.id(), "layer detached");
        true
    }

    /// Move `layer` to the top of the order. Non-members are ignored.
    pub fn bring_to_top(&mut self, layer: &Layer) -> bool {
        let Some(index) = self.order.iter().position(|existing| existing == layer) else {
            return false;
        };
        if index + 1 != self.order.len() {
            let raised = self.order.remove(index);
            self.order.push(raised);
            tracing::trace!(layer = ?layer.id(), "layer raised");
        }
        true
    }

    pub fn contains(&self, layer: &Layer) -> bool {
        layer.owner() == Some(self.id)
    }

    /// Layers bottom to top.
    pub fn order(&self) -> &[Layer] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn topmost(&self) -> Option<&Layer> {
        self.order.last()
    }

    /// Detach every layer and end any modal session.
    pub fn clear(&mut self) {
        for layer in self.order.drain(..) {
            layer.set_owner(None);
        }
        self.capture = None;
        self.modal = None;
    }

    /// Topmost layer under `point` that could receive the pointer, taking
    /// the modal floor into account.
    pub fn layer_at(&self, point: LayerPos) -> Option<Layer> {
        let modal = self.active_modal();
        let floor = modal.and_then(|m| m.floor_index(&self.order));
        self.order
            .iter()
            .enumerate()
            .rev()
            .filter(|(index, _)| match (modal, floor) {
                (Some(modal), Some(floor)) => modal.admits(*index, floor),
                _ => true,
            })
            .find(|(_, layer)| layer.bounds().contains(point))
            .map(|(_, layer)| layer.clone())
    }

    /// The modal session as configured, whether or not its floor is
    /// currently attached.
    pub fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    /// The modal session if its floor is a member of this stack. A session
    /// whose floor has been detached has no effect until the floor returns
    /// or the session is cleared.
    pub fn active_modal(&self) -> Option<&ModalState> {
        self.modal
            .as_ref()
            .filter(|modal| self.contains(modal.floor()))
    }

    pub fn set_modal(&mut self, modal: ModalState) {
        tracing::debug!(
            floor = ?modal.floor().id(),
            lightbox = modal.lightbox(),
            fallthrough = modal.mouse_fallthrough(),
            "modal session started"
        );
        self.modal = Some(modal);
    }

    pub fn clear_modal(&mut self) -> Option<ModalState> {
        let previous = self.modal.take();
        if let Some(modal) = previous.as_ref() {
            tracing::debug!(floor = ?modal.floor().id(), "modal session ended");
        }
        previous
    }

    /// Start a modal session with its floor forced to the top.
    ///
    /// An unattached floor is attached at its current position first. A
    /// floor owned by another stack leaves everything unchanged.
    pub fn begin_modal(&mut self, modal: ModalState) -> bool {
        let floor = modal.floor().clone();
        if !self.contains(&floor) && !self.add_control(&floor, floor.position()) {
            return false;
        }
        self.bring_to_top(&floor);
        self.set_modal(modal);
        true
    }

    pub fn shadow(&self) -> ShadowStyle {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: ShadowStyle) {
        self.shadow = shadow;
    }

    /// Route the pointer to `layer` regardless of geometry until released,
    /// e.g. for the length of a drag. Only members can capture.
    pub fn capture_pointer(&mut self, layer: &Layer) -> bool {
        if !self.contains(layer) {
            return false;
        }
        self.capture = Some(layer.clone());
        true
    }

    pub fn release_pointer(&mut self, layer: &Layer) {
        if self.capture.as_ref() == Some(layer) {
            self.capture = None;
        }
    }

    pub fn pointer_capture(&self) -> Option<&Layer> {
        self.capture.as_ref()
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Layers {
    fn drop(&mut self) {
        // Dropping the stack must not leave layers pointing at it.
        self.clear();
    }
}
