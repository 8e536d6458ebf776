use crate::surface::Layer;

/// An active modal session.
///
/// The floor is the lowest layer that stays interactive, usually the modal
/// dialog itself. Everything below it loses the pointer unless
/// `mouse_fallthrough` is set, and is dimmed when `lightbox` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    floor: Layer,
    lightbox: bool,
    mouse_fallthrough: bool,
}

impl ModalState {
    /// A lightboxed modal that blocks input below `floor`.
    pub fn new(floor: Layer) -> Self {
        Self {
            floor,
            lightbox: true,
            mouse_fallthrough: false,
        }
    }

    pub fn with_lightbox(mut self, lightbox: bool) -> Self {
        self.lightbox = lightbox;
        self
    }

    pub fn with_mouse_fallthrough(mut self, fallthrough: bool) -> Self {
        self.mouse_fallthrough = fallthrough;
        self
    }

    pub fn floor(&self) -> &Layer {
        &self.floor
    }

    pub fn lightbox(&self) -> bool {
        self.lightbox
    }

    pub fn mouse_fallthrough(&self) -> bool {
        self.mouse_fallthrough
    }

    /// Index of the floor in `order`, if it is a member.
    pub fn floor_index(&self, order: &[Layer]) -> Option<usize> {
        order.iter().position(|layer| *layer == self.floor)
    }

    /// Whether the layer at `index` may receive the pointer given the floor
    /// sits at `floor_index`.
    pub fn admits(&self, index: usize, floor_index: usize) -> bool {
        self.mouse_fallthrough || index >= floor_index
    }
}
