//! A modal-aware floating layer stack for terminal user interfaces.
//!
//! Floating surfaces (panels, dialogs, menus) live in a `LayerStack` on top
//! of an optional background. The stack draws them bottom to top with drop
//! shadows, routes the pointer to the topmost layer under it, and supports a
//! modal floor that blocks and optionally dims everything beneath it.

pub mod components;
pub mod config;
pub mod constants;
pub mod context;
pub mod drivers;
pub mod event_loop;
pub mod layers;
pub mod layout;
pub mod modal;
pub mod runner;
pub mod shadow;
pub mod stack;
pub mod surface;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use config::{ConfigError, StackConfig};
pub use context::{Pointer, PointerState, UpdateContext};
pub use layers::Layers;
pub use layout::{FloatRect, LayerPos, LayerSize};
pub use modal::ModalState;
pub use shadow::{ShadowContext, ShadowStyle, Skin, SkinRegion, ThemeSkin};
pub use stack::LayerStack;
pub use surface::{FloatingSurface, Layer, LayerId, StackId, Surface};
pub use ui::UiFrame;
