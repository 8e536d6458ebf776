//! Ready-made surfaces: a tiled backdrop, draggable panels, a modal
//! confirmation dialog, and a view over the in-app log.

pub mod backdrop;
pub mod dialog;
pub mod log_view;
pub mod panel;

pub use backdrop::BackdropSurface;
pub use dialog::{ConfirmAction, DialogSurface, dismiss};
pub use log_view::{LogHandle, LogViewSurface, LogWriter};
pub use panel::{PanelSurface, centered};
