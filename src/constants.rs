//! Shared crate-wide constants.

use std::time::Duration;

/// Minimum number of visible cells a floating layer must keep within the
/// container so the user can grab its chrome again.
pub const MIN_FLOATING_VISIBLE_MARGIN: u16 = 4;

/// Default drop shadow width in columns.
///
/// The vertical offset is derived from this (see `ShadowStyle::offset`)
/// because terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_SHADOW_WIDTH: u16 = 2;

/// Upper bound accepted for a configured shadow width.
pub const MAX_SHADOW_WIDTH: u16 = 8;

/// Default frame rate of the host loop.
pub const DEFAULT_FPS: u32 = 60;

/// Upper bound accepted for a configured frame rate.
pub const MAX_FPS: u32 = 240;

/// Frame interval used when nothing else is configured.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Number of log lines retained by the in-app log buffer.
pub const DEFAULT_LOG_LINES: usize = 2000;
