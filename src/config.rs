//! Runtime configuration for a layer stack and its host loop.

use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_FRAME_INTERVAL, DEFAULT_SHADOW_WIDTH, MAX_FPS, MAX_SHADOW_WIDTH};
use crate::modal::ModalState;
use crate::shadow::{ShadowStyle, SkinRegion};
use crate::surface::Layer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame rate must be between 1 and {max}, got {got}")]
    FrameRate { got: u32, max: u32 },
    #[error("shadow width must be at most {max}, got {got}")]
    ShadowWidth { got: u16, max: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    pub shadow_width: u16,
    /// Dim content below modal dialogs.
    pub lightbox: bool,
    /// Let the pointer reach layers below a modal floor.
    pub mouse_fallthrough: bool,
    pub frame_interval: Duration,
}

impl StackConfig {
    pub fn with_fps(mut self, fps: u32) -> Result<Self, ConfigError> {
        if fps == 0 || fps > MAX_FPS {
            return Err(ConfigError::FrameRate {
                got: fps,
                max: MAX_FPS,
            });
        }
        self.frame_interval = Duration::from_secs(1) / fps;
        Ok(self)
    }

    pub fn with_shadow_width(mut self, width: u16) -> Result<Self, ConfigError> {
        if width > MAX_SHADOW_WIDTH {
            return Err(ConfigError::ShadowWidth {
                got: width,
                max: MAX_SHADOW_WIDTH,
            });
        }
        self.shadow_width = width;
        Ok(self)
    }

    pub fn with_lightbox(mut self, lightbox: bool) -> Self {
        self.lightbox = lightbox;
        self
    }

    pub fn with_mouse_fallthrough(mut self, fallthrough: bool) -> Self {
        self.mouse_fallthrough = fallthrough;
        self
    }

    pub fn shadow_style(&self) -> ShadowStyle {
        ShadowStyle::new(SkinRegion::SHADOW, self.shadow_width)
    }

    /// Modal session for `floor` using the configured flags.
    pub fn modal_for(&self, floor: Layer) -> ModalState {
        ModalState::new(floor)
            .with_lightbox(self.lightbox)
            .with_mouse_fallthrough(self.mouse_fallthrough)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            shadow_width: DEFAULT_SHADOW_WIDTH,
            lightbox: true,
            mouse_fallthrough: false,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}
