use glam::Vec2;

use crate::options::{PickModes, PickingOptions};

/// One pick at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRequest {
    /// Screen position in physical pixels, origin top-left.
    pub screen: Vec2,
    /// Display index the position belongs to.
    pub display: u32,
    /// Candidate sources to consult.
    pub modes: PickModes,
    /// Keep transparent renderers and faint UI graphics.
    pub include_transparent: bool,
}

impl PickRequest {
    /// Request at `screen` on display 0 with default modes, opaque only.
    #[must_use]
    pub fn at(screen: Vec2) -> Self {
        Self {
            screen,
            display: 0,
            modes: PickModes::default(),
            include_transparent: false,
        }
    }

    /// Request at `screen` using the configured click defaults.
    #[must_use]
    pub fn from_options(screen: Vec2, options: &PickingOptions) -> Self {
        Self {
            screen,
            display: options.display,
            modes: options.modes,
            include_transparent: options.include_transparent,
        }
    }

    /// Same request with different modes.
    #[must_use]
    pub fn with_modes(self, modes: PickModes) -> Self {
        Self { modes, ..self }
    }

    /// Same request with the transparency flag set.
    #[must_use]
    pub fn including_transparent(self, include: bool) -> Self {
        Self {
            include_transparent: include,
            ..self
        }
    }
}
