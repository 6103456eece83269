use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which candidate sources a pick consults.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[schemars(title = "Pick Modes", inline)]
#[serde(default)]
pub struct PickModes {
    /// Ray-test renderers (meshes, skinned meshes, sprites).
    #[schemars(title = "Renderers")]
    pub renderers: bool,
    /// Ask the host physics query for collider hits.
    #[schemars(title = "Physics")]
    pub physics: bool,
    /// Walk UI canvases for graphics under the point.
    #[schemars(title = "UI")]
    pub ui: bool,
}

impl Default for PickModes {
    fn default() -> Self {
        Self {
            renderers: true,
            physics: false,
            ui: true,
        }
    }
}

impl PickModes {
    /// Every source enabled.
    pub const ALL: Self = Self {
        renderers: true,
        physics: true,
        ui: true,
    };

    /// Whether no source is enabled at all.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.renderers || self.physics || self.ui)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
/// Defaults applied to pick requests built from input events.
pub struct PickingOptions {
    /// Candidate sources consulted by click picks.
    pub modes: PickModes,
    /// Keep transparent renderers and faint UI graphics as candidates.
    #[schemars(title = "Include Transparent")]
    pub include_transparent: bool,
    /// Display index click picks target.
    #[schemars(title = "Display", range(min = 0, max = 7))]
    pub display: u32,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            modes: PickModes::default(),
            include_transparent: false,
            display: 0,
        }
    }
}
