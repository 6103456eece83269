use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Mouse gesture parameters for click picking.
pub struct InputOptions {
    /// Maximum cursor travel (pixels) between press and release that still
    /// counts as a click.
    #[schemars(
        title = "Click Drag Threshold",
        range(min = 0.0, max = 32.0),
        extend("step" = 1.0)
    )]
    pub click_drag_threshold: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            click_drag_threshold: 4.0,
        }
    }
}
