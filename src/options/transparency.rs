use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transparency", inline)]
#[serde(default)]
/// Thresholds that classify candidates as transparent or faint.
pub struct TransparencyOptions {
    /// Render queue at or above which a material counts as transparent.
    #[schemars(title = "Transparent Queue", range(min = 0, max = 5000))]
    pub transparent_queue_threshold: i32,
    /// Alpha below which a non-raycast-target graphic counts as invisible.
    #[schemars(
        title = "Visible Alpha",
        range(min = 0.0, max = 1.0),
        extend("step" = 0.05)
    )]
    pub ui_visible_alpha: f32,
}

impl Default for TransparencyOptions {
    fn default() -> Self {
        Self {
            transparent_queue_threshold: 3000,
            ui_visible_alpha: 0.9,
        }
    }
}

impl TransparencyOptions {
    /// Whether a material render queue falls in the transparent range.
    #[must_use]
    pub fn is_transparent_queue(&self, render_queue: i32) -> bool {
        render_queue >= self.transparent_queue_threshold
    }

    /// Relaxed "invisible" rule for editor picking.
    ///
    /// Fully transparent graphics are always invisible. Graphics that do not
    /// take part in raycasting must also be nearly opaque to count as
    /// visible, so faint decorative overlays lose to solid objects.
    #[must_use]
    pub fn is_invisible_graphic(&self, alpha: f32, raycast_target: bool) -> bool {
        alpha <= 0.0 || (!raycast_target && alpha < self.ui_visible_alpha)
    }
}
