use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::{CameraId, CanvasId, ObjectId, Transform};

/// How a canvas is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Drawn over everything in screen pixels; no camera involved.
    #[default]
    ScreenSpaceOverlay,
    /// Drawn at a plane in front of a camera.
    ScreenSpaceCamera,
    /// Placed in the world like any other object.
    WorldSpace,
}

/// Axis-aligned rectangle in a node's local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner.
    pub min: Vec2,
    /// Maximum corner.
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its corners.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centered on the local origin.
    #[must_use]
    pub fn centered(size: Vec2) -> Self {
        Self {
            min: -size * 0.5,
            max: size * 0.5,
        }
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Point mapped to `[0, 1]²` over the rectangle (unclamped).
    #[must_use]
    pub fn normalized(&self, p: Vec2) -> Vec2 {
        let size = self.size();
        Vec2::new(
            if size.x > 0.0 { (p.x - self.min.x) / size.x } else { 0.0 },
            if size.y > 0.0 { (p.y - self.min.y) / size.y } else { 0.0 },
        )
    }
}

/// Alpha multiplier applied to a node and its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGroup {
    /// Alpha multiplier.
    pub alpha: f32,
    /// Start a fresh alpha chain here instead of inheriting parents'.
    pub ignore_parent_groups: bool,
}

impl Default for CanvasGroup {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            ignore_parent_groups: false,
        }
    }
}

/// Clipping region; points outside it cannot hit the node or its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectMask {
    /// Valid region in the node's local space.
    pub rect: Rect,
}

/// Host-supplied custom hit test.
pub trait RaycastFilter: fmt::Debug {
    /// Whether `local` (inside `rect`) should count as a hit.
    fn accepts(&self, local: Vec2, rect: &Rect) -> bool;
}

/// Extra containment rule a graphic declares on top of its rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitRule {
    /// Only the ellipse inscribed in the rectangle counts.
    Ellipse,
    /// Sample a coarse alpha grid over the rectangle (row 0 at `rect.min.y`)
    /// and require at least `threshold`.
    AlphaGrid {
        /// Grid width in cells.
        columns: u32,
        /// Grid height in cells.
        rows: u32,
        /// Row-major cell alphas.
        alpha: Vec<f32>,
        /// Minimum alpha that counts as a hit.
        threshold: f32,
    },
    /// Host callback.
    #[serde(skip)]
    Custom(Arc<dyn RaycastFilter>),
}

impl HitRule {
    /// Whether `local` passes the rule. Points outside the grid miss.
    #[must_use]
    pub fn accepts(&self, local: Vec2, rect: &Rect) -> bool {
        match self {
            Self::Ellipse => {
                let uv = rect.normalized(local) * 2.0 - Vec2::ONE;
                uv.length_squared() <= 1.0
            }
            Self::AlphaGrid {
                columns,
                rows,
                alpha,
                threshold,
            } => {
                if *columns == 0 || *rows == 0 {
                    return false;
                }
                let uv = rect.normalized(local);
                if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
                    return false;
                }
                let col = grid_cell(uv.x, *columns) as usize;
                let row = grid_cell(uv.y, *rows) as usize;
                row.checked_mul(*columns as usize)
                    .and_then(|i| i.checked_add(col))
                    .and_then(|i| alpha.get(i))
                    .is_some_and(|a| *a >= *threshold)
            }
            Self::Custom(filter) => filter.accepts(local, rect),
        }
    }
}

/// Cell index of normalized coordinate `t` on an axis of `cells` cells.
fn grid_cell(t: f32, cells: u32) -> u32 {
    ((t * cells as f32) as u32).min(cells - 1)
}

/// A drawable UI element on a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Graphic {
    /// Drawn area in the node's local space.
    pub rect: Rect,
    /// Draw order within the canvas; `-1` means "not drawn".
    pub depth: i32,
    /// Color alpha before group multipliers.
    pub alpha: f32,
    /// Participates in event raycasts.
    pub raycast_target: bool,
    /// Culled by the render backend this frame.
    pub culled: bool,
    /// Backend skips drawing when fully transparent.
    pub cull_transparent: bool,
    /// Extra hit rule.
    pub hit_rule: Option<HitRule>,
}

impl Default for Graphic {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            depth: 0,
            alpha: 1.0,
            raycast_target: true,
            culled: false,
            cull_transparent: false,
            hit_rule: None,
        }
    }
}

/// Node of a canvas hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiNode {
    /// Object owning the node.
    pub id: ObjectId,
    /// Active in the hierarchy.
    pub active: bool,
    /// Object layer (0..31).
    pub layer: u8,
    /// Placement relative to the parent node. Overlay canvases use screen
    /// pixels as world space.
    pub transform: Transform,
    /// Alpha group on this node.
    pub group: Option<CanvasGroup>,
    /// Clip region on this node.
    pub mask: Option<RectMask>,
    /// Drawable on this node.
    pub graphic: Option<Graphic>,
    /// Child nodes in sibling order.
    pub children: Vec<UiNode>,
}

impl Default for UiNode {
    fn default() -> Self {
        Self {
            id: ObjectId(0),
            active: true,
            layer: 0,
            transform: Transform::IDENTITY,
            group: None,
            mask: None,
            graphic: None,
            children: Vec::new(),
        }
    }
}

/// Root canvas and its hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    /// Canvas identifier.
    pub id: CanvasId,
    /// Canvas component enabled.
    pub enabled: bool,
    /// Placement mode.
    pub render_mode: RenderMode,
    /// Event camera for camera and world modes.
    pub camera: Option<CameraId>,
    /// Display index for overlay canvases and camera lookup.
    pub target_display: u32,
    /// Sorting-layer id shared by every graphic on the canvas.
    pub sorting_layer_id: i32,
    /// Order within the sorting layer.
    pub sorting_order: i32,
    /// Composition order among canvases.
    pub render_order: i32,
    /// Hierarchy root.
    pub root: UiNode,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            id: CanvasId(0),
            enabled: true,
            render_mode: RenderMode::ScreenSpaceOverlay,
            camera: None,
            target_display: 0,
            sorting_layer_id: 0,
            sorting_order: 0,
            render_order: 0,
            root: UiNode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_rule_rejects_corners() {
        let rect = Rect::centered(Vec2::new(10.0, 10.0));
        assert!(HitRule::Ellipse.accepts(Vec2::ZERO, &rect));
        assert!(!HitRule::Ellipse.accepts(Vec2::new(4.8, 4.8), &rect));
    }

    #[test]
    fn alpha_grid_samples_cells() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let rule = HitRule::AlphaGrid {
            columns: 2,
            rows: 2,
            alpha: vec![1.0, 0.0, 0.0, 1.0],
            threshold: 0.5,
        };
        assert!(rule.accepts(Vec2::new(0.5, 0.5), &rect));
        assert!(!rule.accepts(Vec2::new(1.5, 0.5), &rect));
        assert!(rule.accepts(Vec2::new(2.0, 2.0), &rect));
        assert!(!rule.accepts(Vec2::new(3.0, 0.5), &rect));
    }

    #[test]
    fn oversized_alpha_grid_misses_instead_of_overflowing() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let rule = HitRule::AlphaGrid {
            columns: u32::MAX,
            rows: u32::MAX,
            alpha: vec![1.0; 4],
            threshold: 0.5,
        };
        assert!(!rule.accepts(Vec2::new(1.5, 1.5), &rect));
        assert!(rule.accepts(Vec2::ZERO, &rect));
    }

    #[test]
    fn custom_filter_is_consulted() {
        #[derive(Debug)]
        struct LeftHalf;
        impl RaycastFilter for LeftHalf {
            fn accepts(&self, local: Vec2, rect: &Rect) -> bool {
                local.x < (rect.min.x + rect.max.x) * 0.5
            }
        }
        let rect = Rect::centered(Vec2::splat(4.0));
        let rule = HitRule::Custom(Arc::new(LeftHalf));
        assert!(rule.accepts(Vec2::new(-1.0, 0.0), &rect));
        assert!(!rule.accepts(Vec2::new(1.0, 0.0), &rect));
    }

    #[test]
    fn canvas_parses_from_toml() {
        let canvas: Canvas = toml::from_str(
            r#"
id = 3
render_order = 5
[root]
id = 30
[root.graphic]
depth = 2
alpha = 0.5
rect = { min = [-10.0, -10.0], max = [10.0, 10.0] }
[root.graphic.hit_rule]
kind = "ellipse"
"#,
        )
        .unwrap();
        assert_eq!(canvas.id, CanvasId(3));
        assert_eq!(canvas.render_mode, RenderMode::ScreenSpaceOverlay);
        let graphic = canvas.root.graphic.unwrap();
        assert_eq!(graphic.depth, 2);
        assert!(graphic.raycast_target);
        assert!(matches!(graphic.hit_rule, Some(HitRule::Ellipse)));
    }
}
