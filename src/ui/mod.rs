//! UI canvases and the graphic raycast.
//!
//! Hosts expose their canvas hierarchies through [`UiQuery`]; the raycast
//! walks each root canvas, honoring inactive branches, group alpha, masks,
//! and per-graphic hit rules.

mod canvas;
pub(crate) mod raycast;

pub use canvas::{
    Canvas, CanvasGroup, Graphic, HitRule, RaycastFilter, Rect, RectMask,
    RenderMode, UiNode,
};

/// Host UI scene query.
pub trait UiQuery {
    /// Root canvases in any order.
    fn canvases(&self) -> Vec<&Canvas>;
}
