//! Host scene capabilities consumed by the picker.
//!
//! The picker never owns scene state. Hosts expose cameras, renderers,
//! physics and the editor selection through the traits below; the
//! [`fixture`] module provides an in-memory implementation of all of them.

pub mod fixture;
mod ids;
mod renderable;
mod sorting;

use glam::Vec3;
pub use ids::{CameraId, CanvasId, ObjectId};
pub use renderable::{Material, RenderPayload, Renderable, Transform};
pub use sorting::{SortingLayer, SortingLayers};

use crate::camera::{PickCamera, Ray};

// ---------------------------------------------------------------------------
// Scene query
// ---------------------------------------------------------------------------

/// Cameras, renderers, and sorting configuration of the current frame.
pub trait SceneQuery {
    /// All cameras, in any order.
    fn cameras(&self) -> Vec<&dyn PickCamera>;
    /// Renderers currently in the scene. Disabled or invisible entries may
    /// be included; the collector filters them.
    fn renderables(&self) -> Vec<&Renderable>;
    /// Sorting-layer id → order value resolution.
    fn sorting_layers(&self) -> &SortingLayers;
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

/// One collider hit reported by the host physics engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsHit {
    /// Object owning the collider.
    pub object: ObjectId,
    /// Distance along the ray.
    pub distance: f32,
    /// Surface normal at the hit.
    pub normal: Vec3,
}

/// Host physics raycast.
pub trait PhysicsQuery {
    /// Every collider on a layer in `layer_mask` hit by `ray`, in any order.
    fn raycast_all(&self, ray: &Ray, layer_mask: u32) -> Vec<PhysicsHit>;
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The editor's current selection.
///
/// Hosts must report every selection change to
/// [`PickSession::on_selection_changed`](crate::picking::PickSession::on_selection_changed),
/// including the ones caused by [`set_active`](Self::set_active).
pub trait SelectionHost {
    /// The active (primary) selected object.
    fn active(&self) -> Option<ObjectId>;
    /// Number of selected objects.
    fn count(&self) -> usize;
    /// Replace the selection with a single object.
    fn set_active(&mut self, id: ObjectId);
}
