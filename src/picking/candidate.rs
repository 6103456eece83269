use glam::Vec3;

use crate::scene::{CameraId, CanvasId, ObjectId};

/// Which collector path produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitSource {
    /// Static mesh renderer.
    Mesh,
    /// Skinned mesh renderer (baked pose).
    SkinnedMesh,
    /// Sprite renderer.
    Sprite,
    /// UI graphic.
    Graphic,
    /// Physics collider.
    Collider,
}

/// The camera a candidate was seen through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRef {
    /// Camera identifier.
    pub id: CameraId,
    /// Camera compositing depth.
    pub depth: f32,
}

/// The root canvas a UI candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRef {
    /// Canvas identifier.
    pub id: CanvasId,
    /// Order in which the canvas is composited.
    pub render_order: i32,
}

/// One ray/shape intersection result.
///
/// Built fresh for every pick; `distance` is never negative and `canvas` is
/// only set for UI graphics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCandidate {
    /// Hit object.
    pub object: ObjectId,
    /// Distance along the pick ray (0 for overlay UI).
    pub distance: f32,
    /// Unit surface normal, or zero when unknown.
    pub normal: Vec3,
    /// Camera the hit was found through (`None` for overlay UI).
    pub camera: Option<CameraRef>,
    /// Sorting-layer id.
    pub sorting_layer_id: i32,
    /// Order within the sorting layer.
    pub sorting_order: i32,
    /// UI draw depth (0 outside UI).
    pub depth: i32,
    /// Owning canvas for UI graphics.
    pub canvas: Option<CanvasRef>,
    /// Producing collector path.
    pub source: HitSource,
}

impl HitCandidate {
    /// Candidate with no camera, sorting, or canvas information.
    #[must_use]
    pub fn new(object: ObjectId, distance: f32, source: HitSource) -> Self {
        Self {
            object,
            distance,
            normal: Vec3::ZERO,
            camera: None,
            sorting_layer_id: 0,
            sorting_order: 0,
            depth: 0,
            canvas: None,
            source,
        }
    }

    /// Whether the candidate came from a UI graphic.
    #[must_use]
    pub fn is_ui(&self) -> bool {
        self.canvas.is_some()
    }
}
