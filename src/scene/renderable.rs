use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::ObjectId;
use crate::geometry::{SkinnedMesh, Sprite, TriangleMesh};

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Translation, rotation, and scale composed into a local-to-world matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World position.
    pub translation: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation, or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

// ---------------------------------------------------------------------------
// Renderable
// ---------------------------------------------------------------------------

/// Material slot of a renderable; only the render queue matters to picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Draw queue; queues at or above the transparent threshold are
    /// treated as see-through.
    pub render_queue: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl Material {
    /// Standard opaque geometry queue.
    pub const OPAQUE: Self = Self { render_queue: 2000 };
    /// Standard transparent queue.
    pub const TRANSPARENT: Self = Self { render_queue: 3000 };
}

/// Shape a renderable draws, one variant per pickable kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPayload {
    /// Static triangle mesh.
    Mesh(TriangleMesh),
    /// Mesh deformed by bones; baked before testing.
    SkinnedMesh(SkinnedMesh),
    /// Flat sprite outline.
    Sprite {
        /// Outline geometry.
        sprite: Sprite,
        /// Mirror horizontally about the pivot.
        #[serde(default)]
        flip_x: bool,
        /// Mirror vertically about the pivot.
        #[serde(default)]
        flip_y: bool,
    },
}

/// A renderer in the host scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// Owning object.
    pub id: ObjectId,
    /// Component enabled and game object active.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Host visibility flag (level-of-detail and occlusion culling).
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Object layer (0..31) tested against camera culling masks.
    #[serde(default)]
    pub layer: u8,
    /// Material slots; an empty list draws nothing.
    #[serde(default = "default_materials")]
    pub materials: Vec<Material>,
    /// Sorting layer id.
    #[serde(default)]
    pub sorting_layer_id: i32,
    /// Order within the sorting layer.
    #[serde(default)]
    pub sorting_order: i32,
    /// Placement in the world.
    #[serde(default)]
    pub transform: Transform,
    /// Drawn shape.
    pub payload: RenderPayload,
}

fn default_true() -> bool {
    true
}

fn default_materials() -> Vec<Material> {
    vec![Material::OPAQUE]
}

impl Renderable {
    /// Enabled, visible, opaque renderable on layer 0 with no sorting.
    #[must_use]
    pub fn new(id: ObjectId, payload: RenderPayload) -> Self {
        Self {
            id,
            enabled: true,
            visible: true,
            layer: 0,
            materials: default_materials(),
            sorting_layer_id: 0,
            sorting_order: 0,
            transform: Transform::IDENTITY,
            payload,
        }
    }

    /// Material that decides transparency (the first slot).
    #[must_use]
    pub fn primary_material(&self) -> Option<&Material> {
        self.materials.first()
    }
}
