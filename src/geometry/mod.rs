//! Pickable geometry and ray intersection.

/// Nearest-hit ray vs. triangle-mesh intersection.
pub mod intersect;
/// Triangle meshes, skinned meshes, and sprite outlines.
pub mod mesh;

pub use intersect::{intersect, RayHit};
pub use mesh::{SkinWeights, SkinnedMesh, Sprite, TriangleMesh};
