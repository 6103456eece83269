//! Triangle payloads the picker ray-tests.
//!
//! Skinned meshes and sprites are not tested directly: each is baked into a
//! plain [`TriangleMesh`] first. Baking writes into a caller-owned scratch
//! mesh so repeated picks reuse the same allocations.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Indexed triangle list in object-local space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from positions and indices.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Axis-aligned quad in the local XY plane centered on the origin,
    /// facing +Z.
    #[must_use]
    pub fn quad(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there is nothing to ray-test.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangle_count() == 0
    }

    /// Drop all geometry while keeping the allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
    }

    /// Vertices of triangle `tri`, or `None` if any index is out of range.
    #[must_use]
    pub fn triangle(&self, tri: usize) -> Option<[Vec3; 3]> {
        let base = tri * 3;
        let corner = |k: usize| -> Option<Vec3> {
            let idx = *self.indices.get(base + k)?;
            self.positions.get(idx as usize).copied()
        };
        Some([corner(0)?, corner(1)?, corner(2)?])
    }
}

/// Up to four bone influences on one vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinWeights {
    /// Bone indices into [`SkinnedMesh::bones`].
    pub bones: [u16; 4],
    /// Blend weights matching `bones`.
    pub weights: [f32; 4],
}

/// A mesh deformed by linear-blend skinning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinnedMesh {
    /// Bind-pose geometry.
    pub mesh: TriangleMesh,
    /// Per-vertex influences. Vertices past the end keep their bind pose.
    pub skin: Vec<SkinWeights>,
    /// Current skinning matrices (bone pose × inverse bind pose), relative
    /// to the renderer's local space.
    pub bones: Vec<Mat4>,
}

impl SkinnedMesh {
    /// Bake the current pose into `out`, replacing its contents.
    pub fn bake_into(&self, out: &mut TriangleMesh) {
        out.clear();
        out.positions.extend(
            self.mesh
                .positions
                .iter()
                .enumerate()
                .map(|(i, &p)| self.skin_vertex(i, p)),
        );
        out.indices.extend_from_slice(&self.mesh.indices);
    }

    fn skin_vertex(&self, index: usize, bind: Vec3) -> Vec3 {
        let Some(influence) = self.skin.get(index) else {
            return bind;
        };
        let mut blended = Vec3::ZERO;
        let mut total = 0.0;
        for (&bone, &weight) in influence.bones.iter().zip(&influence.weights)
        {
            if weight <= 0.0 {
                continue;
            }
            let Some(m) = self.bones.get(bone as usize) else {
                continue;
            };
            blended += m.transform_point3(bind) * weight;
            total += weight;
        }
        if total > 0.0 {
            blended / total
        } else {
            bind
        }
    }
}

/// Flat sprite outline, triangulated, in sprite-local units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprite {
    /// Outline vertices around the sprite pivot.
    pub vertices: Vec<Vec2>,
    /// Triangle indices into `vertices`.
    pub triangles: Vec<u16>,
}

impl Sprite {
    /// Rectangular sprite of the given size centered on its pivot.
    #[must_use]
    pub fn rect(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            triangles: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Bake the outline into `out` on the local XY plane, mirroring about
    /// the pivot for each flip flag.
    pub fn bake_into(&self, out: &mut TriangleMesh, flip_x: bool, flip_y: bool) {
        let sx = if flip_x { -1.0 } else { 1.0 };
        let sy = if flip_y { -1.0 } else { 1.0 };
        out.clear();
        out.positions.extend(
            self.vertices
                .iter()
                .map(|v| Vec3::new(v.x * sx, v.y * sy, 0.0)),
        );
        out.indices
            .extend(self.triangles.iter().map(|&i| u32::from(i)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_no_vertices_or_no_triangles() {
        assert!(TriangleMesh::default().is_empty());
        let no_tris = TriangleMesh::new(vec![Vec3::ZERO; 3], vec![0, 1]);
        assert!(no_tris.is_empty());
        let no_verts = TriangleMesh::new(Vec::new(), vec![0, 1, 2]);
        assert!(no_verts.is_empty());
        assert!(!TriangleMesh::quad(1.0, 1.0).is_empty());
    }

    #[test]
    fn out_of_range_triangle_is_none() {
        let mesh = TriangleMesh::new(vec![Vec3::ZERO; 3], vec![0, 1, 7]);
        assert!(mesh.triangle(0).is_none());
        assert!(mesh.triangle(1).is_none());
    }

    #[test]
    fn skinning_blends_bone_matrices() {
        let skinned = SkinnedMesh {
            mesh: TriangleMesh::new(
                vec![Vec3::X, Vec3::Y, Vec3::Z],
                vec![0, 1, 2],
            ),
            skin: vec![
                SkinWeights {
                    bones: [0, 0, 0, 0],
                    weights: [1.0, 0.0, 0.0, 0.0],
                },
                SkinWeights {
                    bones: [0, 1, 0, 0],
                    weights: [0.5, 0.5, 0.0, 0.0],
                },
            ],
            bones: vec![
                Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
                Mat4::IDENTITY,
            ],
        };
        let mut out = TriangleMesh::default();
        skinned.bake_into(&mut out);
        assert_eq!(out.positions[0], Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(out.positions[1], Vec3::new(0.0, 1.0, 1.0));
        // No influence entry: bind pose
        assert_eq!(out.positions[2], Vec3::Z);
        assert_eq!(out.indices, vec![0, 1, 2]);
    }

    #[test]
    fn missing_bone_falls_back_to_bind_pose() {
        let skinned = SkinnedMesh {
            mesh: TriangleMesh::new(vec![Vec3::X], Vec::new()),
            skin: vec![SkinWeights {
                bones: [9, 0, 0, 0],
                weights: [1.0, 0.0, 0.0, 0.0],
            }],
            bones: Vec::new(),
        };
        let mut out = TriangleMesh::default();
        skinned.bake_into(&mut out);
        assert_eq!(out.positions, vec![Vec3::X]);
    }

    #[test]
    fn sprite_flip_mirrors_about_pivot() {
        let sprite = Sprite {
            vertices: vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 0.0), Vec2::ZERO],
            triangles: vec![0, 1, 2],
        };
        let mut out = TriangleMesh::default();
        sprite.bake_into(&mut out, true, false);
        assert_eq!(out.positions[0], Vec3::new(-1.0, 2.0, 0.0));
        sprite.bake_into(&mut out, false, true);
        assert_eq!(out.positions[0], Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(out.positions.len(), 3);
        assert_eq!(out.indices, vec![0, 1, 2]);
    }

    #[test]
    fn bake_reuses_scratch_allocation() {
        let sprite = Sprite::rect(2.0, 2.0);
        let mut scratch = TriangleMesh::default();
        sprite.bake_into(&mut scratch, false, false);
        let capacity = scratch.positions.capacity();
        let ptr = scratch.positions.as_ptr();
        sprite.bake_into(&mut scratch, true, true);
        assert_eq!(scratch.positions.capacity(), capacity);
        assert_eq!(scratch.positions.as_ptr(), ptr);
    }
}
