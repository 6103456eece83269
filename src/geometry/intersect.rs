//! Ray vs. triangle-mesh intersection.

use glam::{Mat4, Vec3};

use super::mesh::TriangleMesh;
use crate::camera::Ray;

/// Smallest ray parameter accepted as "in front of" the origin.
const T_EPSILON: f32 = 1e-6;
/// Smallest |cos| between ray and triangle plane accepted as non-parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Nearest intersection of a ray with a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space unit normal facing the ray origin, or zero if the hit
    /// triangle's normal cannot be recovered.
    pub normal: Vec3,
}

/// Intersect a world-space ray with `mesh` placed by `world`.
///
/// Triangles are two-sided. Only hits strictly in front of the origin count;
/// degenerate triangles and out-of-range indices are skipped. Returns `None`
/// for empty meshes, singular transforms, and misses.
#[must_use]
pub fn intersect(ray: &Ray, mesh: &TriangleMesh, world: &Mat4) -> Option<RayHit> {
    if mesh.is_empty() {
        return None;
    }
    if !is_invertible(world) {
        return None;
    }
    let to_local = world.inverse();
    let local = ray.transformed(&to_local);

    let mut best: Option<(f32, Vec3)> = None;
    for tri in 0..mesh.triangle_count() {
        let Some([a, b, c]) = mesh.triangle(tri) else {
            continue;
        };
        let Some(t) = intersect_triangle(&local, a, b, c) else {
            continue;
        };
        let hit = world.transform_point3(local.at(t));
        let distance = hit.distance(ray.origin);
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, (b - a).cross(c - a)));
        }
    }

    best.map(|(distance, local_normal)| {
        // Normals transform by the inverse-transpose
        let normal = to_local
            .transpose()
            .transform_vector3(local_normal)
            .normalize_or_zero();
        let normal = if normal.dot(ray.direction) > 0.0 {
            -normal
        } else {
            normal
        };
        RayHit { distance, normal }
    })
}

/// Whether `m` has a usable inverse.
///
/// The determinant is compared against the product of the basis lengths, so
/// uniformly tiny (or huge) scales stay invertible while collapsed axes do
/// not.
pub(crate) fn is_invertible(m: &Mat4) -> bool {
    let det = m.determinant();
    let volume = m.x_axis.truncate().length()
        * m.y_axis.truncate().length()
        * m.z_axis.truncate().length();
    det.is_finite() && det.abs() > f32::EPSILON * volume
}

/// Möller–Trumbore ray/triangle test. Returns the ray parameter of the hit.
fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let scale = edge1.cross(edge2).length() * ray.direction.length();
    if scale <= f32::MIN_POSITIVE {
        // Zero-area triangle
        return None;
    }

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() <= PARALLEL_EPSILON * scale {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > T_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn hits_quad_in_front() {
        let hit = intersect(
            &ray_down_z(0.1, 0.2),
            &TriangleMesh::quad(2.0, 2.0),
            &Mat4::IDENTITY,
        )
        .unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn misses_outside_quad() {
        let mesh = TriangleMesh::quad(2.0, 2.0);
        assert!(intersect(&ray_down_z(1.5, 0.0), &mesh, &Mat4::IDENTITY)
            .is_none());
    }

    #[test]
    fn geometry_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z).unwrap();
        assert!(intersect(
            &ray,
            &TriangleMesh::quad(2.0, 2.0),
            &Mat4::IDENTITY
        )
        .is_none());
    }

    #[test]
    fn back_faces_hit_with_normal_toward_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = intersect(&ray, &TriangleMesh::quad(2.0, 2.0), &Mat4::IDENTITY)
            .unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn nearest_of_several_layers_wins() {
        let mut mesh = TriangleMesh::quad(2.0, 2.0);
        // Second quad 3 units closer to the ray origin
        let base = mesh.positions.len() as u32;
        let lifted: Vec<Vec3> = mesh
            .positions
            .iter()
            .map(|p| *p + Vec3::new(0.0, 0.0, 3.0))
            .collect();
        mesh.positions.extend(lifted);
        mesh.indices
            .extend([0, 1, 2, 0, 2, 3].iter().map(|i| i + base));
        let hit = intersect(&ray_down_z(0.0, 0.0), &mesh, &Mat4::IDENTITY)
            .unwrap();
        assert!((hit.distance - 7.0).abs() < 1e-5);
    }

    #[test]
    fn world_transform_scales_distance() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(3.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 0.0, 4.0),
        );
        let hit = intersect(
            &ray_down_z(2.5, 0.0),
            &TriangleMesh::quad(2.0, 2.0),
            &world,
        )
        .unwrap();
        assert!((hit.distance - 6.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn millimetre_scale_meshes_are_hit() {
        let hit = intersect(
            &ray_down_z(0.5, 0.0),
            &TriangleMesh::quad(2000.0, 2000.0),
            &Mat4::from_scale(Vec3::splat(0.001)),
        )
        .unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-3);
        assert!((hit.normal - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn invertibility_ignores_uniform_scale() {
        assert!(is_invertible(&Mat4::from_scale(Vec3::splat(1e-4))));
        assert!(is_invertible(&Mat4::from_scale(Vec3::splat(1e4))));
        assert!(!is_invertible(&Mat4::from_scale(Vec3::new(0.002, 0.002, 0.0))));
        assert!(!is_invertible(&Mat4::from_cols_array(&[f32::NAN; 16])));
    }

    #[test]
    fn degenerate_and_broken_triangles_are_skipped() {
        let mesh = TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::Y],
            // collinear triangle, then one with a dangling index
            vec![0, 1, 2, 0, 1, 99],
        );
        assert!(intersect(&ray_down_z(0.5, 0.0), &mesh, &Mat4::IDENTITY)
            .is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(intersect(
            &ray,
            &TriangleMesh::quad(2.0, 2.0),
            &Mat4::IDENTITY
        )
        .is_none());
    }

    #[test]
    fn empty_mesh_or_singular_transform_is_no_hit() {
        let ray = ray_down_z(0.0, 0.0);
        assert!(intersect(&ray, &TriangleMesh::default(), &Mat4::IDENTITY)
            .is_none());
        assert!(intersect(
            &ray,
            &TriangleMesh::quad(2.0, 2.0),
            &Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0))
        )
        .is_none());
    }
}
