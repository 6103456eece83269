use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A half-line starting at `origin` and extending along `direction`.
///
/// Directions produced by cameras are unit length; rays mapped into a
/// mesh's local space generally are not, so parameters along a transformed
/// ray are not world distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray with a normalized direction. Returns `None` when the
    /// direction has no usable length.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through an affine transform without renormalizing.
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }

    /// Intersect with the plane through `point` with normal `normal`.
    ///
    /// Returns the ray parameter of the hit, which may be negative (plane
    /// behind the origin). `None` when the ray runs parallel to the plane.
    #[must_use]
    pub fn plane_parameter(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        Some(normal.dot(point - self.origin) / denom)
    }
}
