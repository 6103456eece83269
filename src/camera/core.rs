use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ray::Ray;
use crate::scene::CameraId;

/// Host camera capability consumed by the picker.
///
/// Screen coordinates are physical pixels with the origin at the top-left
/// corner of the camera's viewport and `y` growing downward.
pub trait PickCamera {
    /// Stable camera identifier.
    fn id(&self) -> CameraId;
    /// Display index this camera renders to.
    fn target_display(&self) -> u32;
    /// Bit mask of object layers the camera renders.
    fn culling_mask(&self) -> u32;
    /// Compositing depth; cameras with higher depth draw on top.
    fn depth(&self) -> f32;
    /// World-space ray through a screen point, or `None` if the camera has
    /// no valid projection.
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray>;

    /// Whether objects on `layer` are rendered by this camera.
    fn renders_layer(&self, layer: u8) -> bool {
        layer < 32 && self.culling_mask() & (1u32 << layer) != 0
    }
}

/// Projection model of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Half of the visible height in world units.
        half_height: f32,
    },
}

/// Camera defined by eye position, target, and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Camera identifier.
    pub id: CameraId,
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Projection model.
    pub projection: Projection,
    /// Viewport size in physical pixels.
    pub viewport: Vec2,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Compositing depth.
    pub depth: f32,
    /// Layer mask.
    pub culling_mask: u32,
    /// Display index.
    pub target_display: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            id: CameraId(0),
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Perspective { fovy: 60.0 },
            viewport: Vec2::new(800.0, 600.0),
            znear: 0.1,
            zfar: 1000.0,
            depth: 0.0,
            culling_mask: u32::MAX,
            target_display: 0,
        }
    }
}

impl Camera {
    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // [0,1] depth range for both projections
        let proj = match self.projection {
            Projection::Perspective { fovy } => Mat4::perspective_rh(
                fovy.to_radians(),
                self.aspect(),
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { half_height } => {
                let half_width = half_height * self.aspect();
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.znear,
                    self.zfar,
                )
            }
        };
        proj * view
    }

    /// Screen position of a world point, or `None` when the point is behind
    /// the camera or the viewport is empty.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let clip = self.build_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON || !clip.is_finite() {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

impl PickCamera for Camera {
    fn id(&self) -> CameraId {
        self.id
    }

    fn target_display(&self) -> u32 {
        self.target_display
    }

    fn culling_mask(&self) -> u32 {
        self.culling_mask
    }

    fn depth(&self) -> f32 {
        self.depth
    }

    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let inv = self.build_matrix().inverse();
        if !inv.is_finite() {
            return None;
        }
        let ndc_x = 2.0 * screen.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y;
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(near, far - near)
    }
}
