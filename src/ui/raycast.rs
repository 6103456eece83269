//! Hierarchy walk that finds the UI graphics under a screen point.

use glam::{Mat4, Vec2, Vec3};

use super::canvas::{Canvas, Graphic, RenderMode, UiNode};
use crate::camera::{PickCamera, Ray};
use crate::geometry::intersect::is_invertible;
use crate::options::TransparencyOptions;
use crate::picking::{CameraRef, CanvasRef, HitCandidate, HitSource};

/// Screen point resolved into a node's local space.
#[derive(Debug, Clone, Copy)]
struct Located {
    point: Vec2,
    distance: f32,
    normal: Vec3,
}

/// Per-pick parameters of a UI raycast.
pub(crate) struct UiRaycaster<'a> {
    pub screen: Vec2,
    pub include_transparent: bool,
    pub transparency: &'a TransparencyOptions,
}

/// Canvas-level state shared by every node of one walk.
struct Walk<'a> {
    canvas: &'a Canvas,
    camera: Option<&'a dyn PickCamera>,
    ray: Option<Ray>,
}

impl UiRaycaster<'_> {
    /// Append every graphic of `canvas` under the screen point to `out`.
    ///
    /// `camera` is the canvas event camera; it must be `Some` for camera and
    /// world canvases and is ignored for overlays. Returns the number of
    /// candidates added.
    pub fn raycast_canvas(
        &self,
        canvas: &Canvas,
        camera: Option<&dyn PickCamera>,
        out: &mut Vec<HitCandidate>,
    ) -> usize {
        if !canvas.enabled {
            return 0;
        }
        let (camera, ray) = match canvas.render_mode {
            RenderMode::ScreenSpaceOverlay => (None, None),
            RenderMode::ScreenSpaceCamera | RenderMode::WorldSpace => {
                let Some(cam) = camera else {
                    log::trace!("canvas {:?} has no event camera", canvas.id);
                    return 0;
                };
                let Some(ray) = cam.screen_point_to_ray(self.screen) else {
                    return 0;
                };
                (Some(cam), Some(ray))
            }
        };
        let walk = Walk {
            canvas,
            camera,
            ray,
        };
        let before = out.len();
        self.visit(&walk, &canvas.root, &Mat4::IDENTITY, 1.0, out);
        out.len() - before
    }

    fn visit(
        &self,
        walk: &Walk<'_>,
        node: &UiNode,
        parent_world: &Mat4,
        parent_alpha: f32,
        out: &mut Vec<HitCandidate>,
    ) {
        if !node.active {
            return;
        }
        let world = *parent_world * node.transform.matrix();
        let alpha = match node.group {
            Some(group) if group.ignore_parent_groups => group.alpha,
            Some(group) => parent_alpha * group.alpha,
            None => parent_alpha,
        };
        let located = locate(walk.ray.as_ref(), self.screen, &world);

        if let Some(mask) = &node.mask {
            if !located.is_some_and(|l| mask.rect.contains(l.point)) {
                return;
            }
        }

        if let (Some(graphic), Some(at)) = (&node.graphic, located) {
            if let Some(candidate) = self.test_graphic(walk, node, graphic, alpha, at) {
                out.push(candidate);
            }
        }

        for child in &node.children {
            self.visit(walk, child, &world, alpha, out);
        }
    }

    fn test_graphic(
        &self,
        walk: &Walk<'_>,
        node: &UiNode,
        graphic: &Graphic,
        group_alpha: f32,
        at: Located,
    ) -> Option<HitCandidate> {
        if graphic.depth < 0 || graphic.culled {
            return None;
        }
        if walk.camera.is_some_and(|cam| !cam.renders_layer(node.layer)) {
            return None;
        }
        let alpha = graphic.alpha * group_alpha;
        if graphic.cull_transparent && alpha <= 0.0 {
            return None;
        }
        if !graphic.rect.contains(at.point) {
            return None;
        }
        if let Some(rule) = &graphic.hit_rule {
            if !rule.accepts(at.point, &graphic.rect) {
                return None;
            }
        }
        if !self.include_transparent
            && self
                .transparency
                .is_invisible_graphic(alpha, graphic.raycast_target)
        {
            log::trace!("skipping faint graphic {} (alpha {alpha})", node.id);
            return None;
        }

        Some(HitCandidate {
            object: node.id,
            distance: at.distance,
            normal: at.normal,
            camera: walk.camera.map(|cam| CameraRef {
                id: cam.id(),
                depth: cam.depth(),
            }),
            sorting_layer_id: walk.canvas.sorting_layer_id,
            sorting_order: walk.canvas.sorting_order,
            depth: graphic.depth,
            canvas: Some(CanvasRef {
                id: walk.canvas.id,
                render_order: walk.canvas.render_order,
            }),
            source: HitSource::Graphic,
        })
    }
}

/// Map the pick point into the local space of a node placed by `world`.
///
/// Overlay canvases (no ray) treat world space as screen pixels. Camera and
/// world canvases intersect the ray with the node's plane; planes behind the
/// ray origin or parallel to it yield `None`.
fn locate(ray: Option<&Ray>, screen: Vec2, world: &Mat4) -> Option<Located> {
    if !is_invertible(world) {
        return None;
    }
    let inv = world.inverse();
    let normal = world.transform_vector3(Vec3::NEG_Z).normalize_or_zero();

    let Some(ray) = ray else {
        let local = inv.transform_point3(Vec3::new(screen.x, screen.y, 0.0));
        return Some(Located {
            point: local.truncate(),
            distance: 0.0,
            normal,
        });
    };

    let origin = world.transform_point3(Vec3::ZERO);
    let plane_normal = inv
        .transpose()
        .transform_vector3(Vec3::Z)
        .normalize_or_zero();
    let t = ray.plane_parameter(origin, plane_normal)?;
    if t < 0.0 {
        return None;
    }
    let local = inv.transform_point3(ray.at(t));
    Some(Located {
        point: local.truncate(),
        distance: t,
        normal,
    })
}
