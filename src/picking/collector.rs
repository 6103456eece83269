//! Candidate collection across renderers, physics colliders, and UI.
//!
//! Every source is optional: a disabled mode or a missing host capability
//! contributes nothing instead of failing the pick.

use super::candidate::{CameraRef, HitCandidate, HitSource};
use super::request::PickRequest;
use crate::camera::{PickCamera, Ray};
use crate::geometry::{intersect, TriangleMesh};
use crate::options::TransparencyOptions;
use crate::scene::{PhysicsQuery, RenderPayload, Renderable, SceneQuery};
use crate::ui::raycast::UiRaycaster;
use crate::ui::{Canvas, RenderMode, UiQuery};

/// Reusable bake targets, one per derived shape kind.
///
/// Skinned meshes and sprites are baked into these before ray testing; the
/// buffers are overwritten for each candidate and keep their allocations
/// across picks.
#[derive(Debug, Default)]
pub struct ScratchMeshes {
    skinned: TriangleMesh,
    sprite: TriangleMesh,
}

/// Counters from one collection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Renderers looked at (per camera).
    pub considered: usize,
    /// Renderers actually ray-tested.
    pub tested: usize,
    /// Renderers skipped for having no vertices or no triangles.
    pub skipped_empty: usize,
    /// Renderers rejected by enable, visibility, layer, material, or
    /// transparency filters.
    pub skipped_filtered: usize,
    /// Canvases walked by the UI raycast.
    pub canvases: usize,
    /// Candidates produced by UI graphics.
    pub ui_hits: usize,
    /// Candidates produced by all sources.
    pub hits: usize,
}

/// Collects raw, unsorted candidates for one request.
pub struct RenderableCollector<'a> {
    request: &'a PickRequest,
    transparency: &'a TransparencyOptions,
    stats: CollectStats,
}

impl<'a> RenderableCollector<'a> {
    /// Collector for `request` classifying transparency with `transparency`.
    #[must_use]
    pub fn new(request: &'a PickRequest, transparency: &'a TransparencyOptions) -> Self {
        Self {
            request,
            transparency,
            stats: CollectStats::default(),
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> CollectStats {
        self.stats
    }

    /// Gather candidates from every enabled source.
    pub fn collect(
        &mut self,
        scene: &dyn SceneQuery,
        ui: Option<&dyn UiQuery>,
        physics: Option<&dyn PhysicsQuery>,
        scratch: &mut ScratchMeshes,
    ) -> Vec<HitCandidate> {
        let modes = self.request.modes;
        let cameras: Vec<&dyn PickCamera> = scene
            .cameras()
            .into_iter()
            .filter(|c| c.target_display() == self.request.display)
            .collect();
        let mut out = Vec::new();

        if modes.renderers || modes.physics {
            let renderables = if modes.renderers {
                scene.renderables()
            } else {
                Vec::new()
            };
            for &camera in &cameras {
                let Some(ray) = camera.screen_point_to_ray(self.request.screen) else {
                    continue;
                };
                for &renderable in &renderables {
                    if let Some(hit) = self.test_renderable(renderable, camera, &ray, scratch) {
                        out.push(hit);
                    }
                }
                if modes.physics {
                    if let Some(physics) = physics {
                        self.collect_physics(physics, camera, &ray, &mut out);
                    }
                }
            }
        }

        if modes.ui {
            if let Some(ui) = ui {
                self.collect_ui(ui, &cameras, &mut out);
            }
        }

        self.stats.hits = out.len();
        log::debug!(
            "collected {} candidates at {:?} on display {} ({:?})",
            out.len(),
            self.request.screen,
            self.request.display,
            self.stats
        );
        out
    }

    fn test_renderable(
        &mut self,
        renderable: &Renderable,
        camera: &dyn PickCamera,
        ray: &Ray,
        scratch: &mut ScratchMeshes,
    ) -> Option<HitCandidate> {
        self.stats.considered += 1;
        if !self.passes_filters(renderable, camera) {
            self.stats.skipped_filtered += 1;
            return None;
        }

        let (mesh, source) = match &renderable.payload {
            RenderPayload::Mesh(mesh) => (mesh, HitSource::Mesh),
            RenderPayload::SkinnedMesh(skinned) => {
                skinned.bake_into(&mut scratch.skinned);
                (&scratch.skinned, HitSource::SkinnedMesh)
            }
            RenderPayload::Sprite {
                sprite,
                flip_x,
                flip_y,
            } => {
                sprite.bake_into(&mut scratch.sprite, *flip_x, *flip_y);
                (&scratch.sprite, HitSource::Sprite)
            }
        };
        if mesh.is_empty() {
            self.stats.skipped_empty += 1;
            return None;
        }

        self.stats.tested += 1;
        let hit = intersect(ray, mesh, &renderable.transform.matrix())?;
        Some(HitCandidate {
            object: renderable.id,
            distance: hit.distance,
            normal: hit.normal,
            camera: Some(camera_ref(camera)),
            sorting_layer_id: renderable.sorting_layer_id,
            sorting_order: renderable.sorting_order,
            depth: 0,
            canvas: None,
            source,
        })
    }

    fn passes_filters(&self, renderable: &Renderable, camera: &dyn PickCamera) -> bool {
        if !renderable.enabled || !renderable.visible {
            return false;
        }
        if !camera.renders_layer(renderable.layer) {
            return false;
        }
        let Some(material) = renderable.primary_material() else {
            return false;
        };
        if !self.request.include_transparent
            && self.transparency.is_transparent_queue(material.render_queue)
        {
            log::trace!("skipping transparent renderer {}", renderable.id);
            return false;
        }
        true
    }

    fn collect_physics(
        &self,
        physics: &dyn PhysicsQuery,
        camera: &dyn PickCamera,
        ray: &Ray,
        out: &mut Vec<HitCandidate>,
    ) {
        let mask = camera.culling_mask();
        let camera = camera_ref(camera);
        out.extend(
            physics
                .raycast_all(ray, mask)
                .into_iter()
                .filter(|h| h.distance >= 0.0)
                .map(|h| HitCandidate {
                    normal: h.normal,
                    camera: Some(camera),
                    ..HitCandidate::new(h.object, h.distance, HitSource::Collider)
                }),
        );
    }

    fn collect_ui(
        &mut self,
        ui: &dyn UiQuery,
        cameras: &[&dyn PickCamera],
        out: &mut Vec<HitCandidate>,
    ) {
        let caster = UiRaycaster {
            screen: self.request.screen,
            include_transparent: self.request.include_transparent,
            transparency: self.transparency,
        };
        for canvas in ui.canvases() {
            let camera = match canvas.render_mode {
                RenderMode::ScreenSpaceOverlay => {
                    if canvas.target_display != self.request.display {
                        continue;
                    }
                    None
                }
                RenderMode::ScreenSpaceCamera | RenderMode::WorldSpace => {
                    let Some(camera) = event_camera(canvas, cameras) else {
                        continue;
                    };
                    Some(camera)
                }
            };
            self.stats.canvases += 1;
            self.stats.ui_hits += caster.raycast_canvas(canvas, camera, out);
        }
    }
}

/// Event camera of a camera/world canvas among the display's cameras: the
/// canvas's own camera if it renders to this display, else the first one.
fn event_camera<'c>(canvas: &Canvas, cameras: &[&'c dyn PickCamera]) -> Option<&'c dyn PickCamera> {
    match canvas.camera {
        Some(id) => cameras.iter().copied().find(|c| c.id() == id),
        None => cameras.first().copied(),
    }
}

fn camera_ref(camera: &dyn PickCamera) -> CameraRef {
    CameraRef {
        id: camera.id(),
        depth: camera.depth(),
    }
}
