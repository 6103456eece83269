//! In-memory scene implementing every host capability.
//!
//! Used by the command-line tool and the tests. A fixture is normally loaded
//! from TOML:
//!
//! ```toml
//! [[cameras]]
//! id = 0
//! eye = [0.0, 0.0, 10.0]
//!
//! [[renderables]]
//! id = 1
//! [renderables.payload]
//! kind = "mesh"
//! positions = [[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]
//! indices = [0, 1, 2]
//!
//! [[colliders]]
//! object = 2
//! center = [0.0, 0.0, -3.0]
//! radius = 1.0
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    ObjectId, PhysicsHit, PhysicsQuery, Renderable, SceneQuery, SelectionHost,
    SortingLayers,
};
use crate::camera::{Camera, PickCamera, Ray};
use crate::error::PickError;
use crate::ui::{Canvas, UiQuery};

/// Sphere collider answered by the fixture's physics raycast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Object owning the collider.
    pub object: ObjectId,
    /// World-space center.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
    /// Object layer (0..31).
    #[serde(default)]
    pub layer: u8,
}

impl SphereCollider {
    /// Entry hit along `ray`. Rays starting inside the sphere do not hit it.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<PhysicsHit> {
        let a = ray.direction.length_squared();
        if a <= f32::EPSILON || self.radius <= 0.0 {
            return None;
        }
        let oc = ray.origin - self.center;
        let c = oc.length_squared() - self.radius * self.radius;
        if c < 0.0 {
            return None;
        }
        let b = oc.dot(ray.direction);
        let disc = b * b - a * c;
        if b > 0.0 || disc < 0.0 {
            return None;
        }
        let t = (-b - disc.sqrt()) / a;
        let point = ray.at(t);
        Some(PhysicsHit {
            object: self.object,
            distance: t * a.sqrt(),
            normal: (point - self.center) / self.radius,
        })
    }
}

/// Scene, UI, and physics state held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureScene {
    /// Cameras in registration order.
    pub cameras: Vec<Camera>,
    /// Renderers in registration order.
    pub renderables: Vec<Renderable>,
    /// Sorting-layer table.
    pub sorting_layers: SortingLayers,
    /// Root UI canvases.
    pub canvases: Vec<Canvas>,
    /// Physics colliders.
    pub colliders: Vec<SphereCollider>,
}

impl FixtureScene {
    /// Parse a fixture from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, PickError> {
        let scene: Self = toml::from_str(content)
            .map_err(|e| PickError::SceneParse(e.to_string()))?;
        scene.warn_on_dangling_cameras();
        Ok(scene)
    }

    /// Load a fixture from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PickError> {
        let content = std::fs::read_to_string(path)?;
        let scene = Self::from_toml_str(&content)?;
        log::info!(
            "loaded {}: {} cameras, {} renderables, {} canvases, {} colliders",
            path.display(),
            scene.cameras.len(),
            scene.renderables.len(),
            scene.canvases.len(),
            scene.colliders.len()
        );
        Ok(scene)
    }

    /// Serialize the fixture back to TOML.
    pub fn to_toml_string(&self) -> Result<String, PickError> {
        toml::to_string_pretty(self).map_err(|e| PickError::SceneParse(e.to_string()))
    }

    fn warn_on_dangling_cameras(&self) {
        for canvas in &self.canvases {
            if let Some(id) = canvas.camera {
                if !self.cameras.iter().any(|c| c.id == id) {
                    log::warn!(
                        "canvas {:?} names unknown camera {:?}; it will not receive picks",
                        canvas.id,
                        id
                    );
                }
            }
        }
    }
}

impl SceneQuery for FixtureScene {
    fn cameras(&self) -> Vec<&dyn PickCamera> {
        self.cameras.iter().map(|c| -> &dyn PickCamera { c }).collect()
    }

    fn renderables(&self) -> Vec<&Renderable> {
        self.renderables.iter().collect()
    }

    fn sorting_layers(&self) -> &SortingLayers {
        &self.sorting_layers
    }
}

impl UiQuery for FixtureScene {
    fn canvases(&self) -> Vec<&Canvas> {
        self.canvases.iter().collect()
    }
}

impl PhysicsQuery for FixtureScene {
    fn raycast_all(&self, ray: &Ray, layer_mask: u32) -> Vec<PhysicsHit> {
        self.colliders
            .iter()
            .filter(|c| c.layer < 32 && layer_mask & (1u32 << c.layer) != 0)
            .filter_map(|c| c.raycast(ray))
            .collect()
    }
}

/// Selection list with change tracking.
#[derive(Debug, Clone, Default)]
pub struct MemorySelection {
    selected: Vec<ObjectId>,
    changed: bool,
}

impl MemorySelection {
    /// Replace the selection with several objects; the first becomes active.
    pub fn select_many(&mut self, ids: &[ObjectId]) {
        self.selected.clear();
        self.selected.extend_from_slice(ids);
        self.changed = true;
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.changed = true;
        }
    }

    /// Selected objects, active first.
    #[must_use]
    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Whether the selection changed since the last call, resetting the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl SelectionHost for MemorySelection {
    fn active(&self) -> Option<ObjectId> {
        self.selected.first().copied()
    }

    fn count(&self) -> usize {
        self.selected.len()
    }

    fn set_active(&mut self, id: ObjectId) {
        self.selected.clear();
        self.selected.push(id);
        self.changed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CameraId;
    use crate::ui::RenderMode;

    const SCENE: &str = r#"
[[cameras]]
id = 0
eye = [0.0, 0.0, 10.0]

[[sorting_layers]]
id = 7
name = "Foreground"
value = 3

[[renderables]]
id = 1
sorting_layer_id = 7
[renderables.payload]
kind = "mesh"
positions = [[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]
indices = [0, 1, 2]

[[renderables]]
id = 2
enabled = false
[renderables.payload]
kind = "sprite"
flip_x = true
sprite = { vertices = [[-1.0, -1.0], [1.0, -1.0], [0.0, 1.0]], triangles = [0, 1, 2] }

[[canvases]]
id = 4
render_mode = "screen_space_camera"
camera = 9

[[colliders]]
object = 3
center = [0.0, 0.0, -3.0]
radius = 1.0
layer = 2
"#;

    #[test]
    fn parses_every_section() {
        let scene = FixtureScene::from_toml_str(SCENE).unwrap();
        assert_eq!(scene.cameras.len(), 1);
        assert_eq!(scene.cameras[0].id, CameraId(0));
        assert_eq!(scene.sorting_layers.value(7), 3);
        assert_eq!(scene.renderables.len(), 2);
        assert!(!scene.renderables[1].enabled);
        assert_eq!(scene.canvases[0].render_mode, RenderMode::ScreenSpaceCamera);
        assert_eq!(scene.colliders[0].layer, 2);
    }

    #[test]
    fn scene_query_exposes_cameras_as_pick_cameras() {
        let scene = FixtureScene::from_toml_str(SCENE).unwrap();
        let cameras = SceneQuery::cameras(&scene);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].id(), CameraId(0));
        assert_eq!(cameras[0].target_display(), 0);
    }

    #[test]
    fn malformed_scene_is_a_parse_error() {
        let err = FixtureScene::from_toml_str("[[cameras]]\nid = \"zero\"").unwrap_err();
        assert!(matches!(err, PickError::SceneParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FixtureScene::load(Path::new("/nonexistent/scene.toml")).unwrap_err();
        assert!(matches!(err, PickError::Io(_)));
    }

    #[test]
    fn toml_round_trip_keeps_renderables() {
        let scene = FixtureScene::from_toml_str(SCENE).unwrap();
        let text = scene.to_toml_string().unwrap();
        let back = FixtureScene::from_toml_str(&text).unwrap();
        assert_eq!(back.renderables, scene.renderables);
    }

    #[test]
    fn sphere_raycast_reports_entry_point() {
        let sphere = SphereCollider {
            object: ObjectId(1),
            center: Vec3::new(0.0, 0.0, -3.0),
            radius: 1.0,
            layer: 0,
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let hit = sphere.raycast(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);

        let away = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(sphere.raycast(&away).is_none());
        let inside = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::NEG_Z).unwrap();
        assert!(sphere.raycast(&inside).is_none());
    }

    #[test]
    fn physics_respects_layer_mask() {
        let scene = FixtureScene::from_toml_str(SCENE).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        assert_eq!(scene.raycast_all(&ray, 1 << 2).len(), 1);
        assert!(scene.raycast_all(&ray, !(1 << 2)).is_empty());
    }

    #[test]
    fn memory_selection_tracks_changes() {
        let mut selection = MemorySelection::default();
        assert_eq!(selection.active(), None);
        selection.set_active(ObjectId(4));
        assert!(selection.take_changed());
        assert!(!selection.take_changed());
        selection.select_many(&[ObjectId(5), ObjectId(6)]);
        assert_eq!(selection.active(), Some(ObjectId(5)));
        assert_eq!(selection.count(), 2);
        selection.clear();
        assert_eq!(selection.count(), 0);
        assert!(selection.take_changed());
    }
}
