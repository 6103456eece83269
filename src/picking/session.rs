//! Pick session: deferred requests, collection, ordering, and cycling.
//!
//! Clicks arrive while the host is busy drawing, so they are queued and
//! resolved on the next [`PickSession::tick`], once per request in arrival
//! order. Each session owns its own cycle memory and scratch meshes; hosts
//! with several viewports keep one session per viewport.

use std::collections::VecDeque;

use super::candidate::HitCandidate;
use super::collector::{CollectStats, RenderableCollector, ScratchMeshes};
use super::cycler::{CycleState, PickCycler, PickOutcome};
use super::order::{dedup_objects, VisualOrder};
use super::request::PickRequest;
use crate::options::Options;
use crate::scene::{PhysicsQuery, SceneQuery, SelectionHost};
use crate::ui::UiQuery;

/// Host capabilities a pick runs against.
pub struct PickHost<'a> {
    /// Cameras, renderers, and sorting layers.
    pub scene: &'a dyn SceneQuery,
    /// UI canvases, if the host has a UI system.
    pub ui: Option<&'a dyn UiQuery>,
    /// Physics raycasts, if the host has a physics engine.
    pub physics: Option<&'a dyn PhysicsQuery>,
    /// Editor selection written by picks.
    pub selection: &'a mut dyn SelectionHost,
}

/// Screen-space picker for one viewport.
#[derive(Debug, Default)]
pub struct PickSession {
    options: Options,
    scratch: ScratchMeshes,
    cycler: PickCycler,
    pending: VecDeque<PickRequest>,
    last_stats: CollectStats,
}

impl PickSession {
    /// Session with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options; cycle memory and queued picks are kept.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Queue a pick for the next [`tick`](Self::tick).
    pub fn request_pick(&mut self, request: PickRequest) {
        log::trace!("queued pick at {:?}", request.screen);
        self.pending.push_back(request);
    }

    /// Number of queued picks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Resolve every queued pick in arrival order.
    pub fn tick(&mut self, host: &mut PickHost<'_>) -> Vec<PickOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(request) = self.pending.pop_front() {
            outcomes.push(self.pick_now(&request, host));
        }
        outcomes
    }

    /// Resolve one pick immediately and update the selection.
    pub fn pick_now(&mut self, request: &PickRequest, host: &mut PickHost<'_>) -> PickOutcome {
        let results = self.pick_all(request, host.scene, host.ui, host.physics);
        self.cycler.pick(&results, &mut *host.selection)
    }

    /// Every object under the screen point, front-most first, one entry per
    /// object. Does not touch the selection or the cycle memory.
    pub fn pick_all(
        &mut self,
        request: &PickRequest,
        scene: &dyn SceneQuery,
        ui: Option<&dyn UiQuery>,
        physics: Option<&dyn PhysicsQuery>,
    ) -> Vec<HitCandidate> {
        if request.modes.is_empty() {
            return Vec::new();
        }
        let mut collector = RenderableCollector::new(request, &self.options.transparency);
        let mut hits = collector.collect(scene, ui, physics, &mut self.scratch);
        self.last_stats = collector.stats();

        VisualOrder::new(scene.sorting_layers()).sort(&mut hits);
        dedup_objects(&mut hits);
        hits
    }

    /// Selection-changed notification; see
    /// [`PickCycler::on_selection_changed`].
    pub fn on_selection_changed(&mut self) {
        self.cycler.on_selection_changed();
    }

    /// Cycle memory state.
    #[must_use]
    pub fn cycle_state(&self) -> CycleState {
        self.cycler.state()
    }

    /// Counters from the most recent collection.
    #[must_use]
    pub fn last_stats(&self) -> CollectStats {
        self.last_stats
    }
}
