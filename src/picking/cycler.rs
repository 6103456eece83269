//! Click-to-cycle through overlapping objects.
//!
//! Repeated clicks on the same spot walk down the sorted hit list one object
//! at a time, wrapping at the end. Memory of the previous click survives
//! only while the selection changes come from the cycler itself.

use super::candidate::HitCandidate;
use crate::scene::{ObjectId, SelectionHost};

/// Sorted, deduplicated candidates of the previous pick.
#[derive(Debug, Clone, Default)]
pub struct PickHistory {
    hits: Vec<HitCandidate>,
}

impl PickHistory {
    /// Remembered candidates, front-most first.
    #[must_use]
    pub fn hits(&self) -> &[HitCandidate] {
        &self.hits
    }

    /// Nothing remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Position of `object` in the remembered list.
    #[must_use]
    pub fn position(&self, object: ObjectId) -> Option<usize> {
        self.hits.iter().position(|h| h.object == object)
    }

    fn replace(&mut self, hits: &[HitCandidate]) {
        self.hits.clear();
        self.hits.extend_from_slice(hits);
    }

    fn clear(&mut self) {
        self.hits.clear();
    }
}

/// Result of one cycled pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Nothing under the cursor; memory cleared, selection untouched.
    NoHit,
    /// Front-most object chosen because the click started a new cycle.
    Fresh(ObjectId),
    /// Next object in an ongoing cycle.
    Cycled(ObjectId),
}

impl PickOutcome {
    /// Object the pick settled on.
    #[must_use]
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            Self::NoHit => None,
            Self::Fresh(id) | Self::Cycled(id) => Some(*id),
        }
    }
}

/// Observable cycler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// No remembered hit list.
    Idle,
    /// A previous hit list is remembered.
    HasMemory,
}

/// Chooses the object to select from a sorted hit list.
#[derive(Debug, Default)]
pub struct PickCycler {
    history: PickHistory,
    /// Set by an own selection write, consumed by the next notification.
    self_selecting: bool,
}

impl PickCycler {
    /// Idle cycler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CycleState {
        if self.history.is_empty() {
            CycleState::Idle
        } else {
            CycleState::HasMemory
        }
    }

    /// Remembered list from the previous pick.
    #[must_use]
    pub fn history(&self) -> &PickHistory {
        &self.history
    }

    /// Whether the next selection change is the cycler's own write.
    #[must_use]
    pub fn is_self_selecting(&self) -> bool {
        self.self_selecting
    }

    /// Pick from `results` (sorted front-most first, one entry per object)
    /// and update `selection`.
    ///
    /// The click continues a cycle when exactly one object is selected, it
    /// appears in the remembered list at index `i`, and the first `i + 1`
    /// objects of both lists agree. The next object after it is chosen,
    /// wrapping. Anything else selects the front-most result.
    pub fn pick(
        &mut self,
        results: &[HitCandidate],
        selection: &mut dyn SelectionHost,
    ) -> PickOutcome {
        let Some(front) = results.first() else {
            log::trace!("pick missed; clearing cycle memory");
            self.history.clear();
            return PickOutcome::NoHit;
        };

        let outcome = match self.continued_index(results, selection) {
            Some(index) => PickOutcome::Cycled(results[(index + 1) % results.len()].object),
            None => PickOutcome::Fresh(front.object),
        };
        self.history.replace(results);

        if let Some(chosen) = outcome.object() {
            if selection.active() != Some(chosen) || selection.count() != 1 {
                self.self_selecting = true;
                selection.set_active(chosen);
            }
        }
        log::debug!("pick over {} hits -> {:?}", results.len(), outcome);
        outcome
    }

    /// Index of the active object in the remembered list when the new
    /// results continue that cycle.
    fn continued_index(
        &self,
        results: &[HitCandidate],
        selection: &dyn SelectionHost,
    ) -> Option<usize> {
        if selection.count() != 1 {
            return None;
        }
        let active = selection.active()?;
        let index = self.history.position(active)?;
        if results.len() <= index {
            return None;
        }
        let same_prefix = self.history.hits[..=index]
            .iter()
            .zip(&results[..=index])
            .all(|(old, new)| old.object == new.object);
        same_prefix.then_some(index)
    }

    /// Selection-changed notification from the host.
    ///
    /// The first notification after an own write is consumed, however many
    /// writes it covers; any other change forgets the remembered list so
    /// the next click starts fresh.
    pub fn on_selection_changed(&mut self) {
        if !std::mem::take(&mut self.self_selecting) {
            self.history.clear();
        }
    }
}
