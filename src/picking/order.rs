//! Visual paint-order comparator.
//!
//! Approximates the order in which a compositor paints overlapping hits so
//! that the head of a sorted list is the object the user sees on top.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use super::candidate::HitCandidate;
use crate::scene::SortingLayers;

/// Total order over hit candidates, front-most first.
///
/// Criteria, each consulted only when the previous ones tie:
///
/// 1. camera depth, higher first (only when both have a camera)
/// 2. sorting-layer value, higher first
/// 3. sorting order, higher first
/// 4. UI depth, higher first (only within the same canvas)
/// 5. distance, closer first
/// 6. canvas render order, higher first (only when both are UI)
#[derive(Debug, Clone, Copy)]
pub struct VisualOrder<'a> {
    layers: &'a SortingLayers,
}

impl<'a> VisualOrder<'a> {
    /// Comparator resolving sorting-layer ids through `layers`.
    #[must_use]
    pub fn new(layers: &'a SortingLayers) -> Self {
        Self { layers }
    }

    /// `Less` when `a` is painted over `b`.
    #[must_use]
    pub fn compare(&self, a: &HitCandidate, b: &HitCandidate) -> Ordering {
        if let (Some(ca), Some(cb)) = (a.camera, b.camera) {
            let ord = cb.depth.total_cmp(&ca.depth);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        let ord = self
            .layers
            .value(b.sorting_layer_id)
            .cmp(&self.layers.value(a.sorting_layer_id));
        if ord != Ordering::Equal {
            return ord;
        }

        let ord = b.sorting_order.cmp(&a.sorting_order);
        if ord != Ordering::Equal {
            return ord;
        }

        if let (Some(ca), Some(cb)) = (a.canvas, b.canvas) {
            if ca.id == cb.id {
                let ord = b.depth.cmp(&a.depth);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }

        let ord = a.distance.total_cmp(&b.distance);
        if ord != Ordering::Equal {
            return ord;
        }

        match (a.canvas, b.canvas) {
            (Some(ca), Some(cb)) => cb.render_order.cmp(&ca.render_order),
            _ => Ordering::Equal,
        }
    }

    /// Stable sort, front-most first.
    pub fn sort(&self, hits: &mut [HitCandidate]) {
        hits.sort_by(|a, b| self.compare(a, b));
    }
}

/// Keep only the first (front-most) candidate per object.
pub fn dedup_objects(hits: &mut Vec<HitCandidate>) {
    let mut seen = FxHashSet::default();
    hits.retain(|h| seen.insert(h.object));
}
