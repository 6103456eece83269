//! Camera capability consumed by the picker.
//!
//! Provides the [`PickCamera`] trait hosts implement, a concrete
//! perspective/orthographic [`Camera`], and the [`Ray`] type every
//! intersection test speaks.

/// Core camera struct and the host camera trait.
pub mod core;
/// Rays and ray/plane helpers.
pub mod ray;

pub use self::core::{Camera, PickCamera, Projection};
pub use ray::Ray;
