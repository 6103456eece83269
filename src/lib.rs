// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Screen-space object picking for scene editors.
//!
//! Given a click position, scenepick finds every object drawn under it
//! (meshes, skinned meshes, sprites, physics colliders, and UI graphics),
//! orders them front to back the way the compositor paints them, and picks
//! one to select. Clicking the same spot again cycles through the
//! overlapping objects.
//!
//! # Key entry points
//!
//! - [`picking::PickSession`] - queues picks and resolves them on `tick`
//! - [`picking::VisualOrder`] - the paint-order comparator
//! - [`geometry::intersect`] - ray/triangle-mesh intersection
//! - [`input::PickInput`] - turns mouse clicks into pick requests
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`scene::fixture::FixtureScene`] - in-memory host for tools and tests
//!
//! # Host integration
//!
//! The crate owns no scene state. Hosts implement [`scene::SceneQuery`],
//! [`ui::UiQuery`], [`scene::PhysicsQuery`], and [`scene::SelectionHost`],
//! bundle them into a [`picking::PickHost`] for each tick, and forward their
//! selection-changed notifications to the session.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod ui;

pub use error::PickError;
