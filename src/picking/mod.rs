//! Screen-space object picking and click-to-cycle selection.
//!
//! A pick casts the screen point through every camera on the target
//! display, gathers candidates from renderers, physics colliders, and UI
//! canvases, orders them by what is drawn on top, and hands the ordered list
//! to the cycler, which decides what becomes selected.

mod candidate;
mod collector;
mod cycler;
mod order;
mod request;
mod session;

pub use candidate::{CameraRef, CanvasRef, HitCandidate, HitSource};
pub use collector::{CollectStats, RenderableCollector, ScratchMeshes};
pub use cycler::{CycleState, PickCycler, PickHistory, PickOutcome};
pub use order::{dedup_objects, VisualOrder};
pub use request::PickRequest;
pub use session::{PickHost, PickSession};
