//! Geometry engine for a pressure-sensitive ink canvas.
//!
//! The crate turns raw pen samples into variable-width stroke outlines,
//! selects strokes with a freehand lasso, moves/scales/rotates selections
//! through a preview transform that is committed on release, and drives a
//! pinch-to-zoom viewport that keeps the pinch anchor fixed. It renders
//! nothing itself: every engine operation returns [`engine::Action`]s that
//! tell the host what to redraw, which cached cells are stale, and when to
//! re-rasterize.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture state machine and the testable [`engine::EngineCore`] |
//! | [`stroke`] | Stroke outline builder and lasso polyline |
//! | [`hit`] | Even-odd containment and lasso selection |
//! | [`transform`] | Selection group, preview transform and commit |
//! | [`viewport`] | Viewport transform, panning and the pinch-zoom controller |
//! | [`partition`] | Spatial cache cells for bounding boxes |
//! | [`doc`] | Content set of finished strokes, bucketed by cell |
//! | [`backdrop`] | Reference grid for the visible area |
//! | [`input`] | Tools, pointer events and the open gesture |
//! | [`geom`] | Points and rectangles |
//! | [`config`] | Tunables loaded from the environment |
//! | [`error`] | Error type with stable codes |
//! | [`consts`] | Shared numeric constants (widths, zoom limits, cell size) |

pub mod backdrop;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod partition;
pub mod stroke;
pub mod transform;
pub mod viewport;

pub use engine::{Action, EngineCore};
pub use error::InkError;
