//! Shared numeric constants for the ink engine.

// ── Strokes ─────────────────────────────────────────────────────

/// Default full stroke width in document units at pressure 1.0.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Default fill color for new strokes.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";

/// Lowest pressure accepted from pressure-capable devices.
pub const MIN_PRESSURE: f64 = 0.1;

/// Curvature applied by the renderer to a finished outline.
pub const STROKE_TENSION: f64 = 0.4;

// ── Selection ───────────────────────────────────────────────────

/// Test every Nth outline point against the lasso.
pub const LASSO_SAMPLE_STRIDE: usize = 5;

/// Angles (degrees) that rotation snaps to are multiples of this.
pub const ROTATION_SNAP_STEP: f64 = 45.0;

/// How close (degrees) a rotation must be to a snap angle to snap.
pub const ROTATION_SNAP_TOLERANCE: f64 = 5.0;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest viewport scale a pinch may reach.
pub const MIN_SCALE: f64 = 0.4;

/// Largest viewport scale a pinch may reach.
pub const MAX_SCALE: f64 = 2.0;

/// Per-update zoom factor applied even when the finger distance is unchanged.
pub const ZOOM_BASE_FACTOR: f64 = 1.01;

/// Finger-distance change (px) that adds 1.0 to the zoom factor.
pub const ZOOM_DELTA_DIVISOR: f64 = 100.0;

// ── Caching / backdrop ──────────────────────────────────────────

/// Side length of a spatial cache cell in document units.
pub const CELL_SIZE: f64 = 1000.0;

/// Spacing of the reference grid in document units.
pub const GRID_SPACING: f64 = 25.0;
