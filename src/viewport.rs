//! Viewport transform and the pinch-to-zoom controller.
//!
//! `ViewportTransform` maps document space onto the screen with a uniform
//! scale and a translation. `ZoomController` is the per-viewport state for one
//! two-finger pinch: the first update pins the anchor (finger midpoint) and
//! the starting finger distance, and every later update rescales so that the
//! document point under the anchor stays put.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_BASE_FACTOR, ZOOM_DELTA_DIVISOR};
use crate::geom::Point;

/// Screen placement of the document.
///
/// `translate_x` / `translate_y` are in CSS pixels; `scale` is uniform
/// (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self { scale: 1.0, translate_x: 0.0, translate_y: 0.0 }
    }
}

impl ViewportTransform {
    /// Convert a screen-space point (CSS pixels) to document coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a screen-space distance (pixels) to document distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Pan by a screen delta.
    ///
    /// The document cannot be dragged past its top-left origin: an axis whose
    /// new offset would not be negative keeps its previous offset.
    #[must_use]
    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        let x = self.translate_x + dx;
        let y = self.translate_y + dy;
        Self {
            scale: self.scale,
            translate_x: if x < 0.0 { x } else { self.translate_x },
            translate_y: if y < 0.0 { y } else { self.translate_y },
        }
    }
}

/// Pinch-to-zoom state for one viewport: idle until the first update, then
/// zooming until [`ZoomController::end`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    min_scale: f64,
    max_scale: f64,
    last_distance: Option<f64>,
    anchor: Option<Point>,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(MIN_SCALE, MAX_SCALE)
    }
}

impl ZoomController {
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self { min_scale, max_scale, last_distance: None, anchor: None }
    }

    /// A pinch is in progress.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.anchor.is_some()
    }

    /// Viewport-local anchor pinned by the first update, if zooming.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Apply one two-finger sample and return the resulting viewport.
    ///
    /// `a` and `b` are the touch points in viewport-local pixels. A step that
    /// would leave `[min_scale, max_scale]` is rejected: `viewport` comes back
    /// unchanged and the remembered distance is not advanced.
    pub fn update(&mut self, viewport: ViewportTransform, a: Point, b: Point) -> ViewportTransform {
        if !(a.is_finite() && b.is_finite()) {
            return viewport;
        }
        let distance = a.distance(b);
        let last = *self.last_distance.get_or_insert(distance);
        let anchor = *self.anchor.get_or_insert_with(|| a.midpoint(b));
        let delta = distance - last;

        let old_scale = viewport.scale;
        let start = Point::new(
            anchor.x / old_scale - viewport.translate_x / old_scale,
            anchor.y / old_scale - viewport.translate_y / old_scale,
        );
        let factor = ZOOM_BASE_FACTOR + delta.abs() / ZOOM_DELTA_DIVISOR;
        let new_scale = if delta < 0.0 { old_scale / factor } else { old_scale * factor };
        if !(self.min_scale..=self.max_scale).contains(&new_scale) {
            debug!(old_scale, new_scale, "zoom step out of range; rejected");
            return viewport;
        }

        self.last_distance = Some(distance);
        ViewportTransform {
            scale: new_scale,
            translate_x: (anchor.x / new_scale - start.x) * new_scale,
            translate_y: (anchor.y / new_scale - start.y) * new_scale,
        }
    }

    /// Finish the pinch. Returns `true` if one was in progress.
    pub fn end(&mut self) -> bool {
        let was_zooming = self.is_zooming();
        self.last_distance = None;
        self.anchor = None;
        was_zooming
    }
}
