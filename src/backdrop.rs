//! Reference grid drawn behind the strokes.
//!
//! The grid is rebuilt after each zoom or resize. It covers from half a
//! viewport before the visible area to one and a half viewports past it, so
//! short pans stay covered, and it never extends into negative document
//! space.

#[cfg(test)]
#[path = "backdrop_test.rs"]
mod backdrop_test;

use std::iter::successors;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom::Point;
use crate::viewport::ViewportTransform;

/// One grid line segment in document space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Grid segments for one viewport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGrid {
    pub spacing: f64,
    pub horizontal: Vec<GridLine>,
    pub vertical: Vec<GridLine>,
}

impl ReferenceGrid {
    /// Build the grid for a `width` x `height` CSS-pixel viewport.
    #[must_use]
    pub fn for_viewport(viewport: &ViewportTransform, width: f64, height: f64, spacing: f64) -> Self {
        let scale = viewport.scale;
        if !(spacing.is_finite() && spacing > 0.0 && scale.is_finite() && scale > 0.0) {
            debug!(spacing, scale, "degenerate grid parameters; empty grid");
            return Self { spacing, ..Self::default() };
        }

        let (start_x, end_x) = span(-viewport.translate_x / scale, width / scale, spacing);
        let (start_y, end_y) = span(-viewport.translate_y / scale, height / scale, spacing);

        let horizontal = steps(start_y, end_y, spacing)
            .map(|y| GridLine { from: Point::new(start_x, y), to: Point::new(end_x, y) })
            .collect();
        let vertical = steps(start_x, end_x, spacing)
            .map(|x| GridLine { from: Point::new(x, start_y), to: Point::new(x, end_y) })
            .collect();
        Self { spacing, horizontal, vertical }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// Snapped `[start, end)` range on one axis.
fn span(visible_start: f64, visible_len: f64, spacing: f64) -> (f64, f64) {
    let start = ((visible_start - visible_len * 0.5) / spacing).floor() * spacing;
    let end = ((visible_start + visible_len * 1.5) / spacing).floor() * spacing;
    (start.max(0.0), end)
}

fn steps(start: f64, end: f64, spacing: f64) -> impl Iterator<Item = f64> {
    successors(Some(start), move |v| Some(v + spacing)).take_while(move |v| *v < end)
}
