//! Polygon containment and lasso selection.
//!
//! Containment is the even-odd rule: cast a horizontal ray from the point
//! and count edge crossings. Every polygon is treated as closed, so the last
//! vertex connects back to the first.
//!
//! Stroke-vs-lasso selection samples the stroke outline sparsely. A stroke is
//! selected when any sampled point falls inside the lasso, so strokes that
//! only partly overlap the lasso are still picked up.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect};
use crate::stroke::{Lasso, Stroke, StrokeId};

/// Whether `point` is inside `polygon` under the even-odd rule.
///
/// Polygons with fewer than three vertices contain nothing.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, &vi) in polygon.iter().enumerate() {
        let vj = polygon[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            // Evaluate each edge bottom-up so winding order cannot change rounding.
            let (lo, hi) = if vi.y < vj.y { (vi, vj) } else { (vj, vi) };
            let cross_x = (hi.x - lo.x) * (point.y - lo.y) / (hi.y - lo.y) + lo.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether any sampled outline point lies inside `lasso`.
///
/// Tests outline points `0, stride, 2*stride, ...` and always the last one.
#[must_use]
pub fn stroke_intersects_lasso(outline: &[Point], lasso: &[Point], stride: usize) -> bool {
    let Some(last) = outline.last() else {
        return false;
    };
    outline.iter().step_by(stride.max(1)).any(|p| point_in_polygon(*p, lasso)) || point_in_polygon(*last, lasso)
}

/// Result of a lasso pass over the content set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Strokes the lasso picked up, in the order they were tested.
    pub ids: Vec<StrokeId>,
    /// Bounding box of all picked strokes; present only for two or more.
    pub hit_region: Option<Rect>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Test every stroke against `lasso`.
#[must_use]
pub fn select<'a, I>(strokes: I, lasso: &Lasso, stride: usize) -> Selection
where
    I: IntoIterator<Item = &'a Stroke>,
{
    let mut ids = Vec::new();
    let mut region: Option<Rect> = None;
    for stroke in strokes {
        if !stroke_intersects_lasso(&stroke.outline, &lasso.points, stride) {
            continue;
        }
        ids.push(stroke.id);
        if let Some(bounds) = stroke.bounds() {
            region = Some(region.map_or(bounds, |r| r.union(bounds)));
        }
    }
    let hit_region = if ids.len() > 1 { region } else { None };
    Selection { ids, hit_region }
}
