//! Affine edits on a group of selected strokes.
//!
//! While the user drags, scales or rotates a selection, the change lives only
//! in the group's [`PreviewTransform`]; stroke coordinates are untouched and
//! the renderer draws members through [`SelectionGroup::preview_point`]. When
//! the interaction ends, [`commit`] writes the preview into every member's
//! outline and resets the preview to identity, so stored coordinates are
//! always document space and successive edits never stack transforms.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::ROTATION_SNAP_STEP;
use crate::geom::{Point, Rect};
use crate::stroke::{Stroke, StrokeId};

/// Display-only transform applied to a selection during an interaction.
///
/// Applied to a point in the order scale, rotate, translate, with scale and
/// rotation about the group pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewTransform {
    pub dx: f64,
    pub dy: f64,
    pub sx: f64,
    pub sy: f64,
    /// Degrees, clockwise on a y-down screen.
    pub rotation: f64,
}

impl Default for PreviewTransform {
    fn default() -> Self {
        Self { dx: 0.0, dy: 0.0, sx: 1.0, sy: 1.0, rotation: 0.0 }
    }
}

impl PreviewTransform {
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Where `p` is drawn under this preview.
    #[must_use]
    pub fn map_point(&self, p: Point, pivot: Point) -> Point {
        p.scale_about(pivot, self.sx, self.sy)
            .rotate_about(pivot, self.rotation)
            .offset(self.dx, self.dy)
    }
}

/// Transient exclusive owner of the selected strokes.
#[derive(Debug, Clone)]
pub struct SelectionGroup {
    members: Vec<Stroke>,
    bounds: Rect,
    pivot: Point,
    preview: PreviewTransform,
    hit_region: Option<Rect>,
}

impl SelectionGroup {
    /// Form a group, capturing its pivot. Returns `None` when `members` is
    /// empty or has no outline points.
    #[must_use]
    pub fn new(members: Vec<Stroke>) -> Option<Self> {
        let bounds = members_bounds(&members)?;
        let mut group = Self {
            members,
            bounds,
            pivot: bounds.center(),
            preview: PreviewTransform::default(),
            hit_region: None,
        };
        group.refresh();
        Some(group)
    }

    #[must_use]
    pub fn members(&self) -> &[Stroke] {
        &self.members
    }

    #[must_use]
    pub fn ids(&self) -> Vec<StrokeId> {
        self.members.iter().map(|s| s.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Bounding box of the members' stored coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Centre used for scale and rotation; fixed for one interaction.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    #[must_use]
    pub fn preview(&self) -> PreviewTransform {
        self.preview
    }

    /// Box the host hit-tests to grab a multi-stroke group.
    #[must_use]
    pub fn hit_region(&self) -> Option<Rect> {
        self.hit_region
    }

    /// Where a stored point is drawn under the current preview.
    #[must_use]
    pub fn preview_point(&self, p: Point) -> Point {
        self.preview.map_point(p, self.pivot)
    }

    /// Accumulate a drag delta into the preview.
    pub fn translate_by(&mut self, dx: f64, dy: f64) {
        self.preview.dx += dx;
        self.preview.dy += dy;
    }

    /// Set the preview scale factors.
    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.preview.sx = sx;
        self.preview.sy = sy;
    }

    /// Set the preview rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.preview.rotation = degrees;
    }

    /// Hand the members back, ending the group.
    #[must_use]
    pub fn into_members(self) -> Vec<Stroke> {
        self.members
    }

    fn rewrite<F>(&mut self, f: F)
    where
        F: Fn(Point) -> Point,
    {
        for stroke in &mut self.members {
            stroke.map_points(&f);
        }
        self.preview = PreviewTransform::default();
        self.refresh();
    }

    /// Recompute bounds, pivot and hit region from stored coordinates.
    fn refresh(&mut self) {
        if let Some(bounds) = members_bounds(&self.members) {
            self.bounds = bounds;
            self.pivot = bounds.center();
        }
        self.hit_region = if self.members.len() > 1 { Some(self.bounds) } else { None };
    }
}

fn members_bounds(members: &[Stroke]) -> Option<Rect> {
    members.iter().filter_map(Stroke::bounds).reduce(Rect::union)
}

/// Move every member by `(dx, dy)`.
pub fn apply_translation(group: &mut SelectionGroup, dx: f64, dy: f64) {
    group.rewrite(|p| p.offset(dx, dy));
}

/// Scale every member about `centroid`.
pub fn apply_scale(group: &mut SelectionGroup, centroid: Point, sx: f64, sy: f64) {
    group.rewrite(|p| p.scale_about(centroid, sx, sy));
}

/// Rotate every member about `pivot` by `degrees`.
pub fn apply_rotation(group: &mut SelectionGroup, pivot: Point, degrees: f64) {
    group.rewrite(|p| p.rotate_about(pivot, degrees));
}

/// Write the live preview into member coordinates and reset it.
///
/// Returns the ids of the rewritten strokes; empty when the preview was
/// already identity.
#[allow(clippy::float_cmp)]
pub fn commit(group: &mut SelectionGroup) -> Vec<StrokeId> {
    let preview = group.preview;
    if preview.is_identity() {
        return Vec::new();
    }
    let pivot = group.pivot;
    if preview.sx != 1.0 || preview.sy != 1.0 {
        apply_scale(group, pivot, preview.sx, preview.sy);
    }
    if preview.rotation != 0.0 {
        apply_rotation(group, pivot, preview.rotation);
    }
    if preview.dx != 0.0 || preview.dy != 0.0 {
        apply_translation(group, preview.dx, preview.dy);
    }
    group.preview = PreviewTransform::default();
    info!(
        strokes = group.len(),
        dx = preview.dx,
        dy = preview.dy,
        sx = preview.sx,
        sy = preview.sy,
        rotation = preview.rotation,
        "committed selection transform"
    );
    group.ids()
}

/// Snap `degrees` to the nearest multiple of 45° when within `tolerance`.
#[must_use]
pub fn snap_rotation(degrees: f64, tolerance: f64) -> f64 {
    let snapped = (degrees / ROTATION_SNAP_STEP).round() * ROTATION_SNAP_STEP;
    if (degrees - snapped).abs() <= tolerance { snapped } else { degrees }
}
