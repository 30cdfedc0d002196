//! Stroke building: turn a live stream of pointer samples into a
//! variable-width outline polygon.
//!
//! The outline is grown as two rays, one per side of the pen path. Each new
//! sample adds a left point to the end of the left ray and a right point to
//! the end of the right ray; reading the outline walks the left ray forward
//! and the right ray backward, so the polygon closes around the path without
//! crossing itself.
//!
//! Offsets at a joint are the average of the incoming and outgoing segment
//! offsets, which rounds corners instead of leaving a spike.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::consts::STROKE_TENSION;
use crate::geom::{Point, Rect};
use crate::hit;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// One position/pressure reading from the input device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub point: Point,
    /// Effective pressure in `(0, 1]`.
    pub pressure: f64,
}

impl Sample {
    #[must_use]
    pub fn new(point: Point, pressure: f64) -> Self {
        Self { point, pressure }
    }

    /// Sample from a device with no pressure reporting.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), 1.0)
    }
}

/// Width and color given to a new stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Full width at pressure 1.0.
    pub width: f64,
    /// CSS color used to fill the outline.
    pub color: String,
}

impl StrokeStyle {
    /// Half-width for a sample at this style.
    #[must_use]
    pub fn half_width(&self, sample: &Sample) -> f64 {
        sample.pressure * self.width * 0.5
    }
}

/// A finished freehand mark stored as a closed outline polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Closed polygon: left side start to end, then right side end to start.
    pub outline: Vec<Point>,
    pub color: String,
    /// Rendering curvature for the outline; does not move any point.
    pub tension: f64,
}

impl Stroke {
    /// Bounding box of the outline, or `None` for an empty outline.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.outline)
    }

    /// Rewrite every outline point through `f`.
    pub fn map_points<F>(&mut self, f: F)
    where
        F: Fn(Point) -> Point,
    {
        for p in &mut self.outline {
            *p = f(*p);
        }
    }
}

/// Left/right points offset from a path position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetPair {
    pub left: Point,
    pub right: Point,
}

impl OffsetPair {
    fn is_finite(self) -> bool {
        self.left.is_finite() && self.right.is_finite()
    }
}

/// Offset `at` by `half_width` perpendicular to the direction `from → to`.
///
/// Left is the counter-clockwise side of the direction.
#[must_use]
pub fn offset_pair(from: Point, to: Point, half_width: f64, at: Point) -> OffsetPair {
    let normal = (to - from).normalized().perp() * half_width;
    OffsetPair { left: at + normal, right: at - normal }
}

/// Smoothed offsets at `b` for the path `a → b → c`.
///
/// Averages the `a → b` offsets with the `c → b` offsets. The `c → b`
/// direction is reversed, so its right side pairs with the left of `a → b`.
#[must_use]
pub fn joint_pair(a: Point, b: Point, c: Point, half_width: f64) -> OffsetPair {
    let incoming = offset_pair(a, b, half_width, b);
    let outgoing = offset_pair(c, b, half_width, b);
    OffsetPair {
        left: incoming.left.midpoint(outgoing.right),
        right: incoming.right.midpoint(outgoing.left),
    }
}

/// Incrementally builds one stroke outline.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    id: StrokeId,
    style: StrokeStyle,
    samples: Vec<Sample>,
    left: Vec<Point>,
    right: Vec<Point>,
}

impl StrokeBuilder {
    /// Start a stroke at `first`. The outline holds one degenerate pair.
    #[must_use]
    pub fn begin(first: Sample, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
            samples: vec![first],
            left: vec![first.point],
            right: vec![first.point],
        }
    }

    /// Id the finished stroke will carry.
    #[must_use]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Samples accepted so far.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Add a sample. Returns `true` if the outline changed.
    ///
    /// A sample at the same position as the previous one is dropped. A sample
    /// whose offsets come out non-finite is kept in the history but leaves the
    /// outline untouched.
    pub fn extend(&mut self, sample: Sample) -> bool {
        if self.samples.last().is_some_and(|last| last.point == sample.point) {
            return false;
        }
        self.samples.push(sample);

        let n = self.samples.len();
        if n == 2 {
            let start = self.samples[0];
            let pair = offset_pair(start.point, sample.point, self.style.half_width(&start), start.point);
            if !pair.is_finite() {
                debug!(stroke = %self.id, "skipping non-finite start offsets");
                return false;
            }
            self.left = vec![pair.left];
            self.right = vec![pair.right];
            return true;
        }

        let (a, b, c) = (self.samples[n - 3], self.samples[n - 2], self.samples[n - 1]);
        let pair = joint_pair(a.point, b.point, c.point, self.style.half_width(&b));
        if !pair.is_finite() {
            debug!(stroke = %self.id, samples = n, "skipping non-finite joint offsets");
            return false;
        }
        self.left.push(pair.left);
        self.right.push(pair.right);
        true
    }

    /// Current outline polygon.
    #[must_use]
    pub fn outline(&self) -> Vec<Point> {
        self.left.iter().chain(self.right.iter().rev()).copied().collect()
    }

    /// Freeze the outline into a [`Stroke`].
    #[must_use]
    pub fn finish(self) -> Stroke {
        let outline = self.outline();
        Stroke { id: self.id, outline, color: self.style.color, tension: STROKE_TENSION }
    }
}

/// Closed polygon traced by a selection gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lasso {
    pub points: Vec<Point>,
}

impl Lasso {
    /// Whether `point` lies inside the lasso (even-odd rule).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        hit::point_in_polygon(point, &self.points)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }
}

/// Append-only polyline used as a lasso boundary.
#[derive(Debug, Clone, Default)]
pub struct LassoBuilder {
    points: Vec<Point>,
}

impl LassoBuilder {
    #[must_use]
    pub fn begin(first: Point) -> Self {
        Self { points: vec![first] }
    }

    /// Append a point. Repeats of the previous point are dropped.
    pub fn extend(&mut self, point: Point) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Points traced so far.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Close the polyline into a lasso polygon.
    #[must_use]
    pub fn finish(self) -> Lasso {
        Lasso { points: self.points }
    }
}
