//! Input model: tool modes, pointer capabilities, and the gesture state machine.
//!
//! `Tool` and `PointerCapabilities` capture the user's intent and device at
//! the time of a pointer event. `Gesture` is the open pen interaction tracked
//! between pointer-down and pointer-up; it owns the builder that accumulates
//! samples for it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_PRESSURE;
use crate::geom::Point;
use crate::stroke::{LassoBuilder, Sample, StrokeBuilder};

/// Which pen tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing (default).
    #[default]
    Draw,
    /// Lasso selection.
    Select,
}

/// What the input device can report, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerCapabilities {
    /// The device reports a meaningful pressure value.
    pub pressure: bool,
}

impl PointerCapabilities {
    /// Mouse or finger with no pressure reporting.
    #[must_use]
    pub fn basic() -> Self {
        Self::default()
    }

    /// Pressure-sensitive stylus.
    #[must_use]
    pub fn stylus() -> Self {
        Self { pressure: true }
    }

    /// Effective pressure for a raw device reading.
    ///
    /// Devices without pressure always draw at 1.0. Pressure-capable devices
    /// are floored at [`MIN_PRESSURE`] and capped at 1.0; a missing or
    /// non-finite reading counts as 1.0.
    #[must_use]
    pub fn resolve_pressure(self, raw: Option<f64>) -> f64 {
        if !self.pressure {
            return 1.0;
        }
        match raw {
            Some(p) if p.is_finite() => p.clamp(MIN_PRESSURE, 1.0),
            _ => 1.0,
        }
    }
}

/// One pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Viewport-local position in CSS pixels, if the device reported one.
    pub position: Option<Point>,
    /// Raw pressure reading, if any.
    pub pressure: Option<f64>,
    pub capabilities: PointerCapabilities,
}

impl PointerEvent {
    /// Event at `position` from a device without pressure.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self { position: Some(position), pressure: None, capabilities: PointerCapabilities::basic() }
    }

    /// Event at `position` from a stylus reporting `pressure`.
    #[must_use]
    pub fn stylus(position: Point, pressure: f64) -> Self {
        Self { position: Some(position), pressure: Some(pressure), capabilities: PointerCapabilities::stylus() }
    }

    /// Valid screen position, or `None` when missing or non-finite.
    #[must_use]
    pub fn screen_position(&self) -> Option<Point> {
        self.position.filter(|p| p.is_finite())
    }

    /// Build a sample at `world` with this event's resolved pressure.
    #[must_use]
    pub fn sample_at(&self, world: Point) -> Sample {
        Sample::new(world, self.capabilities.resolve_pressure(self.pressure))
    }
}

/// Live edit applied to the selection group's preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformGesture {
    /// Drag by a screen-space delta in CSS pixels.
    Translate { dx: f64, dy: f64 },
    /// Set the preview scale factors.
    Scale { sx: f64, sy: f64 },
    /// Set the preview rotation in degrees.
    Rotate { degrees: f64 },
}

/// Identifier of an open pen gesture, returned by `begin_stroke`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeHandle(pub u64);

/// The open pen gesture.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// Freehand stroke being drawn.
    Drawing {
        handle: StrokeHandle,
        builder: StrokeBuilder,
    },
    /// Lasso being traced for selection.
    Lassoing {
        handle: StrokeHandle,
        builder: LassoBuilder,
    },
}

impl Gesture {
    /// Handle issued when this gesture began.
    #[must_use]
    pub fn handle(&self) -> StrokeHandle {
        match self {
            Self::Drawing { handle, .. } | Self::Lassoing { handle, .. } => *handle,
        }
    }

    /// Tool that started this gesture.
    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Self::Drawing { .. } => Tool::Draw,
            Self::Lassoing { .. } => Tool::Select,
        }
    }

    /// Current shape: the outline polygon while drawing, the traced
    /// polyline while lassoing.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match self {
            Self::Drawing { builder, .. } => builder.outline(),
            Self::Lassoing { builder, .. } => builder.points().to_vec(),
        }
    }

    /// Feed one sample to the underlying builder. Returns `true` when the
    /// visible shape changed.
    pub fn extend(&mut self, sample: Sample) -> bool {
        match self {
            Self::Drawing { builder, .. } => builder.extend(sample),
            Self::Lassoing { builder, .. } => builder.extend(sample.point),
        }
    }
}
