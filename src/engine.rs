//! Engine: one state machine that routes pen, pinch and selection input to
//! the stroke builder, the lasso, the selection group and the viewport.
//!
//! Every operation returns the [`Action`]s the host has to perform (redraw,
//! drop cached cells, re-rasterize) instead of touching a canvas itself.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backdrop::ReferenceGrid;
use crate::config::InkConfig;
use crate::consts::ROTATION_SNAP_TOLERANCE;
use crate::doc::StrokeStore;
use crate::error::InkError;
use crate::geom::{Point, Rect};
use crate::hit;
use crate::input::{Gesture, PointerEvent, StrokeHandle, Tool, TransformGesture};
use crate::partition::{GridCellId, cells_for};
use crate::stroke::{Lasso, LassoBuilder, Stroke, StrokeBuilder, StrokeId, StrokeStyle};
use crate::transform::{self, PreviewTransform, SelectionGroup, snap_rotation};
use crate::viewport::{ViewportTransform, ZoomController};

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// A pen gesture opened; later calls must pass this handle.
    GestureStarted { handle: StrokeHandle, tool: Tool },
    /// The live stroke outline or lasso polyline changed.
    GestureUpdated { handle: StrokeHandle, points: Vec<Point> },
    /// A stroke was finalized and added to the content set.
    StrokeCreated(Stroke),
    /// Cached bitmaps for these cells are stale.
    InvalidateCells(BTreeSet<GridCellId>),
    /// A selection group formed or its hit region moved.
    SelectionChanged { ids: Vec<StrokeId>, hit_region: Option<Rect> },
    /// The selection group dissolved; its strokes are back in the content set.
    SelectionCleared { ids: Vec<StrokeId> },
    /// The selection preview changed.
    PreviewChanged(PreviewTransform),
    ViewportChanged(ViewportTransform),
    /// Re-rasterize cached content at this pixel ratio.
    Rasterize { pixel_ratio: f64 },
    RedrawBackdrop(ReferenceGrid),
    RenderNeeded,
}

/// Core engine state.
pub struct EngineCore {
    pub store: StrokeStore,
    pub viewport: ViewportTransform,
    pub config: InkConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    zoom: ZoomController,
    tool: Tool,
    gesture: Option<Gesture>,
    selection: Option<SelectionGroup>,
    next_handle: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid_config(InkConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with explicit tunables.
    ///
    /// # Errors
    ///
    /// Returns [`InkError::ConfigParse`] if `config` fails validation.
    pub fn with_config(config: InkConfig) -> Result<Self, InkError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: InkConfig) -> Self {
        Self {
            store: StrokeStore::new(config.cell_size),
            viewport: ViewportTransform::default(),
            zoom: ZoomController::new(config.min_scale, config.max_scale),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            tool: Tool::default(),
            gesture: None,
            selection: None,
            next_handle: 1,
            config,
        }
    }

    // --- Tool ---

    /// Set the tool used by the next pen gesture.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    // --- Pen gestures ---

    /// Open a pen gesture at `event`.
    ///
    /// Dissolves any selection group first. A missing or non-finite position
    /// opens nothing.
    ///
    /// # Errors
    ///
    /// [`InkError::GestureInProgress`] if a gesture is already open.
    pub fn begin_stroke(&mut self, event: &PointerEvent) -> Result<Vec<Action>, InkError> {
        if self.gesture.is_some() {
            return Err(InkError::GestureInProgress);
        }
        let Some(screen) = event.screen_position() else {
            debug!("pointer down without a usable position; ignored");
            return Ok(Vec::new());
        };

        let mut actions = self.dissolve_selection();
        let handle = StrokeHandle(self.next_handle);
        self.next_handle += 1;

        let world = self.viewport.screen_to_world(screen);
        let gesture = match self.tool {
            Tool::Draw => {
                let style = StrokeStyle { width: self.config.stroke_width, color: self.config.stroke_color.clone() };
                Gesture::Drawing { handle, builder: StrokeBuilder::begin(event.sample_at(world), style) }
            }
            Tool::Select => Gesture::Lassoing { handle, builder: LassoBuilder::begin(world) },
        };
        actions.push(Action::GestureStarted { handle, tool: gesture.tool() });
        actions.push(Action::GestureUpdated { handle, points: gesture.points() });
        actions.push(Action::RenderNeeded);
        self.gesture = Some(gesture);
        Ok(actions)
    }

    /// Feed a pointer move to the open gesture.
    ///
    /// # Errors
    ///
    /// [`InkError::NoActiveGesture`] with no open gesture;
    /// [`InkError::StaleHandle`] if `handle` is not the open one.
    pub fn extend_stroke(&mut self, handle: StrokeHandle, event: &PointerEvent) -> Result<Vec<Action>, InkError> {
        let viewport = self.viewport;
        let gesture = self.active_gesture_mut(handle)?;
        let Some(screen) = event.screen_position() else {
            return Ok(Vec::new());
        };
        let sample = event.sample_at(viewport.screen_to_world(screen));
        if !gesture.extend(sample) {
            return Ok(Vec::new());
        }
        Ok(vec![Action::GestureUpdated { handle, points: gesture.points() }, Action::RenderNeeded])
    }

    /// Close the open gesture.
    ///
    /// A drawing gesture becomes a stored stroke. A lasso gesture selects the
    /// strokes it touches and moves them into a new selection group; when it
    /// touches nothing, no group forms.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::extend_stroke`].
    pub fn finish_stroke(&mut self, handle: StrokeHandle) -> Result<Vec<Action>, InkError> {
        self.active_gesture_mut(handle)?;
        let Some(gesture) = self.gesture.take() else {
            return Err(InkError::NoActiveGesture);
        };
        match gesture {
            Gesture::Drawing { builder, .. } => Ok(self.store_stroke(builder.finish())),
            Gesture::Lassoing { builder, .. } => Ok(self.select_with(&builder.finish())),
        }
    }

    /// Drop the open gesture without storing anything.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match self.gesture.take() {
            Some(gesture) => {
                debug!(handle = gesture.handle().0, "gesture cancelled");
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    fn active_gesture_mut(&mut self, handle: StrokeHandle) -> Result<&mut Gesture, InkError> {
        let gesture = self.gesture.as_mut().ok_or(InkError::NoActiveGesture)?;
        let expected = gesture.handle();
        if expected != handle {
            return Err(InkError::StaleHandle { expected: expected.0, got: handle.0 });
        }
        Ok(gesture)
    }

    fn store_stroke(&mut self, stroke: Stroke) -> Vec<Action> {
        let cells = self.store.insert(stroke.clone());
        info!(stroke = %stroke.id, points = stroke.outline.len(), cells = cells.len(), "stroke finalized");
        vec![Action::StrokeCreated(stroke), Action::InvalidateCells(cells), Action::RenderNeeded]
    }

    fn select_with(&mut self, lasso: &Lasso) -> Vec<Action> {
        let selection = hit::select(self.store.strokes(), lasso, self.config.lasso_stride);
        if selection.is_empty() {
            debug!("lasso selected nothing");
            return vec![Action::RenderNeeded];
        }

        let mut cells = BTreeSet::new();
        let mut members = Vec::with_capacity(selection.ids.len());
        for id in &selection.ids {
            if let Some(old) = self.store.cells_of(id) {
                cells.extend(old.iter().copied());
            }
            if let Some(stroke) = self.store.remove(id) {
                members.push(stroke);
            }
        }
        // Selected strokes always have outline points, so the group forms.
        let Some(group) = SelectionGroup::new(members) else {
            return vec![Action::InvalidateCells(cells), Action::RenderNeeded];
        };
        info!(strokes = group.len(), "selection formed");
        let actions = vec![
            Action::InvalidateCells(cells),
            Action::SelectionChanged { ids: group.ids(), hit_region: group.hit_region() },
            Action::RenderNeeded,
        ];
        self.selection = Some(group);
        actions
    }

    // --- Selection ---

    /// Update the selection preview. Rotation snaps to 45° steps.
    ///
    /// Drag deltas arrive in screen pixels and are converted to document
    /// units at the current zoom. Non-finite values and zero scale factors
    /// leave the preview untouched.
    ///
    /// # Errors
    ///
    /// [`InkError::NoSelection`] when no group exists.
    pub fn transform_selection(&mut self, gesture: TransformGesture) -> Result<Vec<Action>, InkError> {
        let viewport = self.viewport;
        let group = self.selection.as_mut().ok_or(InkError::NoSelection)?;
        let usable = match gesture {
            TransformGesture::Translate { dx, dy } => dx.is_finite() && dy.is_finite(),
            TransformGesture::Scale { sx, sy } => sx.is_normal() && sy.is_normal(),
            TransformGesture::Rotate { degrees } => degrees.is_finite(),
        };
        if !usable {
            debug!(?gesture, "unusable selection transform; ignored");
            return Ok(Vec::new());
        }
        match gesture {
            TransformGesture::Translate { dx, dy } => {
                group.translate_by(viewport.screen_dist_to_world(dx), viewport.screen_dist_to_world(dy));
            }
            TransformGesture::Scale { sx, sy } => group.set_scale(sx, sy),
            TransformGesture::Rotate { degrees } => group.set_rotation(snap_rotation(degrees, ROTATION_SNAP_TOLERANCE)),
        }
        Ok(vec![Action::PreviewChanged(group.preview()), Action::RenderNeeded])
    }

    /// Commit the selection preview into stroke coordinates.
    ///
    /// # Errors
    ///
    /// [`InkError::NoSelection`] when no group exists.
    pub fn end_transform(&mut self) -> Result<Vec<Action>, InkError> {
        let cell_size = self.config.cell_size;
        let group = self.selection.as_mut().ok_or(InkError::NoSelection)?;
        let mut cells = cells_for(group.bounds(), cell_size);
        let ids = transform::commit(group);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        cells.extend(cells_for(group.bounds(), cell_size));
        Ok(vec![
            Action::InvalidateCells(cells),
            Action::SelectionChanged { ids, hit_region: group.hit_region() },
            Action::PreviewChanged(group.preview()),
            Action::RenderNeeded,
        ])
    }

    /// Dissolve the selection group, returning its strokes to the content set.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.dissolve_selection()
    }

    fn dissolve_selection(&mut self) -> Vec<Action> {
        let Some(mut group) = self.selection.take() else {
            return Vec::new();
        };
        transform::commit(&mut group);
        let ids = group.ids();
        let mut cells = BTreeSet::new();
        for stroke in group.into_members() {
            cells.extend(self.store.insert(stroke));
        }
        info!(strokes = ids.len(), "selection dissolved");
        vec![Action::SelectionCleared { ids }, Action::InvalidateCells(cells), Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Apply one two-finger sample. Ignored while a pen gesture is open.
    pub fn pinch(&mut self, a: Point, b: Point) -> Vec<Action> {
        if self.gesture.is_some() {
            debug!("pinch during pen gesture; ignored");
            return Vec::new();
        }
        let next = self.zoom.update(self.viewport, a, b);
        if next == self.viewport {
            return Vec::new();
        }
        self.viewport = next;
        vec![Action::ViewportChanged(next), Action::RenderNeeded]
    }

    /// Finish a pinch: re-rasterize at the new scale and redraw the grid.
    pub fn end_pinch(&mut self) -> Vec<Action> {
        if !self.zoom.end() {
            return Vec::new();
        }
        info!(scale = self.viewport.scale, "zoom finished");
        vec![
            Action::Rasterize { pixel_ratio: self.pixel_ratio() },
            Action::RedrawBackdrop(self.reference_grid()),
            Action::RenderNeeded,
        ]
    }

    /// Pan by a screen delta; the document cannot move past its origin.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let next = self.viewport.pan_by(dx, dy);
        if next == self.viewport {
            return Vec::new();
        }
        self.viewport = next;
        vec![Action::ViewportChanged(next), Action::RenderNeeded]
    }

    /// Record the viewport's CSS size and device pixel ratio.
    pub fn set_viewport_size(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        self.dpr = dpr;
        vec![
            Action::Rasterize { pixel_ratio: self.pixel_ratio() },
            Action::RedrawBackdrop(self.reference_grid()),
            Action::RenderNeeded,
        ]
    }

    fn pixel_ratio(&self) -> f64 {
        self.dpr * self.viewport.scale
    }

    // --- Queries ---

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Handle of the open pen gesture, if any.
    #[must_use]
    pub fn active_handle(&self) -> Option<StrokeHandle> {
        self.gesture.as_ref().map(Gesture::handle)
    }

    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zoom.is_zooming()
    }

    /// The current viewport transform.
    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        self.viewport
    }

    /// The selection group, if one is formed.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionGroup> {
        self.selection.as_ref()
    }

    /// Look up a stroke by id, whether stored or held by the selection.
    #[must_use]
    pub fn stroke(&self, id: &StrokeId) -> Option<&Stroke> {
        self.store
            .get(id)
            .or_else(|| self.selection.as_ref().and_then(|g| g.members().iter().find(|s| s.id == *id)))
    }

    /// Stored strokes in draw order. Selected strokes are not included.
    #[must_use]
    pub fn strokes(&self) -> Vec<&Stroke> {
        self.store.strokes()
    }

    /// Reference grid for the current viewport.
    #[must_use]
    pub fn reference_grid(&self) -> ReferenceGrid {
        ReferenceGrid::for_viewport(
            &self.viewport,
            self.viewport_width,
            self.viewport_height,
            self.config.grid_spacing,
        )
    }
}
