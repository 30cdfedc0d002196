//! Content set: finished strokes and their cache-cell membership.
//!
//! `StrokeStore` owns every stroke not currently held by a selection group.
//! Alongside the strokes it keeps a bucket index from [`GridCellId`] to the
//! strokes overlapping that cell, recomputed whenever a stroke is inserted or
//! removed. Insertion reports which cells changed so the host can drop the
//! matching cached bitmaps.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::consts::CELL_SIZE;
use crate::partition::{GridCellId, cells_for};
use crate::stroke::{Stroke, StrokeId};

struct Entry {
    /// Insertion sequence; later strokes draw on top.
    seq: u64,
    stroke: Stroke,
    cells: BTreeSet<GridCellId>,
}

/// In-memory store of finished strokes.
pub struct StrokeStore {
    cell_size: f64,
    next_seq: u64,
    entries: HashMap<StrokeId, Entry>,
    buckets: HashMap<GridCellId, HashSet<StrokeId>>,
}

impl StrokeStore {
    /// Create an empty store bucketing by `cell_size` document units.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size, next_seq: 0, entries: HashMap::new(), buckets: HashMap::new() }
    }

    /// Insert or replace a stroke, placing it on top of the draw order.
    ///
    /// Returns every cell whose contents changed: the cells the stroke used to
    /// occupy (if it was present) plus the cells it occupies now.
    pub fn insert(&mut self, stroke: Stroke) -> BTreeSet<GridCellId> {
        let mut touched = match self.remove_entry(&stroke.id) {
            Some(old) => old.cells,
            None => BTreeSet::new(),
        };
        let cells = stroke.bounds().map(|b| cells_for(b, self.cell_size)).unwrap_or_default();
        for cell in &cells {
            self.buckets.entry(*cell).or_default().insert(stroke.id);
        }
        touched.extend(cells.iter().copied());

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(stroke.id, Entry { seq, stroke, cells });
        touched
    }

    /// Remove a stroke by id, returning it if it was present.
    pub fn remove(&mut self, id: &StrokeId) -> Option<Stroke> {
        self.remove_entry(id).map(|e| e.stroke)
    }

    fn remove_entry(&mut self, id: &StrokeId) -> Option<Entry> {
        let entry = self.entries.remove(id)?;
        for cell in &entry.cells {
            if let Some(bucket) = self.buckets.get_mut(cell) {
                bucket.remove(id);
                if bucket.is_empty() {
                    self.buckets.remove(cell);
                }
            }
        }
        Some(entry)
    }

    /// Return a reference to a stroke by id.
    #[must_use]
    pub fn get(&self, id: &StrokeId) -> Option<&Stroke> {
        self.entries.get(id).map(|e| &e.stroke)
    }

    /// Cells a stored stroke currently overlaps.
    #[must_use]
    pub fn cells_of(&self, id: &StrokeId) -> Option<&BTreeSet<GridCellId>> {
        self.entries.get(id).map(|e| &e.cells)
    }

    /// Ids of strokes overlapping `cell`, sorted for stable output.
    #[must_use]
    pub fn cell_members(&self, cell: &GridCellId) -> Vec<StrokeId> {
        let mut ids: Vec<StrokeId> = self.buckets.get(cell).map(|b| b.iter().copied().collect()).unwrap_or_default();
        ids.sort();
        ids
    }

    /// Cells that currently hold at least one stroke.
    #[must_use]
    pub fn occupied_cells(&self) -> BTreeSet<GridCellId> {
        self.buckets.keys().copied().collect()
    }

    /// All strokes in draw order (oldest first).
    #[must_use]
    pub fn strokes(&self) -> Vec<&Stroke> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries.into_iter().map(|e| &e.stroke).collect()
    }

    /// Number of strokes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store contains no strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new(CELL_SIZE)
    }
}
