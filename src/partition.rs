//! Spatial partitioning of document space into fixed-size cache cells.
//!
//! Cell ids are a pure function of a bounding box and the cell size; nothing
//! here holds state. The renderer keys one cached bitmap per cell.

#[cfg(test)]
#[path = "partition_test.rs"]
mod partition_test;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Opaque key of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCellId {
    pub col: i64,
    pub row: i64,
}

impl fmt::Display for GridCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell-{}x{}", self.col, self.row)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell_index(coord: f64, cell_size: f64) -> i64 {
    (coord / cell_size).floor() as i64
}

/// Cell containing the top-left corner of `bounds`.
#[must_use]
pub fn primary_cell_for(bounds: Rect, cell_size: f64) -> GridCellId {
    GridCellId { col: cell_index(bounds.x, cell_size), row: cell_index(bounds.y, cell_size) }
}

/// Every cell `bounds` overlaps, corners inclusive.
#[must_use]
pub fn cells_for(bounds: Rect, cell_size: f64) -> BTreeSet<GridCellId> {
    let first = primary_cell_for(bounds, cell_size);
    let last_col = cell_index(bounds.right(), cell_size);
    let last_row = cell_index(bounds.bottom(), cell_size);
    let mut cells = BTreeSet::new();
    for col in first.col..=last_col {
        for row in first.row..=last_row {
            cells.insert(GridCellId { col, row });
        }
    }
    cells
}
