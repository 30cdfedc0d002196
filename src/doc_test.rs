use uuid::Uuid;

use super::*;
use crate::geom::Point;

// =============================================================
// Helpers
// =============================================================

fn square_stroke(x: f64, y: f64, size: f64) -> Stroke {
    Stroke {
        id: Uuid::new_v4(),
        outline: vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ],
        color: "#000000".into(),
        tension: 0.4,
    }
}

fn cell(col: i64, row: i64) -> GridCellId {
    GridCellId { col, row }
}

// =============================================================
// Basic store operations
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = StrokeStore::default();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.occupied_cells().is_empty());
}

#[test]
fn insert_and_get() {
    let mut store = StrokeStore::default();
    let stroke = square_stroke(10.0, 10.0, 20.0);
    let id = stroke.id;
    store.insert(stroke.clone());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id), Some(&stroke));
}

#[test]
fn get_missing_is_none() {
    let store = StrokeStore::default();
    assert!(store.get(&Uuid::new_v4()).is_none());
}

#[test]
fn remove_returns_stroke() {
    let mut store = StrokeStore::default();
    let stroke = square_stroke(0.0, 0.0, 10.0);
    let id = stroke.id;
    store.insert(stroke);
    let removed = store.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(store.is_empty());
    assert!(store.remove(&id).is_none());
}

#[test]
fn strokes_are_in_insertion_order() {
    let mut store = StrokeStore::default();
    let a = square_stroke(0.0, 0.0, 10.0);
    let b = square_stroke(5.0, 5.0, 10.0);
    let c = square_stroke(9.0, 9.0, 10.0);
    let ids = [a.id, b.id, c.id];
    store.insert(a);
    store.insert(b);
    store.insert(c);
    let order: Vec<StrokeId> = store.strokes().iter().map(|s| s.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn reinsert_moves_to_top() {
    let mut store = StrokeStore::default();
    let a = square_stroke(0.0, 0.0, 10.0);
    let b = square_stroke(5.0, 5.0, 10.0);
    let a_id = a.id;
    store.insert(a);
    store.insert(b);
    let a = store.remove(&a_id).unwrap();
    store.insert(a);
    assert_eq!(store.strokes().last().map(|s| s.id), Some(a_id));
    assert_eq!(store.len(), 2);
}

// =============================================================
// Cell buckets
// =============================================================

#[test]
fn insert_reports_cells() {
    let mut store = StrokeStore::new(100.0);
    let stroke = square_stroke(90.0, 10.0, 20.0);
    let touched = store.insert(stroke.clone());
    assert_eq!(touched.into_iter().collect::<Vec<_>>(), vec![cell(0, 0), cell(1, 0)]);
    assert_eq!(store.cell_members(&cell(0, 0)), vec![stroke.id]);
    assert_eq!(store.cell_members(&cell(1, 0)), vec![stroke.id]);
}

#[test]
fn replacing_reports_old_and_new_cells() {
    let mut store = StrokeStore::new(100.0);
    let mut stroke = square_stroke(10.0, 10.0, 20.0);
    store.insert(stroke.clone());
    stroke.map_points(|p| p.offset(300.0, 0.0));
    let touched = store.insert(stroke.clone());
    assert!(touched.contains(&cell(0, 0)));
    assert!(touched.contains(&cell(3, 0)));
    assert!(store.cell_members(&cell(0, 0)).is_empty());
    assert_eq!(store.cell_members(&cell(3, 0)), vec![stroke.id]);
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_clears_buckets() {
    let mut store = StrokeStore::new(100.0);
    let stroke = square_stroke(10.0, 10.0, 20.0);
    let id = stroke.id;
    store.insert(stroke);
    assert_eq!(store.cells_of(&id).map(BTreeSet::len), Some(1));
    store.remove(&id);
    assert!(store.cell_members(&cell(0, 0)).is_empty());
    assert!(store.occupied_cells().is_empty());
    assert!(store.cells_of(&id).is_none());
}

#[test]
fn shared_cell_keeps_other_members() {
    let mut store = StrokeStore::new(100.0);
    let a = square_stroke(10.0, 10.0, 5.0);
    let b = square_stroke(50.0, 50.0, 5.0);
    let a_id = a.id;
    let b_id = b.id;
    store.insert(a);
    store.insert(b);
    let mut both = vec![a_id, b_id];
    both.sort();
    assert_eq!(store.cell_members(&cell(0, 0)), both);
    store.remove(&a_id);
    assert_eq!(store.cell_members(&cell(0, 0)), vec![b_id]);
}

#[test]
fn empty_outline_occupies_no_cells() {
    let mut store = StrokeStore::default();
    let mut stroke = square_stroke(0.0, 0.0, 1.0);
    stroke.outline.clear();
    let touched = store.insert(stroke);
    assert!(touched.is_empty());
    assert_eq!(store.len(), 1);
}
