use super::*;

const SIZE: f64 = 1000.0;

fn cell(col: i64, row: i64) -> GridCellId {
    GridCellId { col, row }
}

#[test]
fn display_format() {
    assert_eq!(cell(3, -2).to_string(), "cell-3x-2");
}

#[test]
fn primary_cell_uses_top_left() {
    assert_eq!(primary_cell_for(Rect::new(10.0, 20.0, 5000.0, 5000.0), SIZE), cell(0, 0));
    assert_eq!(primary_cell_for(Rect::new(1500.0, 2999.0, 1.0, 1.0), SIZE), cell(1, 2));
}

#[test]
fn primary_cell_floors_negative_coordinates() {
    assert_eq!(primary_cell_for(Rect::new(-1.0, -1000.0, 1.0, 1.0), SIZE), cell(-1, -1));
    assert_eq!(primary_cell_for(Rect::new(-1000.5, 0.0, 1.0, 1.0), SIZE), cell(-2, 0));
}

#[test]
fn box_inside_one_cell() {
    let cells = cells_for(Rect::new(100.0, 100.0, 50.0, 50.0), SIZE);
    assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![cell(0, 0)]);
}

#[test]
fn box_straddling_vertical_boundary() {
    let cells = cells_for(Rect::new(950.0, 100.0, 100.0, 50.0), SIZE);
    assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![cell(0, 0), cell(1, 0)]);
}

#[test]
fn box_straddling_both_boundaries() {
    let cells = cells_for(Rect::new(-10.0, 990.0, 20.0, 20.0), SIZE);
    let expected = [cell(-1, 0), cell(-1, 1), cell(0, 0), cell(0, 1)];
    assert_eq!(cells.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn edge_on_boundary_is_inclusive() {
    let cells = cells_for(Rect::new(0.0, 0.0, 1000.0, 0.0), SIZE);
    assert!(cells.contains(&cell(1, 0)));
    assert_eq!(cells.len(), 2);
}

#[test]
fn large_box_covers_full_range() {
    let cells = cells_for(Rect::new(0.0, 0.0, 2500.0, 1500.0), SIZE);
    assert_eq!(cells.len(), 3 * 2);
    assert!(cells.contains(&primary_cell_for(Rect::new(0.0, 0.0, 2500.0, 1500.0), SIZE)));
}

#[test]
fn cells_are_deterministic() {
    let r = Rect::new(123.0, -456.0, 789.0, 1011.0);
    assert_eq!(cells_for(r, SIZE), cells_for(r, SIZE));
}

#[test]
fn custom_cell_size() {
    assert_eq!(primary_cell_for(Rect::new(250.0, 99.0, 1.0, 1.0), 100.0), cell(2, 0));
}
