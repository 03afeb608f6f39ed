//! Grid tests - collision, locking, line clearing, garbage rows

use tetris_duel::core::garbage::{apply_garbage, garbage_row};
use tetris_duel::core::{Grid, Piece};
use tetris_duel::types::{Color, PieceKind, GRID_COLS, GRID_ROWS};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn fill_row(grid: &mut Grid, row: i32, color: Color) {
    for col in 0..GRID_COLS as i32 {
        grid.set(col, row, Some(color));
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.cols(), GRID_COLS);
    assert_eq!(grid.rows(), GRID_ROWS);
    for row in 0..GRID_ROWS as i32 {
        for col in 0..GRID_COLS as i32 {
            assert_eq!(grid.get(col, row), Some(None));
        }
    }
}

#[test]
fn test_grid_bounds() {
    let mut grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, GRID_ROWS as i32), None);
    assert!(!grid.set(GRID_COLS as i32, 0, Some(Color::RED)));
    assert!(grid.set(9, 19, Some(Color::RED)));
    assert!(grid.is_occupied(9, 19));
}

#[test]
fn test_valid_position_rules() {
    let mut grid = Grid::new();
    let t = Piece::spawn(PieceKind::T);
    assert!(grid.is_valid_position(&t));

    // Above the top edge is allowed.
    assert!(grid.is_valid_position(&t.shifted(0, -1)));
    // Side walls and floor are not.
    assert!(!grid.is_valid_position(&t.shifted(-5, 0)));
    assert!(!grid.is_valid_position(&t.shifted(4, 0)));
    assert!(!grid.is_valid_position(&t.shifted(0, 19)));

    grid.set(5, 1, Some(Color::RED));
    assert!(!grid.is_valid_position(&t));
}

#[test]
fn test_lock_skips_cells_above_top() {
    let mut grid = Grid::new();
    let t = Piece::spawn(PieceKind::T).shifted(0, -1);
    grid.lock(&t);
    // Only the bottom row of the T (row 0) lands on the grid.
    let locked: usize = grid.as_rows().iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(locked, 3);
    assert_eq!(grid.get(4, 0), Some(Some(Color::PURPLE)));
}

#[test]
fn test_clear_single_bottom_row() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, Color::BLUE);
    grid.set(3, 18, Some(Color::RED));

    let cleared = grid.clear_lines();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(grid.get(3, 19), Some(Some(Color::RED)));
    assert_eq!(grid.get(3, 18), Some(None));
    assert_eq!(grid.rows(), GRID_ROWS);
}

#[test]
fn test_clear_adjacent_rows_rechecks_same_index() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, Color::BLUE);
    fill_row(&mut grid, 18, Color::GREEN);
    fill_row(&mut grid, 16, Color::CYAN);
    grid.set(0, 17, Some(Color::RED));

    let cleared = grid.clear_lines();
    assert_eq!(cleared.len(), 3);
    // The partial row ends at the bottom.
    assert_eq!(grid.get(0, 19), Some(Some(Color::RED)));
    assert_eq!(grid.as_rows().iter().flatten().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_garbage_rows_never_clear() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, Color::GARBAGE);
    assert!(!grid.is_row_clearable(19));

    // Filling the hole of a garbage row does not make it clear either.
    grid.push_bottom(garbage_row(2));
    grid.set(2, 19, Some(Color::RED));
    assert!(grid.clear_lines().is_empty());
}

#[test]
fn test_push_bottom_discards_top_row() {
    let mut grid = Grid::new();
    grid.set(0, 0, Some(Color::RED));
    grid.set(1, 1, Some(Color::BLUE));

    grid.push_bottom(garbage_row(4));

    assert_eq!(grid.get(0, 0), Some(None));
    assert_eq!(grid.get(1, 0), Some(Some(Color::BLUE)));
    assert_eq!(grid.get(4, 19), Some(None));
    assert_eq!(grid.garbage_cells(), GRID_COLS - 1);
}

#[test]
fn test_apply_garbage_shares_one_hole() {
    let mut grid = Grid::new();
    let mut rng = StdRng::seed_from_u64(7);

    let hole = apply_garbage(&mut grid, None, 3, &mut rng).unwrap();
    for row in GRID_ROWS - 3..GRID_ROWS {
        let r = grid.row(row).unwrap();
        assert_eq!(r[hole], None);
        assert_eq!(r.iter().filter(|c| c.is_none()).count(), 1);
    }
    assert_eq!(grid.garbage_cells(), 3 * (GRID_COLS - 1));
}

#[test]
fn test_apply_garbage_nudges_colliding_piece_once() {
    let mut grid = Grid::new();
    let mut rng = StdRng::seed_from_u64(1);
    // An O resting on the floor.
    let mut piece = Piece::spawn(PieceKind::O).shifted(0, 18);
    assert!(grid.is_valid_position(&piece));

    apply_garbage(&mut grid, Some(&mut piece), 2, &mut rng);
    assert_eq!(piece.y, 17);
}
