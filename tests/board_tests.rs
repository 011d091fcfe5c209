//! Tests for the playfield grid
//!
//! Test categories:
//! - Cell freedom rules (walls, floor, the open top edge)
//! - Collision queries
//! - Locking pieces into the grid
//! - Full row detection and clearing

use textris::board::{test_helpers::*, Board, CellState, GRID_HEIGHT, GRID_WIDTH};
use textris::pieces::{Position, Tetromino, TetrominoType};

fn shape_at(piece_type: TetrominoType, rotation: usize) -> &'static textris::pieces::Shape {
    let mut piece = Tetromino::new_at(piece_type, 0, 0);
    piece.rotation = rotation;
    piece.shape()
}

// ============================================================================
// Cell Freedom Tests
// ============================================================================

mod cell_freedom {
    use super::*;

    #[test]
    fn interior_cells_of_empty_board_are_free() {
        let board = Board::new();

        assert!(board.is_cell_free(0, 0));
        assert!(board.is_cell_free(GRID_WIDTH as i16 - 1, GRID_HEIGHT as i16 - 1));
        assert!(board.is_cell_free(4, 10));
    }

    #[test]
    fn cells_beyond_side_walls_are_blocked() {
        let board = Board::new();

        assert!(!board.is_cell_free(-1, 5));
        assert!(!board.is_cell_free(GRID_WIDTH as i16, 5));
    }

    #[test]
    fn cells_below_floor_are_blocked() {
        let board = Board::new();

        assert!(!board.is_cell_free(4, GRID_HEIGHT as i16));
        assert!(!board.is_cell_free(4, GRID_HEIGHT as i16 + 3));
    }

    #[test]
    fn cells_above_top_edge_are_free() {
        let board = Board::new();

        assert!(board.is_cell_free(4, -1));
        assert!(board.is_cell_free(0, -4));
    }

    #[test]
    fn open_top_does_not_relax_wall_rules() {
        let board = Board::new();

        assert!(!board.is_cell_free(-1, -1));
        assert!(!board.is_cell_free(GRID_WIDTH as i16, -1));
    }

    #[test]
    fn occupied_cells_are_blocked() {
        let mut board = Board::new();
        board.cells[10][4] = CellState::Filled(TetrominoType::T);

        assert!(!board.is_cell_free(4, 10));
        assert!(board.is_cell_free(5, 10));
    }
}

// ============================================================================
// Collision Tests
// ============================================================================

mod collision {
    use super::*;

    #[test]
    fn no_collision_inside_empty_board() {
        let board = Board::new();
        let shape = shape_at(TetrominoType::T, 0);

        assert!(!board.would_collide(shape, Position { x: 4, y: 10 }));
    }

    #[test]
    fn collision_past_left_wall() {
        let board = Board::new();
        let shape = shape_at(TetrominoType::I, 0);

        assert!(board.would_collide(shape, Position { x: -1, y: 5 }));
        assert!(!board.would_collide(shape, Position { x: 0, y: 5 }));
    }

    #[test]
    fn collision_past_right_wall() {
        let board = Board::new();
        let shape = shape_at(TetrominoType::O, 0);

        // O is two wide, so x = GRID_WIDTH - 2 is the last legal column
        assert!(!board.would_collide(shape, Position { x: GRID_WIDTH as i16 - 2, y: 5 }));
        assert!(board.would_collide(shape, Position { x: GRID_WIDTH as i16 - 1, y: 5 }));
    }

    #[test]
    fn collision_past_floor() {
        let board = Board::new();
        let shape = shape_at(TetrominoType::O, 0);

        assert!(!board.would_collide(shape, Position { x: 4, y: GRID_HEIGHT as i16 - 2 }));
        assert!(board.would_collide(shape, Position { x: 4, y: GRID_HEIGHT as i16 - 1 }));
    }

    #[test]
    fn collision_with_settled_cells() {
        let mut board = Board::new();
        board.cells[10][5] = CellState::Filled(TetrominoType::S);
        let shape = shape_at(TetrominoType::O, 0);

        assert!(board.would_collide(shape, Position { x: 4, y: 9 }));
        assert!(!board.would_collide(shape, Position { x: 4, y: 8 }));
    }

    #[test]
    fn no_collision_while_partially_above_top() {
        let board = Board::new();
        let shape = shape_at(TetrominoType::I, 1);

        // Vertical I with two cells above the top edge
        assert!(!board.would_collide(shape, Position { x: 4, y: -2 }));
    }

    #[test]
    fn query_does_not_mutate_the_board() {
        let mut board = Board::new();
        fill_row_with_gap(&mut board, GRID_HEIGHT - 1, 5);
        let shape = shape_at(TetrominoType::O, 0);
        let filled_before = board.total_filled_cells();

        let first = board.would_collide(shape, Position { x: 4, y: 18 });
        let second = board.would_collide(shape, Position { x: 4, y: 18 });

        assert_eq!(first, second);
        assert_eq!(board.total_filled_cells(), filled_before);
    }
}

// ============================================================================
// Locking Tests
// ============================================================================

mod locking {
    use super::*;

    #[test]
    fn lock_writes_cells_with_piece_kind() {
        let mut board = Board::new();
        let shape = shape_at(TetrominoType::O, 0);

        board.lock(shape, Position { x: 4, y: 18 }, TetrominoType::O);

        assert_eq!(board.cells[18][4], CellState::Filled(TetrominoType::O));
        assert_eq!(board.cells[18][5], CellState::Filled(TetrominoType::O));
        assert_eq!(board.cells[19][4], CellState::Filled(TetrominoType::O));
        assert_eq!(board.cells[19][5], CellState::Filled(TetrominoType::O));
        assert_eq!(board.total_filled_cells(), 4);
    }

    #[test]
    fn lock_drops_cells_above_the_top_edge() {
        let mut board = Board::new();
        let shape = shape_at(TetrominoType::I, 1);

        board.lock(shape, Position { x: 0, y: -2 }, TetrominoType::I);

        assert_eq!(board.cells[0][0], CellState::Filled(TetrominoType::I));
        assert_eq!(board.cells[1][0], CellState::Filled(TetrominoType::I));
        assert_eq!(board.total_filled_cells(), 2);
    }

    #[test]
    fn lock_preserves_unrelated_cells() {
        let mut board = Board::new();
        board.cells[19][0] = CellState::Filled(TetrominoType::Z);
        let shape = shape_at(TetrominoType::O, 0);

        board.lock(shape, Position { x: 4, y: 18 }, TetrominoType::O);

        assert_eq!(board.cells[19][0], CellState::Filled(TetrominoType::Z));
    }
}

// ============================================================================
// Line Clearing Tests
// ============================================================================

mod line_clearing {
    use super::*;

    #[test]
    fn complete_bottom_row_is_cleared() {
        let mut board = Board::new();
        fill_row(&mut board, GRID_HEIGHT - 1);
        assert!(board.is_row_complete(GRID_HEIGHT - 1));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 1);
        assert_eq!(board.filled_count_in_row(GRID_HEIGHT - 1), 0);
        assert_eq!(board.total_filled_cells(), 0);
    }

    #[test]
    fn row_with_gap_is_not_cleared() {
        let mut board = Board::new();
        fill_row_with_gap(&mut board, GRID_HEIGHT - 1, 5);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 0);
        assert_eq!(board.filled_count_in_row(GRID_HEIGHT - 1), GRID_WIDTH - 1);
    }

    #[test]
    fn rows_above_cleared_row_fall_down() {
        let mut board = Board::new();
        fill_row(&mut board, GRID_HEIGHT - 1);
        board.cells[GRID_HEIGHT - 2][0] = CellState::Filled(TetrominoType::J);
        board.cells[GRID_HEIGHT - 2][1] = CellState::Filled(TetrominoType::J);

        board.clear_full_rows();

        assert_eq!(board.cells[GRID_HEIGHT - 1][0], CellState::Filled(TetrominoType::J));
        assert_eq!(board.cells[GRID_HEIGHT - 1][1], CellState::Filled(TetrominoType::J));
        assert_eq!(board.filled_count_in_row(GRID_HEIGHT - 2), 0);
    }

    #[test]
    fn separated_full_rows_clear_in_one_pass() {
        let mut board = Board::new();
        fill_row(&mut board, 5);
        fill_row(&mut board, 7);
        // Markers above and between the full rows
        board.cells[4][0] = CellState::Filled(TetrominoType::J);
        board.cells[6][0] = CellState::Filled(TetrominoType::L);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 2);
        // The row between the cleared pair falls by one, the row above by two
        assert_eq!(board.cells[7][0], CellState::Filled(TetrominoType::L));
        assert_eq!(board.cells[6][0], CellState::Filled(TetrominoType::J));
        assert_eq!(board.total_filled_cells(), 2);
    }

    #[test]
    fn four_stacked_rows_clear_together() {
        let mut board = Board::new();
        for i in 0..4 {
            fill_row(&mut board, GRID_HEIGHT - 1 - i);
        }

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.total_filled_cells(), 0);
    }

    #[test]
    fn top_row_can_be_cleared() {
        let mut board = Board::new();
        fill_row(&mut board, 0);

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.filled_count_in_row(0), 0);
    }

    #[test]
    fn fully_filled_board_clears_every_row() {
        let mut board = Board::new();
        for y in 0..GRID_HEIGHT {
            fill_row(&mut board, y);
        }

        assert_eq!(board.clear_full_rows(), GRID_HEIGHT as u32);
        assert_eq!(board.total_filled_cells(), 0);
        assert_eq!(board.cells.len(), GRID_HEIGHT);
    }
}
