use crate::pieces::{Position, Shape, TetrominoType};

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

// ============================================================================
// Cells
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Filled(TetrominoType),
}

// ============================================================================
// Board
// ============================================================================

/// The playfield: a row-major grid of settled cells. The active piece is
/// never written here until it locks.
pub struct Board {
    pub cells: Vec<Vec<CellState>>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![vec![CellState::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn is_cell_free(&self, x: i16, y: i16) -> bool {
        // Check side walls and floor
        if x < 0 || x >= GRID_WIDTH as i16 {
            return false;
        }
        if y >= GRID_HEIGHT as i16 {
            return false;
        }
        // Rows above the top are open so pieces can enter the well
        if y < 0 {
            return true;
        }
        self.cells[y as usize][x as usize] == CellState::Empty
    }

    /// Whether a shape placed with its bounding box at `origin` overlaps a
    /// wall, the floor, or a settled cell. Every legality question in the
    /// engine goes through here.
    pub fn would_collide(&self, shape: &Shape, origin: Position) -> bool {
        shape
            .cells
            .iter()
            .any(|&(dx, dy)| !self.is_cell_free(origin.x + dx, origin.y + dy))
    }

    /// Writes a shape into the grid. Cells above the top edge are dropped;
    /// callers have already verified the placement does not collide.
    pub fn lock(&mut self, shape: &Shape, origin: Position, kind: TetrominoType) {
        for &(dx, dy) in shape.cells.iter() {
            let x = origin.x + dx;
            let y = origin.y + dy;
            if y >= 0 && y < GRID_HEIGHT as i16 {
                self.cells[y as usize][x as usize] = CellState::Filled(kind);
            }
        }
    }

    /// Removes every complete row, shifts the rows above it down, and tops
    /// the grid up with empty rows. Returns how many rows were removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared_count = 0;
        let mut y = 0;

        while y < GRID_HEIGHT {
            if self.cells[y].iter().all(|cell| *cell != CellState::Empty) {
                self.cells.remove(y);
                self.cells.insert(0, vec![CellState::Empty; GRID_WIDTH]);
                cleared_count += 1;
                // Don't increment y - the next row has shifted into this position
            } else {
                y += 1;
            }
        }

        cleared_count
    }

    /// Check if a specific row is complete (all filled)
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| *cell != CellState::Empty)
    }

    /// Count filled cells in a row
    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.cells[y].iter().filter(|cell| **cell != CellState::Empty).count()
    }

    /// Count total filled cells in the grid
    pub fn total_filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| **cell != CellState::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..GRID_WIDTH {
            board.cells[y][x] = CellState::Filled(TetrominoType::T);
        }
    }

    pub fn fill_row_with_gap(board: &mut Board, y: usize, gap_x: usize) {
        for x in 0..GRID_WIDTH {
            if x != gap_x {
                board.cells[y][x] = CellState::Filled(TetrominoType::T);
            }
        }
    }
}
