use rand::Rng;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Display color identifier for a piece family, mapped to a concrete
/// terminal color by the UI.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

/// One rotation state: four occupied cells inside a width x height
/// bounding box, offsets relative to its top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Shape {
    pub width: i16,
    pub height: i16,
    pub cells: [(i16, i16); 4],
}

// ============================================================================
// Shape Tables
// ============================================================================

// Rotation states per family. 180-degree-symmetric families store only
// their distinct states, so cycling wraps early.

const I_SHAPES: [Shape; 2] = [
    Shape { width: 4, height: 1, cells: [(0, 0), (1, 0), (2, 0), (3, 0)] },
    Shape { width: 1, height: 4, cells: [(0, 0), (0, 1), (0, 2), (0, 3)] },
];

const O_SHAPES: [Shape; 1] = [
    Shape { width: 2, height: 2, cells: [(0, 0), (1, 0), (0, 1), (1, 1)] },
];

const T_SHAPES: [Shape; 4] = [
    Shape { width: 3, height: 2, cells: [(1, 0), (0, 1), (1, 1), (2, 1)] },
    Shape { width: 2, height: 3, cells: [(0, 0), (0, 1), (1, 1), (0, 2)] },
    Shape { width: 3, height: 2, cells: [(0, 0), (1, 0), (2, 0), (1, 1)] },
    Shape { width: 2, height: 3, cells: [(1, 0), (0, 1), (1, 1), (1, 2)] },
];

const S_SHAPES: [Shape; 2] = [
    Shape { width: 3, height: 2, cells: [(1, 0), (2, 0), (0, 1), (1, 1)] },
    Shape { width: 2, height: 3, cells: [(0, 0), (0, 1), (1, 1), (1, 2)] },
];

const Z_SHAPES: [Shape; 2] = [
    Shape { width: 3, height: 2, cells: [(0, 0), (1, 0), (1, 1), (2, 1)] },
    Shape { width: 2, height: 3, cells: [(1, 0), (0, 1), (1, 1), (0, 2)] },
];

const J_SHAPES: [Shape; 4] = [
    Shape { width: 3, height: 2, cells: [(0, 0), (0, 1), (1, 1), (2, 1)] },
    Shape { width: 2, height: 3, cells: [(0, 0), (1, 0), (0, 1), (0, 2)] },
    Shape { width: 3, height: 2, cells: [(0, 0), (1, 0), (2, 0), (2, 1)] },
    Shape { width: 2, height: 3, cells: [(1, 0), (1, 1), (0, 2), (1, 2)] },
];

const L_SHAPES: [Shape; 4] = [
    Shape { width: 3, height: 2, cells: [(2, 0), (0, 1), (1, 1), (2, 1)] },
    Shape { width: 2, height: 3, cells: [(0, 0), (0, 1), (0, 2), (1, 2)] },
    Shape { width: 3, height: 2, cells: [(0, 0), (1, 0), (2, 0), (0, 1)] },
    Shape { width: 2, height: 3, cells: [(0, 0), (1, 0), (1, 1), (1, 2)] },
];

impl TetrominoType {
    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            TetrominoType::I => &I_SHAPES,
            TetrominoType::O => &O_SHAPES,
            TetrominoType::T => &T_SHAPES,
            TetrominoType::S => &S_SHAPES,
            TetrominoType::Z => &Z_SHAPES,
            TetrominoType::J => &J_SHAPES,
            TetrominoType::L => &L_SHAPES,
        }
    }

    pub fn color(&self) -> PieceColor {
        match self {
            TetrominoType::I => PieceColor::Cyan,
            TetrominoType::O => PieceColor::Yellow,
            TetrominoType::T => PieceColor::Magenta,
            TetrominoType::S => PieceColor::Green,
            TetrominoType::Z => PieceColor::Red,
            TetrominoType::J => PieceColor::Blue,
            TetrominoType::L => PieceColor::Orange,
        }
    }

    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        match rng.gen_range(0..7) {
            0 => TetrominoType::I,
            1 => TetrominoType::O,
            2 => TetrominoType::T,
            3 => TetrominoType::S,
            4 => TetrominoType::Z,
            5 => TetrominoType::J,
            _ => TetrominoType::L,
        }
    }
}

// ============================================================================
// Active Piece
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tetromino {
    pub tetromino_type: TetrominoType,
    pub position: Position,
    pub rotation: usize,
}

impl Tetromino {
    pub fn new_at(tetromino_type: TetrominoType, x: i16, y: i16) -> Self {
        Self {
            tetromino_type,
            position: Position { x, y },
            rotation: 0,
        }
    }

    /// The shape for the current rotation. The modulo keeps any rotation
    /// value well-defined regardless of how many states the family stores.
    pub fn shape(&self) -> &'static Shape {
        let shapes = self.tetromino_type.shapes();
        &shapes[self.rotation % shapes.len()]
    }

    /// Occupied cells in board coordinates.
    pub fn blocks(&self) -> Vec<Position> {
        self.shape()
            .cells
            .iter()
            .map(|&(dx, dy)| Position {
                x: self.position.x + dx,
                y: self.position.y + dy,
            })
            .collect()
    }

    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            position: Position {
                x: self.position.x + dx,
                y: self.position.y + dy,
            },
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.tetromino_type.shapes().len(),
            ..*self
        }
    }
}
