use crate::board::{Board, CellState, GRID_HEIGHT, GRID_WIDTH};
use crate::pieces::{Tetromino, TetrominoType};

// ============================================================================
// Configuration
// ============================================================================

pub const LINES_PER_LEVEL: u32 = 10;

// Scoring
pub const SCORE_SINGLE: u32 = 100;
pub const SCORE_DOUBLE: u32 = 300;
pub const SCORE_TRIPLE: u32 = 500;
pub const SCORE_TETRIS: u32 = 800;

// ============================================================================
// Types
// ============================================================================

/// What a single command did to the session. Every command returns one of
/// these; there is no other feedback channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// The piece took the requested position (including no-op rotations).
    Moved,
    /// The request was refused and nothing changed.
    Blocked,
    /// A downward step was refused, so the piece settled; carries the
    /// number of rows cleared by the settlement.
    Locked(u32),
    /// The session is over, either already or as a result of this command.
    GameOver,
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> TetrominoType;
}

struct RandomPieceProvider;

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        TetrominoType::random()
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequencePieceProvider {
    pub fn new(pieces: Vec<TetrominoType>) -> Self {
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    pub board: Board,
    /// The falling piece; `None` exactly while `game_over` is set.
    pub current_piece: Option<Tetromino>,
    pub next_piece: TetrominoType,
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub game_over: bool,
    piece_provider: Box<dyn PieceProvider>,
}

// ============================================================================
// Game Logic
// ============================================================================

/// A freshly drawn piece, horizontally centered at the top edge.
fn spawn_piece(kind: TetrominoType) -> Tetromino {
    let width = kind.shapes()[0].width;
    Tetromino::new_at(kind, GRID_WIDTH as i16 / 2 - width / 2, 0)
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider))
    }

    pub fn with_provider(mut provider: Box<dyn PieceProvider>) -> Self {
        let first = provider.next_piece();
        let next = provider.next_piece();

        Self {
            board: Board::new(),
            current_piece: Some(spawn_piece(first)),
            next_piece: next,
            score: 0,
            lines_cleared: 0,
            level: 1,
            game_over: false,
            piece_provider: provider,
        }
    }

    pub fn with_board(board: Board, current_piece: Tetromino) -> Self {
        Self {
            board,
            current_piece: Some(current_piece),
            next_piece: TetrominoType::random(),
            score: 0,
            lines_cleared: 0,
            level: 1,
            game_over: false,
            piece_provider: Box::new(RandomPieceProvider),
        }
    }

    pub fn move_left(&mut self) -> Outcome {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> Outcome {
        self.shift(1)
    }

    fn shift(&mut self, dx: i16) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }
        let Some(piece) = self.current_piece else {
            return Outcome::GameOver;
        };

        let moved = piece.moved(dx, 0);
        if self.board.would_collide(moved.shape(), moved.position) {
            Outcome::Blocked
        } else {
            self.current_piece = Some(moved);
            Outcome::Moved
        }
    }

    /// Clockwise rotation to the next stored state. No repositioning is
    /// attempted when the rotated shape does not fit.
    pub fn rotate(&mut self) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }
        let Some(piece) = self.current_piece else {
            return Outcome::GameOver;
        };

        let rotated = piece.rotated();
        if self.board.would_collide(rotated.shape(), rotated.position) {
            Outcome::Blocked
        } else {
            self.current_piece = Some(rotated);
            Outcome::Moved
        }
    }

    /// One downward step. A refused step settles the piece instead of
    /// reporting `Blocked`.
    pub fn soft_drop(&mut self) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }
        let Some(piece) = self.current_piece else {
            return Outcome::GameOver;
        };

        let moved = piece.moved(0, 1);
        if self.board.would_collide(moved.shape(), moved.position) {
            self.lock_and_spawn(piece)
        } else {
            self.current_piece = Some(moved);
            Outcome::Moved
        }
    }

    /// Gravity advance; identical to a soft drop.
    pub fn tick(&mut self) -> Outcome {
        self.soft_drop()
    }

    /// Drops the piece to the lowest non-colliding row and settles it there.
    pub fn hard_drop(&mut self) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }
        let Some(mut piece) = self.current_piece else {
            return Outcome::GameOver;
        };

        loop {
            let dropped = piece.moved(0, 1);
            if self.board.would_collide(dropped.shape(), dropped.position) {
                break;
            }
            piece = dropped;
        }
        self.lock_and_spawn(piece)
    }

    fn lock_and_spawn(&mut self, piece: Tetromino) -> Outcome {
        self.board.lock(piece.shape(), piece.position, piece.tetromino_type);

        let lines = self.board.clear_full_rows();
        if lines > 0 {
            self.add_score(lines);
        }

        self.spawn_next_piece();
        if self.game_over {
            Outcome::GameOver
        } else {
            Outcome::Locked(lines)
        }
    }

    pub fn add_score(&mut self, lines: u32) {
        let base_score = match lines {
            1 => SCORE_SINGLE,
            2 => SCORE_DOUBLE,
            3 => SCORE_TRIPLE,
            4 => SCORE_TETRIS,
            _ => 0,
        };
        self.score += base_score * self.level;
        self.lines_cleared += lines;

        // Level up
        let new_level = (self.lines_cleared / LINES_PER_LEVEL) + 1;
        if new_level > self.level {
            self.level = new_level;
        }
    }

    /// Promotes the queued piece to the board. A spawn onto occupied cells
    /// ends the session and leaves no active piece.
    pub fn spawn_next_piece(&mut self) {
        let piece = spawn_piece(self.next_piece);
        self.next_piece = self.piece_provider.next_piece();

        if self.board.would_collide(piece.shape(), piece.position) {
            self.current_piece = None;
            self.game_over = true;
        } else {
            self.current_piece = Some(piece);
        }
    }

    pub fn reset_game(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.lines_cleared = 0;
        self.level = 1;
        self.game_over = false;

        self.next_piece = self.piece_provider.next_piece();
        self.spawn_next_piece();
    }

    /// Returns the visual grid state with the current piece overlaid
    pub fn render_grid(&self) -> Vec<Vec<CellState>> {
        let mut visual_grid = self.board.cells.clone();

        if let Some(piece) = self.current_piece {
            for block in piece.blocks() {
                if block.y >= 0
                    && block.y < GRID_HEIGHT as i16
                    && block.x >= 0
                    && block.x < GRID_WIDTH as i16
                {
                    visual_grid[block.y as usize][block.x as usize] =
                        CellState::Filled(piece.tetromino_type);
                }
            }
        }

        visual_grid
    }

    /// Check if the session has ended
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
