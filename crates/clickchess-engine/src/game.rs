//! Turn and selection state machine.

use crate::controller::TurnResult;
use crate::movegen::{apply_move, is_in_check, legal_moves};
use crate::{Board, SquareSet};
use clickchess_core::{Color, Square};

/// Where the game stands after the last committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Game running, side to move not in check.
    InProgress,
    /// The named color is in check and must resolve it.
    Check(Color),
    /// Game over, the named color won.
    Checkmate(Color),
    /// Game over, drawn: the side to move has no legal move but is not
    /// in check.
    Stalemate,
}

impl Status {
    /// Returns true if no further moves are possible.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate)
    }

    /// Returns the winner, if the game ended with one.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            Status::Checkmate(winner) => Some(winner),
            _ => None,
        }
    }
}

/// The game state machine.
///
/// Owns the [`Board`] exclusively and mutates it one committed move at a
/// time; everything else reads it through shared references. Each call to
/// [`handle_square`](GameState::handle_square) processes one targeted
/// square to completion, so state is never partially updated.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active_color: Color,
    selection: Option<Square>,
    status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates the standard starting position, White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::startpos(),
            active_color: Color::White,
            selection: None,
            status: Status::InProgress,
        }
    }

    /// Creates a game from an arbitrary position, evaluating its status
    /// immediately (the position may already be checkmate or stalemate).
    pub fn from_board(board: Board, active_color: Color) -> Self {
        let mut state = GameState {
            board,
            active_color,
            selection: None,
            status: Status::InProgress,
        };
        state.status = state.evaluate_status();
        state
    }

    /// Reinitializes to the starting position. Callable at any time,
    /// mid-game or after a terminal state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns a read reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Returns the currently selected square, if a piece awaits a
    /// destination.
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// Returns the game status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the squares to outline this frame: the selected square and
    /// its legal destinations. Pure query, safe to call every frame.
    pub fn current_highlights(&self) -> SquareSet {
        match self.selection {
            Some(from) => legal_moves(&self.board, from).with(from),
            None => SquareSet::EMPTY,
        }
    }

    /// Processes one targeted square, driving the selection/move cycle.
    pub fn handle_square(&mut self, sq: Square) -> TurnResult {
        if self.status.is_terminal() {
            return TurnResult::GameOver(self.status.winner());
        }

        match self.selection {
            // Clicking the selected piece again puts it down.
            Some(from) if from == sq => {
                self.selection = None;
                TurnResult::Deselected
            }
            Some(from) if legal_moves(&self.board, from).contains(sq) => self.commit(from, sq),
            Some(_) => {
                // Not a legal destination: fall back to treating the click
                // as a fresh selection attempt.
                self.selection = None;
                match self.try_select(sq) {
                    Some(targets) => TurnResult::Highlighted(targets),
                    None => TurnResult::Deselected,
                }
            }
            None => match self.try_select(sq) {
                Some(targets) => TurnResult::Highlighted(targets),
                None => TurnResult::NoOp,
            },
        }
    }

    /// Selects `sq` if it holds a piece of the active color with at least
    /// one legal move, returning the destinations to highlight.
    fn try_select(&mut self, sq: Square) -> Option<SquareSet> {
        let (_, color) = self.board.piece_at(sq)?;
        if color != self.active_color {
            return None;
        }
        let targets = legal_moves(&self.board, sq);
        if targets.is_empty() {
            return None;
        }
        self.selection = Some(sq);
        Some(targets)
    }

    /// Applies a validated move, flips the turn, and re-evaluates status.
    fn commit(&mut self, from: Square, to: Square) -> TurnResult {
        let mov = apply_move(&mut self.board, from, to);
        self.selection = None;
        self.active_color = self.active_color.opposite();
        self.status = self.evaluate_status();

        if self.status.is_terminal() {
            TurnResult::GameOver(self.status.winner())
        } else {
            TurnResult::Moved(mov)
        }
    }

    /// Evaluates the status for the side now to move: checkmate if in
    /// check with no legal move anywhere, stalemate if not in check with
    /// no legal move, otherwise check or in-progress.
    fn evaluate_status(&self) -> Status {
        let to_move = self.active_color;
        let in_check = is_in_check(&self.board, to_move);
        let has_moves = self
            .board
            .pieces_of(to_move)
            .into_iter()
            .any(|sq| !legal_moves(&self.board, sq).is_empty());

        match (in_check, has_moves) {
            (true, false) => Status::Checkmate(to_move.opposite()),
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check(to_move),
            (false, true) => Status::InProgress,
        }
    }
}
