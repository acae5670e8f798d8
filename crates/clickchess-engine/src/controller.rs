//! The click-driven facade the presentation layer talks to.

use crate::game::{GameState, Status};
use crate::{EngineError, SquareSet};
use clickchess_core::{Color, Move, Piece, Square};

/// What a click changed, as one discriminated outcome for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// A piece was selected; these are its legal destinations.
    Highlighted(SquareSet),
    /// A move was committed and the turn passed to the other player.
    Moved(Move),
    /// The selection was cleared without moving.
    Deselected,
    /// The click changed nothing (empty square, opponent piece, or a
    /// piece with no legal moves, with nothing selected).
    NoOp,
    /// The game is over. `Some(color)` won by checkmate; `None` is a
    /// stalemate draw. Returned both for the move that ended the game and
    /// for every click after it.
    GameOver(Option<Color>),
}

/// The only surface the presentation layer touches.
///
/// Mapping pointer coordinates to (file, rank) is the caller's job; the
/// controller validates the pair, drives the state machine, and exposes
/// pure queries for rendering. The shell polls [`status`](Self::status)
/// to switch to a winner screen and calls [`reset`](Self::reset) to play
/// again.
#[derive(Debug, Clone, Default)]
pub struct GameController {
    state: GameState,
}

impl GameController {
    /// Creates a controller holding a fresh game.
    pub fn new() -> Self {
        GameController {
            state: GameState::new(),
        }
    }

    /// Processes one click on board square (`file`, `rank`).
    ///
    /// Rejects off-board coordinates with [`EngineError::InvalidInput`]
    /// without touching any state; every on-board click produces a
    /// [`TurnResult`], never an error.
    pub fn handle_click(&mut self, file: u8, rank: u8) -> Result<TurnResult, EngineError> {
        let sq =
            Square::from_coords(file, rank).ok_or(EngineError::InvalidInput { file, rank })?;
        Ok(self.state.handle_square(sq))
    }

    /// Returns the occupant of a square, for sprite selection.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.state.board().piece_at(sq)
    }

    /// Returns the squares to outline: the selection and its legal
    /// destinations. Pure query, safe every frame.
    pub fn current_highlights(&self) -> SquareSet {
        self.state.current_highlights()
    }

    /// Returns the game status. Pure query.
    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Returns the side to move, for a turn indicator.
    pub fn active_color(&self) -> Color {
        self.state.active_color()
    }

    /// Returns the selected square, if any.
    pub fn selection(&self) -> Option<Square> {
        self.state.selection()
    }

    /// Starts a new game from the standard position.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::is_in_check;
    use proptest::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn e2_pawn_highlights_from_start() {
        let mut game = GameController::new();
        // Pawn at (file 4, rank 1) can reach (4, 2) and (4, 3).
        match game.handle_click(4, 1).unwrap() {
            TurnResult::Highlighted(targets) => {
                assert_eq!(targets, [sq("e3"), sq("e4")].into_iter().collect());
            }
            other => panic!("expected highlight, got {other:?}"),
        }
    }

    #[test]
    fn off_board_click_is_rejected_without_mutation() {
        let mut game = GameController::new();
        game.handle_click(4, 1).unwrap();

        let err = game.handle_click(8, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidInput { file: 8, rank: 0 });
        // The selection made before the bad click is untouched.
        assert_eq!(game.selection(), Some(sq("e2")));

        assert!(game.handle_click(0, 200).is_err());
        assert_eq!(game.active_color(), Color::White);
    }

    #[test]
    fn empty_square_click_is_noop() {
        let mut game = GameController::new();
        assert_eq!(game.handle_click(4, 4).unwrap(), TurnResult::NoOp);
    }

    #[test]
    fn full_move_via_clicks() {
        let mut game = GameController::new();
        game.handle_click(4, 1).unwrap();
        match game.handle_click(4, 3).unwrap() {
            TurnResult::Moved(m) => assert_eq!(m.to_string(), "e2e4"),
            other => panic!("expected move, got {other:?}"),
        }
        assert_eq!(game.piece_at(sq("e4")), Some((Piece::Pawn, Color::White)));
        assert_eq!(game.piece_at(sq("e2")), None);
        assert_eq!(game.active_color(), Color::Black);
        assert!(game.current_highlights().is_empty());
    }

    #[test]
    fn fools_mate_via_clicks() {
        let mut game = GameController::new();
        // 1. f3 e5 2. g4 Qh4#
        for (from, to) in [((5, 1), (5, 2)), ((4, 6), (4, 4)), ((6, 1), (6, 3))] {
            game.handle_click(from.0, from.1).unwrap();
            game.handle_click(to.0, to.1).unwrap();
        }
        game.handle_click(3, 7).unwrap();
        assert_eq!(
            game.handle_click(7, 3).unwrap(),
            TurnResult::GameOver(Some(Color::Black))
        );
        assert_eq!(game.status(), Status::Checkmate(Color::Black));

        // Everything after that keeps reporting the result.
        assert_eq!(
            game.handle_click(4, 1).unwrap(),
            TurnResult::GameOver(Some(Color::Black))
        );

        // Until the shell resets for a rematch.
        game.reset();
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(game.piece_at(sq("e2")), Some((Piece::Pawn, Color::White)));
    }

    #[test]
    fn reset_mid_game() {
        let mut game = GameController::new();
        game.handle_click(4, 1).unwrap();
        game.handle_click(4, 3).unwrap();
        game.reset();
        assert_eq!(game.piece_at(sq("e4")), None);
        assert_eq!(game.piece_at(sq("e2")), Some((Piece::Pawn, Color::White)));
        assert_eq!(game.active_color(), Color::White);
    }

    /// One king of each color stays on the board, always.
    fn assert_kings_present(game: &GameController) {
        for color in [Color::White, Color::Black] {
            assert!(game.state.board().find_king(color).is_ok());
        }
    }

    proptest! {
        /// Random click streams can never corrupt the engine: turns
        /// strictly alternate on committed moves, the mover is never left
        /// in check, and both kings survive whatever the players click.
        #[test]
        fn random_clicks_preserve_invariants(
            clicks in proptest::collection::vec((0u8..8, 0u8..8), 0..250)
        ) {
            let mut game = GameController::new();
            for (file, rank) in clicks {
                let mover = game.active_color();
                let was_over = game.status().is_terminal();
                let result = game.handle_click(file, rank).unwrap();

                match result {
                    TurnResult::Moved(_) => {
                        prop_assert_eq!(game.active_color(), mover.opposite());
                        prop_assert!(!is_in_check(game.state.board(), mover));
                    }
                    TurnResult::GameOver(_) if !was_over => {
                        // The terminal move still alternated the turn and
                        // left the mover safe.
                        prop_assert_eq!(game.active_color(), mover.opposite());
                        prop_assert!(!is_in_check(game.state.board(), mover));
                    }
                    _ => {
                        prop_assert_eq!(game.active_color(), mover);
                    }
                }
                assert_kings_present(&game);
            }
        }

        /// Status always agrees with the definitions: terminal states
        /// have no legal moves, `Check`/`InProgress` have at least one.
        #[test]
        fn status_matches_legal_move_supply(
            clicks in proptest::collection::vec((0u8..8, 0u8..8), 0..250)
        ) {
            let mut game = GameController::new();
            for (file, rank) in clicks {
                game.handle_click(file, rank).unwrap();

                let board = game.state.board();
                let to_move = game.active_color();
                let in_check = is_in_check(board, to_move);
                let has_moves = board
                    .pieces_of(to_move)
                    .into_iter()
                    .any(|from| !crate::movegen::legal_moves(board, from).is_empty());

                match game.status() {
                    Status::Checkmate(winner) => {
                        prop_assert!(in_check && !has_moves);
                        prop_assert_eq!(winner, to_move.opposite());
                    }
                    Status::Stalemate => prop_assert!(!in_check && !has_moves),
                    Status::Check(color) => {
                        prop_assert!(in_check && has_moves);
                        prop_assert_eq!(color, to_move);
                    }
                    Status::InProgress => prop_assert!(!in_check && has_moves),
                }
            }
        }
    }
}
