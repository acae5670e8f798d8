//! Chess rule engine for a click-driven two-player game.
//!
//! This crate owns the board state, enforces legal movement per piece
//! type, detects check, checkmate, and stalemate, and reports a winner.
//! It has no event loop and performs no rendering or I/O: the
//! presentation layer feeds it one normalized "square clicked" event at a
//! time through [`GameController`] and reads back what changed.
//!
//! # Architecture
//!
//! Data flows one way per interaction:
//!
//! ```text
//! click -> GameController -> movegen (candidates + legality filter)
//!       -> Board mutation -> GameState status -> TurnResult
//! ```
//!
//! - [`Board`] - mailbox 8x8 grid of `Option<(Piece, Color)>` plus the
//!   castling/en-passant bookkeeping the special rules need
//! - [`movegen`] - candidate move generation, attack detection, the
//!   legality filter, and move application
//! - [`GameState`] - turn and selection state machine with terminal
//!   condition evaluation
//! - [`GameController`] - the facade the presentation layer drives
//!
//! # Example
//!
//! ```
//! use clickchess_engine::{GameController, TurnResult};
//!
//! let mut game = GameController::new();
//! // Click the e2 pawn (file 4, rank 1): its moves light up.
//! match game.handle_click(4, 1).unwrap() {
//!     TurnResult::Highlighted(targets) => assert_eq!(targets.count(), 2),
//!     other => panic!("expected highlight, got {:?}", other),
//! }
//! // Click e4 to commit the move.
//! match game.handle_click(4, 3).unwrap() {
//!     TurnResult::Moved(m) => assert_eq!(m.to_string(), "e2e4"),
//!     other => panic!("expected move, got {:?}", other),
//! }
//! ```

mod board;
mod controller;
mod error;
mod game;
pub mod movegen;
mod squareset;

pub use board::{Board, CastlingRights};
pub use controller::{GameController, TurnResult};
pub use error::EngineError;
pub use game::{GameState, Status};
pub use movegen::{apply_move, candidate_moves, is_in_check, is_square_attacked, legal_moves};
pub use squareset::SquareSet;
