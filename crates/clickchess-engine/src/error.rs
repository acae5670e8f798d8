//! Engine error taxonomy.

use clickchess_core::Color;
use thiserror::Error;

/// Errors the engine can report.
///
/// Player-facing misuse (clicking an empty square, an opponent's piece, or
/// an illegal destination) is never an error; those are ordinary
/// [`TurnResult`](crate::TurnResult) outcomes. Errors are reserved for
/// malformed input and internal consistency violations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A click arrived with coordinates outside the board. The input is
    /// rejected and no state is mutated.
    #[error("square ({file}, {rank}) is outside the board")]
    InvalidInput { file: u8, rank: u8 },

    /// A king is missing from the board. The legality filter never allows
    /// a king capture, so this signals engine corruption (for example a
    /// bypassed legality check), not player error.
    #[error("no {0} king on the board")]
    InvariantViolation(Color),
}
