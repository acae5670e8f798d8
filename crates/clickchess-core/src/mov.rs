//! Committed move records.

use crate::{Piece, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Plain move or capture with no special action.
    Normal,
    /// Pawn double push from its starting rank.
    DoublePush,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// En passant capture.
    EnPassant,
    /// Pawn promotion. The engine always promotes to a queen; a click-only
    /// interface has no way to ask for an underpromotion piece.
    Promotion,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A committed move, as applied to the board.
///
/// Moves are ephemeral records: they are rebuilt from the board each turn
/// and handed to the presentation layer for rendering, never persisted.
/// Captured pieces are recorded but destroyed; there is no undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The piece that moved (before any promotion).
    pub piece: Piece,
    /// The piece that was captured, if any.
    pub captured: Option<Piece>,
    /// Special-rule flag.
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a move record.
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            flag,
        }
    }

    /// Returns true if this move captured a piece (including en passant).
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some() || matches!(self.flag, MoveFlag::EnPassant)
    }
}

impl fmt::Display for Move {
    /// Formats as coordinate notation, e.g. "e2e4"; captures use "x"
    /// ("e4xd5") so logs stay readable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_capture() {
            write!(f, "{}x{}", self.from, self.to)
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}
