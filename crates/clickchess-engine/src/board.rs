//! Mailbox board representation.

use crate::{EngineError, SquareSet};
use clickchess_core::{Color, Piece, Square};
use std::fmt;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// Returns true if the given side can still castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can still castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes both castling rights for a color (the king moved).
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }
}

/// An 8x8 board: each square is empty or holds one piece of one color.
///
/// The grid is a plain mailbox array, not bitboards: the engine processes
/// one click at a time, so per-square lookup is the hot operation and a
/// direct `Option` array keeps move application trivially correct.
///
/// `castling` and `en_passant` carry the between-turn rule state the
/// special moves need. They are maintained by
/// [`apply_move`](crate::movegen::apply_move); the grid mutators below do
/// not touch them.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
    /// Which castling moves are still available.
    pub castling: CastlingRights,
    /// En passant target square, set for one turn after a double push.
    pub en_passant: Option<Square>,
}

/// Back-rank piece order, file a through h.
const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Creates an empty board with no castling rights.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.castling = CastlingRights::ALL;
        for color in [Color::White, Color::Black] {
            for (file, &piece) in BACK_RANK.iter().enumerate() {
                let back = Square::from_coords(file as u8, color.back_rank())
                    .expect("file index is in range");
                board.place(back, piece, color);
                let pawn = Square::from_coords(file as u8, color.pawn_start_rank())
                    .expect("file index is in range");
                board.place(pawn, Piece::Pawn, color);
            }
        }
        board
    }

    /// Returns the occupant of a square. Total: every valid `Square` maps
    /// to an answer.
    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Puts a piece on a square, replacing any occupant.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece, color: Color) {
        self.squares[sq.index() as usize] = Some((piece, color));
    }

    /// Clears a square, returning what was on it.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize].take()
    }

    /// Moves whatever stands on `from` to `to`, returning the captured
    /// occupant of `to` (if any). `from` is left empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<(Piece, Color)> {
        let mover = self.remove(from);
        std::mem::replace(&mut self.squares[to.index() as usize], mover)
    }

    /// Finds the king of the given color.
    ///
    /// The legality filter never offers a king capture, so a missing king
    /// means the engine state is corrupt; that is reported as
    /// [`EngineError::InvariantViolation`] rather than a panic.
    pub fn find_king(&self, color: Color) -> Result<Square, EngineError> {
        self.squares
            .iter()
            .position(|occ| *occ == Some((Piece::King, color)))
            .map(|index| Square::from_index(index as u8).expect("array index is in range"))
            .ok_or(EngineError::InvariantViolation(color))
    }

    /// Returns the set of squares occupied by the given color.
    pub fn pieces_of(&self, color: Color) -> SquareSet {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, occ)| matches!(occ, Some((_, c)) if *c == color))
            .map(|(index, _)| Square::from_index(index as u8).expect("array index is in range"))
            .collect()
    }

    /// Returns the set of all occupied squares.
    pub fn occupied(&self) -> SquareSet {
        self.pieces_of(Color::White) | self.pieces_of(Color::Black)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some((piece, color)) => write!(f, "{} ", piece.to_char(color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}
