//! Board square representation.

use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares use little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// A square is a validated (file, rank) coordinate pair; both components
/// are always in `0..8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank indices, if both are in `0..8`.
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::from_coords(file, rank)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file index (0-7, a-h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank index (0-7, ranks 1-8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Steps this square by a (file, rank) delta, returning `None` if the
    /// result leaves the board.
    ///
    /// This is the primitive every ray walk and fixed-offset move is built
    /// from, so edge wrapping is impossible by construction.
    #[inline]
    pub const fn offset(self, dfile: i8, drank: i8) -> Option<Self> {
        let file = self.file() as i8 + dfile;
        let rank = self.rank() as i8 + drank;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::from_coords(file as u8, rank as u8)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }

    // Squares named in the castling rules.
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
