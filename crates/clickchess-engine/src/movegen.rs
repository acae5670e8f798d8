//! Move generation and legality filtering.
//!
//! Generation happens in two stages. [`candidate_moves`] produces the
//! destinations a piece could reach under its movement rule alone,
//! ignoring check-safety. [`legal_moves`] then simulates each candidate
//! on a scratch board and discards any that leaves the mover's own king
//! attacked: legality is defined by consequence, not by piece-local rules.
//!
//! [`apply_move`] commits a legal move, including the special-rule
//! bookkeeping (en passant, castling rook relocation, promotion, castling
//! rights).

use crate::{Board, SquareSet};
use clickchess_core::{Color, Move, MoveFlag, Piece, Square};

/// The 8 knight offsets, (file, rank).
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The 8 king offsets, (file, rank).
const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal ray directions (bishop).
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Orthogonal ray directions (rook).
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Returns the destinations the piece on `from` could move to under its
/// movement rule, ignoring whether the move would expose its own king.
///
/// Returns the empty set if `from` is empty. The match is exhaustive over
/// the six piece kinds, so every kind has a defined movement rule.
pub fn candidate_moves(board: &Board, from: Square) -> SquareSet {
    let Some((piece, color)) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    match piece {
        Piece::Pawn => pawn_candidates(board, from, color),
        Piece::Knight => offset_candidates(board, from, color, &KNIGHT_OFFSETS),
        Piece::Bishop => ray_candidates(board, from, color, &BISHOP_DIRECTIONS),
        Piece::Rook => ray_candidates(board, from, color, &ROOK_DIRECTIONS),
        Piece::Queen => {
            ray_candidates(board, from, color, &BISHOP_DIRECTIONS)
                | ray_candidates(board, from, color, &ROOK_DIRECTIONS)
        }
        Piece::King => king_candidates(board, from, color),
    }
}

/// Pawn pushes, captures, and en passant.
fn pawn_candidates(board: &Board, from: Square, color: Color) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let dir = color.pawn_direction();

    // Single push onto an empty square; double push from the start rank
    // only if both squares are empty.
    if let Some(one) = from.offset(0, dir) {
        if board.piece_at(one).is_none() {
            targets.insert(one);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.piece_at(two).is_none() {
                        targets.insert(two);
                    }
                }
            }
        }
    }

    // Diagonal captures require an enemy occupant, or the en passant
    // target square left behind by last turn's double push.
    for dfile in [-1, 1] {
        if let Some(diag) = from.offset(dfile, dir) {
            match board.piece_at(diag) {
                Some((_, occupant)) if occupant != color => targets.insert(diag),
                None if board.en_passant == Some(diag) => targets.insert(diag),
                _ => {}
            }
        }
    }

    targets
}

/// Fixed-offset candidates (knight), filtered by same-color occupancy.
fn offset_candidates(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(dfile, drank) in offsets {
        if let Some(to) = from.offset(dfile, drank) {
            match board.piece_at(to) {
                Some((_, occupant)) if occupant == color => {}
                _ => targets.insert(to),
            }
        }
    }
    targets
}

/// Ray-cast candidates (bishop, rook, queen): walk each direction until
/// the board edge, include an enemy blocker, exclude a friendly one.
fn ray_candidates(board: &Board, from: Square, color: Color, directions: &[(i8, i8)]) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(dfile, drank) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dfile, drank) {
            match board.piece_at(to) {
                None => {
                    targets.insert(to);
                    current = to;
                }
                Some((_, occupant)) => {
                    if occupant != color {
                        targets.insert(to);
                    }
                    break;
                }
            }
        }
    }
    targets
}

/// King steps plus castling destinations.
///
/// The castling attack conditions (not in check, transit square not
/// attacked) are part of castling's own movement rule, so they are
/// applied here; the legality filter still validates the destination
/// square like any other move.
fn king_candidates(board: &Board, from: Square, color: Color) -> SquareSet {
    let mut targets = offset_candidates(board, from, color, &KING_OFFSETS);

    let king_start = match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if from != king_start || is_square_attacked(board, from, color.opposite()) {
        return targets;
    }

    let rank = color.back_rank();
    let at = |file: u8| Square::from_coords(file, rank).expect("file index is in range");

    // Kingside: f and g files empty, f not attacked.
    if board.castling.kingside(color)
        && board.piece_at(at(5)).is_none()
        && board.piece_at(at(6)).is_none()
        && !is_square_attacked(board, at(5), color.opposite())
    {
        targets.insert(at(6));
    }

    // Queenside: b, c and d files empty, d not attacked.
    if board.castling.queenside(color)
        && board.piece_at(at(1)).is_none()
        && board.piece_at(at(2)).is_none()
        && board.piece_at(at(3)).is_none()
        && !is_square_attacked(board, at(3), color.opposite())
    {
        targets.insert(at(2));
    }

    targets
}

/// Returns true if any piece of `by_color` attacks `sq`.
///
/// Computed geometrically per attacker kind. This is equivalent to asking
/// whether `sq` is in some enemy piece's candidate set: pawn pushes never
/// target an occupied square, so only capture geometry matters here.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // Pawns attack diagonally toward their own push direction, so look
    // one rank back along it.
    let dir = by_color.pawn_direction();
    for dfile in [-1, 1] {
        if let Some(origin) = sq.offset(dfile, -dir) {
            if board.piece_at(origin) == Some((Piece::Pawn, by_color)) {
                return true;
            }
        }
    }

    for &(dfile, drank) in &KNIGHT_OFFSETS {
        if let Some(origin) = sq.offset(dfile, drank) {
            if board.piece_at(origin) == Some((Piece::Knight, by_color)) {
                return true;
            }
        }
    }

    for &(dfile, drank) in &KING_OFFSETS {
        if let Some(origin) = sq.offset(dfile, drank) {
            if board.piece_at(origin) == Some((Piece::King, by_color)) {
                return true;
            }
        }
    }

    // Sliders: the first occupant along each ray decides.
    ray_attacker(board, sq, by_color, &BISHOP_DIRECTIONS, Piece::Bishop)
        || ray_attacker(board, sq, by_color, &ROOK_DIRECTIONS, Piece::Rook)
}

/// Returns true if the first occupant along any of `directions` is an
/// enemy `slider` or queen.
fn ray_attacker(
    board: &Board,
    sq: Square,
    by_color: Color,
    directions: &[(i8, i8)],
    slider: Piece,
) -> bool {
    for &(dfile, drank) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(dfile, drank) {
            match board.piece_at(next) {
                None => current = next,
                Some((piece, color)) => {
                    if color == by_color && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

/// Returns true if the king of `color` is attacked.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Ok(king_sq) => is_square_attacked(board, king_sq, color.opposite()),
        // No king on the board; unreachable when the game state machine
        // owns the board.
        Err(_) => false,
    }
}

/// Returns the legal destinations for the piece on `from`: candidates
/// that, once simulated, do not leave the mover's own king attacked.
///
/// Returns the empty set if `from` is empty. A king capture is never
/// offered, whatever the geometry: in reachable positions the filter
/// already prevented the previous mover from leaving a king attacked,
/// and king destinations are rejected outright so the invariant also
/// holds on hand-built boards.
pub fn legal_moves(board: &Board, from: Square) -> SquareSet {
    let Some((_, color)) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    candidate_moves(board, from)
        .into_iter()
        .filter(|&to| !matches!(board.piece_at(to), Some((Piece::King, _))))
        .filter(|&to| {
            let mut scratch = board.clone();
            simulate(&mut scratch, from, to);
            !is_in_check(&scratch, color)
        })
        .collect()
}

/// Minimal move simulation for check testing: relocates the mover and
/// removes an en-passant victim. Rook relocation on castling and the
/// promoted piece's identity cannot affect whether the mover's king is
/// attacked, so they are skipped.
fn simulate(board: &mut Board, from: Square, to: Square) {
    if let Some(victim) = en_passant_victim(board, from, to) {
        board.remove(victim);
    }
    board.move_piece(from, to);
}

/// If moving `from` to `to` is an en passant capture, returns the square
/// of the captured pawn (on the mover's rank, not the destination).
fn en_passant_victim(board: &Board, from: Square, to: Square) -> Option<Square> {
    let (piece, _) = board.piece_at(from)?;
    if piece == Piece::Pawn && board.en_passant == Some(to) && from.file() != to.file() {
        Square::from_coords(to.file(), from.rank())
    } else {
        None
    }
}

/// Commits a move on the board and returns its record.
///
/// The caller must have validated `to` against [`legal_moves`]; the game
/// state machine is the only caller and guarantees it.
///
/// # Panics
///
/// Panics if `from` is empty.
pub fn apply_move(board: &mut Board, from: Square, to: Square) -> Move {
    let (piece, color) = board
        .piece_at(from)
        .expect("apply_move called on an empty origin square");

    // Work out the special-rule flag from the geometry of the move.
    let mut captured = None;
    let flag = match piece {
        Piece::Pawn if en_passant_victim(board, from, to).is_some() => MoveFlag::EnPassant,
        Piece::Pawn if to.rank() == color.promotion_rank() => MoveFlag::Promotion,
        Piece::Pawn if from.rank().abs_diff(to.rank()) == 2 => MoveFlag::DoublePush,
        Piece::King if from.file().abs_diff(to.file()) == 2 => {
            if to.file() > from.file() {
                MoveFlag::CastleKingside
            } else {
                MoveFlag::CastleQueenside
            }
        }
        _ => MoveFlag::Normal,
    };

    if flag == MoveFlag::EnPassant {
        if let Some(victim) = en_passant_victim(board, from, to) {
            captured = board.remove(victim).map(|(p, _)| p);
        }
    }

    if let Some((taken, _)) = board.move_piece(from, to) {
        captured = Some(taken);
    }

    // A click-only interface cannot ask which piece to promote to, so
    // promotion is always to a queen.
    if flag == MoveFlag::Promotion {
        board.place(to, Piece::Queen, color);
    }

    // Castling also relocates the rook past the king.
    if flag.is_castling() {
        let rank = color.back_rank();
        let (rook_from, rook_to) = match flag {
            MoveFlag::CastleKingside => (7, 5),
            _ => (0, 3),
        };
        let rook_from = Square::from_coords(rook_from, rank).expect("file index is in range");
        let rook_to = Square::from_coords(rook_to, rank).expect("file index is in range");
        board.move_piece(rook_from, rook_to);
    }

    update_castling_rights(board, piece, color, from, to);

    // The en passant window lasts exactly one turn.
    board.en_passant = if flag == MoveFlag::DoublePush {
        from.offset(0, color.pawn_direction())
    } else {
        None
    };

    Move::new(from, to, piece, captured, flag)
}

/// Castling rights go away when the king moves, when a rook leaves its
/// corner, or when an enemy capture lands on a rook's corner.
fn update_castling_rights(board: &mut Board, piece: Piece, color: Color, from: Square, to: Square) {
    if piece == Piece::King {
        board.castling.remove_color(color);
    }
    for sq in [from, to] {
        match sq {
            Square::A1 => board.castling.remove_queenside(Color::White),
            Square::H1 => board.castling.remove_kingside(Color::White),
            Square::A8 => board.castling.remove_queenside(Color::Black),
            Square::H8 => board.castling.remove_kingside(Color::Black),
            _ => {}
        }
    }
}
