//! Core types for the chess rule engine.
//!
//! This crate provides the value types shared by every consumer of the
//! engine:
//! - [`Piece`] and [`Color`] for piece identity
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveFlag`] for committed move records
//!
//! No game logic lives here; movement rules and game state belong to the
//! engine crate.

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Move, MoveFlag};
pub use piece::Piece;
pub use square::Square;
