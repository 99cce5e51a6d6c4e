//! Core chess types.
//!
//! This module contains the value types used throughout the engine:
//! - `PieceKind`, `Team` and the placed `Piece` record
//! - `Square` - linear 0-63 square index
//! - `Bitboard` - 64-bit square set
//! - `Move`, `MoveFlag` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveFlag, MoveList, MoveListIntoIter};
pub use piece::{Piece, PieceKind, Team};
pub use square::Square;

pub(crate) use square::{file_to_index, rank_to_index};
