//! Bitboard chess engine: legal move generation, alpha-beta search and a
//! small UCI front-end.

pub mod arena;
pub mod board;
pub mod evaluation;
pub mod uci;
mod zobrist;

pub use board::{Board, Move, Piece, PieceKind, Square, Team};
pub use evaluation::{Evaluator, EvaluatorKind};
