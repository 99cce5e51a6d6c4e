//! Chess board representation and game logic.
//!
//! Uses bitboards for piece sets and attack maps, plus a square-indexed
//! table of piece records. Move generation is fully legal: pins, checks and
//! en passant discovered checks are resolved during generation, so every
//! move in the list can be played.
//!
//! # Example
//! ```
//! use bitboard_chess::board::{find_best_move, Board, SearchLimits};
//! use bitboard_chess::evaluation::MaterialEvaluator;
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let result = find_best_move(&mut board, &MaterialEvaluator::default(), &SearchLimits::depth(2));
//! assert!(result.best_move.is_some());
//! ```

mod attack_tables;
mod builder;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{FenError, MoveParseError, SquareError};
pub use state::{Board, PositionSnapshot};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Move, MoveFlag, MoveList, MoveListIntoIter, Piece,
    PieceKind, Square, Team,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, SearchLimits, SearchResult, DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD,
};

// Geometry shared with evaluation code
pub use attack_tables::{Direction, EDGE_DISTANCE};

pub(crate) use types::{file_to_index, rank_to_index};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
