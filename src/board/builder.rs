//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//! The result goes through [`Board::set_board`], so castling rights follow
//! from which kings and rooks are still marked unmoved.
//!
//! # Example
//! ```
//! use bitboard_chess::board::{BoardBuilder, PieceKind, Square, Team};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square::E1, Team::White, PieceKind::King)
//!     .piece(Square::E8, Team::Black, PieceKind::King)
//!     .piece("a2".parse().unwrap(), Team::White, PieceKind::Pawn)
//!     .side_to_move(Team::White)
//!     .build();
//! assert_eq!(board.teams_king(Team::Black), Some(Square::E8));
//! ```

use super::{Board, Piece, PieceKind, Square, Team};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<Piece>,
    side_to_move: Team,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Team::White,
        }
    }

    /// Add an unmoved piece, replacing anything already placed on `sq`.
    #[must_use]
    pub fn piece(mut self, sq: Square, team: Team, kind: PieceKind) -> Self {
        self.pieces.retain(|p| p.square != sq);
        self.pieces.push(Piece::new(kind, team, sq));
        self
    }

    /// Mark the piece on `sq` as having moved (forfeits castling with it).
    #[must_use]
    pub fn moved(mut self, sq: Square) -> Self {
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.square == sq) {
            piece.has_moved = true;
        }
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, team: Team) -> Self {
        self.side_to_move = team;
        self
    }

    /// # Panics
    ///
    /// Panics if a team was given two kings.
    #[must_use]
    pub fn build(self) -> Board {
        let mut board = Board::empty();
        board.set_board(&self.pieces, self.side_to_move);
        board
    }
}
