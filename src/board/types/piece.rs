//! Piece kinds, teams and the placed-piece record.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::square::Square;

/// The two sides.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::White => 0,
            Team::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Rank delta of a pawn step (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Team::White => 1,
            Team::Black => 6,
        }
    }

    #[inline]
    #[must_use]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }

    /// Rank the king and rooks start on
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> u8 {
        match self {
            Team::White => 0,
            Team::Black => 7,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in index order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Every kind a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Parse a kind from a character of either case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase character for this kind
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

/// A piece standing on the board.
///
/// `pin` is the set of squares the piece may still move to without exposing
/// its king; [`Bitboard::ALL`] when unpinned. It is scratch state rebuilt by
/// every move generation pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub square: Square,
    pub has_moved: bool,
    pub pin: Bitboard,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, team: Team, square: Square) -> Self {
        Piece {
            kind,
            team,
            square,
            has_moved: false,
            pin: Bitboard::ALL,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pin.0 != Bitboard::ALL.0
    }

    /// FEN character: uppercase for White
    #[must_use]
    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.team {
            Team::White => c.to_ascii_uppercase(),
            Team::Black => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_chars() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.to_char()), Some(kind));
            assert_eq!(
                PieceKind::from_char(kind.to_char().to_ascii_uppercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn teams_mirror_each_other() {
        assert_eq!(Team::White.opponent(), Team::Black);
        assert_eq!(Team::White.pawn_direction(), -Team::Black.pawn_direction());
        assert_eq!(Team::White.pawn_start_rank(), 7 - Team::Black.pawn_start_rank());
        assert_eq!(Team::White.promotion_rank(), 7 - Team::Black.promotion_rank());
    }

    #[test]
    fn new_pieces_are_unpinned_and_unmoved() {
        let piece = Piece::new(PieceKind::Rook, Team::Black, Square::H8);
        assert!(!piece.is_pinned());
        assert!(!piece.has_moved);
        assert_eq!(piece.to_char(), 'r');
    }
}
