//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use super::square::Square;

/// Upper bound on legal moves in any reachable position.
pub(crate) const MAX_MOVES: usize = 256;

/// Special-move tag carried in the top four bits of a [`Move`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum MoveFlag {
    None = 0,
    DoublePawnPush = 1,
    EnPassant = 2,
    CastleKingside = 3,
    CastleQueenside = 4,
    PromoteQueen = 5,
    PromoteRook = 6,
    PromoteBishop = 7,
    PromoteKnight = 8,
}

impl MoveFlag {
    const fn from_bits(bits: u16) -> MoveFlag {
        match bits {
            1 => MoveFlag::DoublePawnPush,
            2 => MoveFlag::EnPassant,
            3 => MoveFlag::CastleKingside,
            4 => MoveFlag::CastleQueenside,
            5 => MoveFlag::PromoteQueen,
            6 => MoveFlag::PromoteRook,
            7 => MoveFlag::PromoteBishop,
            8 => MoveFlag::PromoteKnight,
            _ => MoveFlag::None,
        }
    }

    /// Promotion flag for a target kind; `None` for kinds a pawn cannot become.
    #[must_use]
    pub const fn promotion(kind: PieceKind) -> Option<MoveFlag> {
        match kind {
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }
}

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-15: [`MoveFlag`]
///
/// The all-zero value is the null move; no real move has `from == to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    /// Create a null/empty move (used for initialization)
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let from_idx = from.index() as u16;
        let to_idx = to.index() as u16;
        Move(from_idx | (to_idx << 6) | ((flag as u16) << 12))
    }

    /// Create a move with no special handling
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveFlag::None)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> 12)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Kind the pawn becomes, if this is a promotion
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.flag() {
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(
            self.flag(),
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }
}

/// Long algebraic form: `e2e4`, `e7e8q`; the null move prints as `0000`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.flag())
    }
}

/// Fixed-capacity move buffer filled by the generator.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::null(); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`MoveList`]
pub struct MoveListIntoIter {
    list: MoveList,
    pos: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.pos < self.list.len {
            let mv = self.list.moves[self.pos];
            self.pos += 1;
            Some(mv)
        } else {
            None
        }
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> MoveListIntoIter {
        MoveListIntoIter { list: self, pos: 0 }
    }
}
