//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Team;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights represented as a bitmask (K, Q, k, q)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, team: Team, kingside: bool) -> bool {
        self.0 & Self::bit_for(team, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, team: Team, kingside: bool) {
        self.0 |= Self::bit_for(team, kingside);
    }

    #[inline]
    pub fn remove(&mut self, team: Team, kingside: bool) {
        self.0 &= !Self::bit_for(team, kingside);
    }

    /// Drop both rights of one team (its king moved)
    #[inline]
    pub fn remove_team(&mut self, team: Team) {
        self.remove(team, true);
        self.remove(team, false);
    }

    /// Drop the right tied to a rook corner, if `sq` is one.
    #[inline]
    pub fn remove_corner(&mut self, sq: Square) {
        self.0 &= !corner_bit(sq);
    }

    /// Get the raw bitmask value (for Zobrist hashing)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    #[inline]
    const fn bit_for(team: Team, kingside: bool) -> u8 {
        match (team, kingside) {
            (Team::White, true) => CASTLE_WHITE_K,
            (Team::White, false) => CASTLE_WHITE_Q,
            (Team::Black, true) => CASTLE_BLACK_K,
            (Team::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

fn corner_bit(sq: Square) -> u8 {
    match sq {
        Square::H1 => CASTLE_WHITE_K,
        Square::A1 => CASTLE_WHITE_Q,
        Square::H8 => CASTLE_BLACK_K,
        Square::A8 => CASTLE_BLACK_Q,
        _ => 0,
    }
}

/// FEN castling field: `KQkq`, any subset, or `-`.
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
