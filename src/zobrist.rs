//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position keys. The key covers
//! placement, side to move, castling rights and the en passant file, which
//! is exactly what makes two positions equal for repetition purposes.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, PieceKind, Square, Team};

pub(crate) struct ZobristKeys {
    // piece_keys[kind][team][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    // one key per castling-rights bitmask value
    castling_keys: [u64; 16],
    // only the file matters for an en passant pawn
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Use a fixed seed for reproducibility
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 16];
        let mut en_passant_keys = [0; 8];

        for kind in &mut piece_keys {
            for team in kind.iter_mut() {
                for key in team.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        // no rights hashes to zero so an empty board has key 0
        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, kind: PieceKind, team: Team, sq: Square) -> u64 {
        self.piece_keys[kind.index()][team.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self, team: Team) -> u64 {
        match team {
            Team::White => 0,
            Team::Black => self.black_to_move_key,
        }
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    #[inline]
    pub(crate) fn en_passant(&self, pawn: Option<Square>) -> u64 {
        pawn.map_or(0, |sq| self.en_passant_keys[sq.file() as usize])
    }
}

// Initialize Zobrist keys lazily and globally
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
