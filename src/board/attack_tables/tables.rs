//! Precomputed attack tables for leaper pieces (knights, kings, pawns).

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Builds one table entry per square from (file, rank) jumps.
fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (idx, slot) in attacks.iter_mut().enumerate() {
        let sq = Square::from_index(idx);
        *slot = deltas
            .iter()
            .filter_map(|&(df, dr)| sq.offset(df, dr))
            .fold(Bitboard::EMPTY, Bitboard::with);
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// Squares a pawn of each team attacks, indexed `[team][square]`.
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(-1, 1), (1, 1)]),
        leaper_table(&[(-1, -1), (1, -1)]),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_in_corner_has_two_targets() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1.index()].popcount(), 2);
        assert_eq!(KNIGHT_ATTACKS[Square::from_coords(3, 3).index()].popcount(), 8);
    }

    #[test]
    fn king_counts_edges() {
        assert_eq!(KING_ATTACKS[Square::H8.index()].popcount(), 3);
        assert_eq!(KING_ATTACKS[Square::E1.index()].popcount(), 5);
        assert_eq!(KING_ATTACKS[Square::from_coords(4, 4).index()].popcount(), 8);
    }

    #[test]
    fn pawns_attack_forward_diagonals() {
        let e4 = Square::from_coords(4, 3);
        let white = PAWN_ATTACKS[0][e4.index()];
        let black = PAWN_ATTACKS[1][e4.index()];
        assert!(white.contains(Square::from_coords(3, 4)));
        assert!(white.contains(Square::from_coords(5, 4)));
        assert!(black.contains(Square::from_coords(3, 2)));
        assert!(black.contains(Square::from_coords(5, 2)));
        assert_eq!(PAWN_ATTACKS[0][Square::H1.index()].popcount(), 1);
        assert!(PAWN_ATTACKS[0][Square::H8.index()].is_empty());
    }
}
