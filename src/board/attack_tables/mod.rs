//! Attack tables for move generation.
//!
//! Sliding pieces walk precomputed per-square, per-direction rays and stop at
//! the nearest blocker, found with a forward bit-scan on rays that grow
//! towards higher indices and a reverse bit-scan on the others.

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use once_cell::sync::Lazy;

use super::types::{Bitboard, Square};

/// The eight compass directions, as seen from White's side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Rook directions
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Bishop directions
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// (file, rank) step
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Change in square index per step
    #[must_use]
    pub const fn offset(self) -> i8 {
        let (df, dr) = self.delta();
        df + dr * 8
    }

    /// True when stepping along this direction increases the square index.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.offset() > 0
    }

    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

/// Number of steps from each square to the board edge, indexed `[square][direction]`.
pub static EDGE_DISTANCE: Lazy<[[u8; 8]; 64]> = Lazy::new(|| {
    let mut table = [[0u8; 8]; 64];
    for (idx, row) in table.iter_mut().enumerate() {
        let sq = Square::from_index(idx);
        let (file, rank) = (sq.file(), sq.rank());
        let north = 7 - rank;
        let south = rank;
        let east = 7 - file;
        let west = file;
        for dir in Direction::ALL {
            row[dir.index()] = match dir {
                Direction::North => north,
                Direction::South => south,
                Direction::East => east,
                Direction::West => west,
                Direction::NorthEast => north.min(east),
                Direction::NorthWest => north.min(west),
                Direction::SouthEast => south.min(east),
                Direction::SouthWest => south.min(west),
            };
        }
    }
    table
});

/// Squares strictly beyond each square in each direction, indexed `[square][direction]`.
static RAYS: Lazy<[[Bitboard; 8]; 64]> = Lazy::new(|| {
    let mut rays = [[Bitboard::EMPTY; 8]; 64];
    for (idx, row) in rays.iter_mut().enumerate() {
        for dir in Direction::ALL {
            let steps = EDGE_DISTANCE[idx][dir.index()] as i32;
            let offset = dir.offset() as i32;
            let mut ray = Bitboard::EMPTY;
            for step in 1..=steps {
                ray = ray.with(Square::from_index((idx as i32 + offset * step) as usize));
            }
            row[dir.index()] = ray;
        }
    }
    rays
});

#[inline]
pub(crate) fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAYS[sq.index()][dir.index()]
}

/// First occupied square met when walking `dir`, given the blockers on that ray.
#[inline]
pub(crate) fn nearest_blocker(dir: Direction, blockers: Bitboard) -> Option<Square> {
    if dir.is_positive() {
        blockers.lsb()
    } else {
        blockers.msb()
    }
}

/// Squares from `sq` along `dir` up to and including the first blocker.
#[inline]
pub(crate) fn ray_until_blocked(sq: Square, dir: Direction, occupied: Bitboard) -> Bitboard {
    let full = ray(sq, dir);
    match nearest_blocker(dir, full & occupied) {
        Some(blocker) => full & !ray(blocker, dir),
        None => full,
    }
}

/// Attack set of a slider moving along `dirs` against `occupied`.
pub(crate) fn slider_attacks(sq: Square, dirs: &[Direction], occupied: Bitboard) -> Bitboard {
    dirs.iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_until_blocked(sq, dir, occupied))
}
