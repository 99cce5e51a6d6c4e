//! Static evaluation.
//!
//! An [`Evaluator`] scores a position for one team against the other. The
//! search calls it once per side at every leaf and takes the difference, so
//! an implementation only has to describe how good the position is for
//! `team`, never for both.

mod tables;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, PieceKind, Team};

/// Scores a position from one team's point of view.
///
/// Implementations must not depend on anything but the board's persistent
/// state: placement, side to move, castling and en passant.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board, team: Team, opposing: Team) -> i32;

    /// Material value used by move ordering. Kings are worth 0 there.
    fn piece_value(&self, kind: PieceKind) -> i32;
}

/// Material values in centipawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        PieceValues {
            pawn: 100,
            knight: 325,
            bishop: 340,
            rook: 500,
            queen: 900,
        }
    }
}

impl PieceValues {
    #[inline]
    #[must_use]
    pub const fn value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => 0,
        }
    }

    fn material(&self, board: &Board, team: Team) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&kind| board.piece_bitboard(kind, team).popcount() as i32 * self.value(kind))
            .sum()
    }
}

/// Counts material and nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator {
    pub values: PieceValues,
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, team: Team, _opposing: Team) -> i32 {
        self.values.material(board, team)
    }

    fn piece_value(&self, kind: PieceKind) -> i32 {
        self.values.value(kind)
    }
}

const DOUBLED_PAWN_PENALTY: i32 = 7;
const ISOLATED_PAWN_PENALTY: i32 = 2;
const PASSED_PAWN_BONUS_PER_RANK: i32 = 10;
const DOUBLED_ROOKS_BONUS: i32 = 15;
const ROOKS_ON_PAWNLESS_FILE_BONUS: i32 = 10;
const BISHOP_PAIR_BONUS: i32 = 50;

/// Material plus piece-square tables, pawn structure, doubled rooks and the
/// bishop pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalEvaluator {
    pub values: PieceValues,
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board, team: Team, opposing: Team) -> i32 {
        let mut score = self.values.material(board, team);

        for kind in PieceKind::ALL {
            for sq in board.piece_bitboard(kind, team) {
                score += tables::square_value(kind, team, sq);
            }
        }

        let pawns = board.piece_bitboard(PieceKind::Pawn, team);
        let enemy_pawns = board.piece_bitboard(PieceKind::Pawn, opposing);
        let rooks = board.piece_bitboard(PieceKind::Rook, team);

        for file in 0..8u8 {
            let file_mask = Bitboard::file_mask(file);
            let pawns_on_file = (pawns & file_mask).popcount() as i32;
            if pawns_on_file > 0 {
                score += pawn_file_score(board, team, pawns, enemy_pawns, file);
            }

            if (rooks & file_mask).popcount() >= 2 {
                score += DOUBLED_ROOKS_BONUS;
                if pawns_on_file == 0 {
                    score += ROOKS_ON_PAWNLESS_FILE_BONUS;
                }
            }
        }

        if board.piece_bitboard(PieceKind::Bishop, team).popcount() >= 2 {
            score += BISHOP_PAIR_BONUS;
        }

        score
    }

    fn piece_value(&self, kind: PieceKind) -> i32 {
        self.values.value(kind)
    }
}

/// The file itself plus its neighbours.
fn adjacent_files(file: u8) -> Bitboard {
    let mut mask = Bitboard::file_mask(file);
    if file > 0 {
        mask |= Bitboard::file_mask(file - 1);
    }
    if file < 7 {
        mask |= Bitboard::file_mask(file + 1);
    }
    mask
}

/// Ranks strictly ahead of `rank` from `team`'s side, or from `rank` itself
/// when `inclusive`.
fn ranks_ahead(team: Team, rank: u8, inclusive: bool) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for r in 0..8u8 {
        let ahead = match team {
            Team::White => r > rank || (inclusive && r == rank),
            Team::Black => r < rank || (inclusive && r == rank),
        };
        if ahead {
            mask |= Bitboard::rank_mask(r);
        }
    }
    mask
}

fn pawn_file_score(board: &Board, team: Team, pawns: Bitboard, enemy_pawns: Bitboard, file: u8) -> i32 {
    let file_mask = Bitboard::file_mask(file);
    let on_file = pawns & file_mask;
    let count = on_file.popcount() as i32;
    let mut score = 0;

    if count > 1 {
        score -= DOUBLED_PAWN_PENALTY * count;
    }

    let neighbours = adjacent_files(file) & !file_mask;
    if !pawns.intersects(neighbours) {
        score -= ISOLATED_PAWN_PENALTY;
    }

    let ep_pawn = board.en_passant_pawn();
    for sq in on_file {
        // A pawn that just double-pushed can still be taken on its own rank.
        let span = adjacent_files(file) & ranks_ahead(team, sq.rank(), ep_pawn == Some(sq));
        if !enemy_pawns.intersects(span) {
            let relative_rank = match team {
                Team::White => sq.rank(),
                Team::Black => 7 - sq.rank(),
            };
            score += PASSED_PAWN_BONUS_PER_RANK * (i32::from(relative_rank) + 1);
        }
    }
    score
}

/// Selectable evaluator, for configuration and the text protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluatorKind {
    Material,
    #[default]
    Positional,
}

impl EvaluatorKind {
    #[must_use]
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Material => Box::new(MaterialEvaluator::default()),
            EvaluatorKind::Positional => Box::new(PositionalEvaluator::default()),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Material => write!(f, "material"),
            EvaluatorKind::Positional => write!(f, "positional"),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "material" => Ok(EvaluatorKind::Material),
            "positional" => Ok(EvaluatorKind::Positional),
            other => Err(format!("unknown evaluator '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both_sides(eval: &dyn Evaluator, fen: &str) -> (i32, i32) {
        let board = Board::from_fen(fen);
        (
            eval.evaluate(&board, Team::White, Team::Black),
            eval.evaluate(&board, Team::Black, Team::White),
        )
    }

    #[test]
    fn start_position_is_balanced() {
        for kind in [EvaluatorKind::Material, EvaluatorKind::Positional] {
            let eval = kind.build();
            let (white, black) = both_sides(eval.as_ref(), crate::board::START_FEN);
            assert_eq!(white, black, "{kind} evaluator is lopsided");
        }
    }

    #[test]
    fn material_counts_pieces() {
        let eval = MaterialEvaluator::default();
        let (white, black) = both_sides(&eval, "4k3/8/8/8/8/8/8/R2QK3 w - - 0 1");
        assert_eq!(white, 1400);
        assert_eq!(black, 0);
    }

    #[test]
    fn passed_pawns_score_symmetrically() {
        let eval = PositionalEvaluator::default();
        let (white, _) = both_sides(&eval, "4k3/8/8/8/8/2P5/8/4K3 w - - 0 1");
        let (_, black) = both_sides(&eval, "4k3/8/2p5/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(white, black);
    }

    #[test]
    fn blocked_pawn_is_not_passed() {
        let eval = PositionalEvaluator::default();
        let (free, _) = both_sides(&eval, "4k3/8/8/8/8/2P5/8/4K3 w - - 0 1");
        let (blocked, _) = both_sides(&eval, "4k3/8/1p6/8/8/2P5/8/4K3 w - - 0 1");
        assert_eq!(free - blocked, PASSED_PAWN_BONUS_PER_RANK * 3);
    }

    #[test]
    fn bishop_pair_is_rewarded() {
        let eval = PositionalEvaluator::default();
        let (pair, _) = both_sides(&eval, "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
        let (single, _) = both_sides(&eval, "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1");
        let f1_bishop = eval.values.bishop + tables::square_value(PieceKind::Bishop, Team::White, crate::board::Square::F1);
        assert_eq!(pair - single, f1_bishop + BISHOP_PAIR_BONUS);
    }

    #[test]
    fn evaluator_kind_parses() {
        assert_eq!("Material".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Material));
        assert!("stockfish".parse::<EvaluatorKind>().is_err());
    }
}
