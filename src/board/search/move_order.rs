//! Move ordering for alpha-beta.
//!
//! Must run right after the generation pass that produced the list: it reads
//! the opponent attack map that pass left on the board.

use super::super::attack_tables::PAWN_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveList, PieceKind, Team};
use super::constants::{
    LOSING_CAPTURE_BONUS, PAWN_ATTACKED_PENALTY, PIECE_ATTACKED_PENALTY, PROMOTION_BONUS,
    WINNING_CAPTURE_BONUS,
};
use crate::evaluation::Evaluator;

/// Squares the pawns of `team` attack.
fn pawn_attack_map(board: &Board, team: Team) -> Bitboard {
    board
        .piece_bitboard(PieceKind::Pawn, team)
        .iter()
        .fold(Bitboard::EMPTY, |acc, sq| acc | PAWN_ATTACKS[team.index()][sq.index()])
}

/// Heuristic score of one move; higher is searched first.
pub(crate) fn score_move(
    board: &Board,
    evaluator: &dyn Evaluator,
    mv: Move,
    opponent_attacks: Bitboard,
    opponent_pawn_attacks: Bitboard,
) -> i32 {
    let Some(mover) = board.piece_at(mv.from()) else {
        return 0;
    };
    let to = mv.to();
    let mut score = 0;

    let captured = if mv.is_en_passant() {
        Some(PieceKind::Pawn)
    } else {
        board.piece_at(to).map(|p| p.kind)
    };
    if let Some(victim) = captured {
        let trade = evaluator.piece_value(victim) - evaluator.piece_value(mover.kind);
        score += trade;
        score += if !opponent_attacks.contains(to) || trade > 0 {
            WINNING_CAPTURE_BONUS
        } else {
            LOSING_CAPTURE_BONUS
        };
    }

    if mv.promotion().is_some() {
        score += PROMOTION_BONUS;
    } else if mover.kind != PieceKind::King {
        if opponent_pawn_attacks.contains(to) {
            score -= PAWN_ATTACKED_PENALTY;
        } else if opponent_attacks.contains(to) {
            score -= PIECE_ATTACKED_PENALTY;
        }
    }
    score
}

/// Sort `moves` best first. Equal scores keep generation order.
pub(crate) fn order_moves(board: &Board, evaluator: &dyn Evaluator, moves: &mut MoveList) {
    let opponent = board.opposing_team();
    let opponent_attacks = board.squares_attacked_by(opponent);
    let opponent_pawn_attacks = pawn_attack_map(board, opponent);

    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| {
            (
                score_move(board, evaluator, mv, opponent_attacks, opponent_pawn_attacks),
                mv,
            )
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    for (slot, (_, mv)) in moves.as_mut_slice().iter_mut().zip(scored) {
        *slot = mv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::MaterialEvaluator;

    fn ordered(fen: &str) -> Vec<String> {
        let mut board = Board::from_fen(fen);
        let mut moves = board.generate_moves();
        order_moves(&board, &MaterialEvaluator::default(), &mut moves);
        moves.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn free_queen_capture_comes_first() {
        let moves = ordered("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        assert_eq!(moves[0], "d1d5");
    }

    #[test]
    fn promotion_beats_quiet_moves() {
        let moves = ordered("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert!(moves[0].starts_with("a7a8"));
        assert!(moves[3].starts_with("a7a8"));
    }

    #[test]
    fn squares_covered_by_pawns_go_last() {
        // Nc3-b5 walks into the a6 pawn; Nc3-d5 is only watched by the queen.
        let moves = ordered("3qk3/8/p7/8/8/2N5/8/4K3 w - - 0 1");
        let last = moves.last().unwrap();
        assert_eq!(last, "c3b5");
    }

    #[test]
    fn defended_losing_capture_trails_free_capture() {
        // Qxb7 is defended by the b8 rook; Rxh7 is free.
        let moves = ordered("1r2k3/1p5p/8/8/8/8/1Q5R/4K3 w - - 0 1");
        let free = moves.iter().position(|m| m == "h2h7").unwrap();
        let losing = moves.iter().position(|m| m == "b2b7").unwrap();
        assert!(free < losing);
    }
}
