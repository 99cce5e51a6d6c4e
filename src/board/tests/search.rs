//! Search algorithm tests.
//!
//! Tests for alpha-beta, quiescence, mate scoring and repetition handling.

use crate::board::{find_best_move, Board, SearchLimits, DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD};
use crate::evaluation::{MaterialEvaluator, PositionalEvaluator};

fn best(fen: &str, limits: SearchLimits) -> (Option<String>, i32) {
    let mut board = Board::from_fen(fen);
    let result = find_best_move(&mut board, &MaterialEvaluator::default(), &limits);
    (result.best_move.map(|m| m.to_string()), result.score)
}

// ============================================================================
// Alpha-beta search tests
// ============================================================================

#[test]
fn alphabeta_finds_mate_in_one() {
    let (mv, score) = best("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", SearchLimits::depth(2));
    assert_eq!(mv.as_deref(), Some("e1e8"), "Should find Qe8#");
    assert_eq!(score, MATE_SCORE - 1);
}

#[test]
fn alphabeta_prefers_the_faster_mate() {
    let (mv, score) = best("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", SearchLimits::depth(4));
    assert_eq!(mv.as_deref(), Some("e1e8"));
    assert_eq!(score, MATE_SCORE - 1);
}

#[test]
fn alphabeta_handles_stalemate() {
    let (mv, score) = best("k7/8/1QK5/8/8/8/8/8 b - - 0 1", SearchLimits::depth(3));
    assert_eq!(mv, None);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn alphabeta_scores_checkmated_root() {
    let (mv, score) = best("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", SearchLimits::depth(2));
    assert_eq!(mv, None);
    assert_eq!(score, -MATE_SCORE);
}

#[test]
fn alphabeta_sees_mate_against_itself() {
    // Qe8# is threatened.
    let (mv, score) = best("6k1/5ppp/8/8/8/8/r7/4Q2K b - - 0 1", SearchLimits::depth(3));
    assert!(mv.is_some());
    assert!(score > -MATE_THRESHOLD, "Ra8 covers the back rank, got {score}");
}

#[test]
fn alphabeta_wins_a_hanging_queen() {
    let (mv, score) = best("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", SearchLimits::depth(2));
    assert_eq!(mv.as_deref(), Some("d1d5"));
    assert!(score >= 400);
}

// ============================================================================
// Quiescence tests
// ============================================================================

#[test]
fn quiescence_refuses_a_poisoned_pawn() {
    let fen = "4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1";
    let horizon_only = SearchLimits {
        depth: 1,
        quiescence: false,
    };
    let (greedy, _) = best(fen, horizon_only);
    assert_eq!(greedy.as_deref(), Some("d1d5"));

    let (careful, score) = best(fen, SearchLimits::depth(1));
    assert_ne!(careful.as_deref(), Some("d1d5"));
    assert_eq!(score, 700);
}

// ============================================================================
// Repetition and state handling
// ============================================================================

#[test]
fn repetition_is_scored_as_a_draw() {
    // Black is a queen down and can repeat the position a third time.
    let mut board = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
        board.try_make_move(uci).unwrap();
    }
    let result = find_best_move(&mut board, &MaterialEvaluator::default(), &SearchLimits::depth(2));
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("f6g8"));
    assert_eq!(result.score, DRAW_SCORE);
}

#[test]
fn search_restores_the_board() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = board.snapshot();
    let result = find_best_move(&mut board, &PositionalEvaluator::default(), &SearchLimits::depth(2));
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
    assert_eq!(board.snapshot(), before);
}

#[test]
fn depth_zero_is_treated_as_one() {
    let (mv, _) = best(crate::board::START_FEN, SearchLimits::depth(0));
    assert!(mv.is_some());
}
