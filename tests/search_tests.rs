//! Search tests to verify the engine finds correct moves in various positions.

use bitboard_chess::board::{find_best_move, Board, SearchLimits, Team, MATE_SCORE, MATE_THRESHOLD};
use bitboard_chess::evaluation::{Evaluator, EvaluatorKind, MaterialEvaluator, PositionalEvaluator};
use bitboard_chess::uci::{format_uci_move, parse_position_command};

fn search(fen: &str, depth: u32) -> (Option<String>, i32) {
    let mut board = Board::from_fen(fen);
    let result = find_best_move(&mut board, &PositionalEvaluator::default(), &SearchLimits::depth(depth));
    (result.best_move.map(|m| format_uci_move(&m)), result.score)
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    let (mv, score) = search("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 4);
    assert_eq!(mv.as_deref(), Some("e1e8"), "Should find Qe8# (back rank mate)");
    assert!(score >= MATE_THRESHOLD);
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    let (mv, score) =
        search("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4", 2);
    assert_eq!(mv.as_deref(), Some("h5f7"), "Should find Qxf7# (scholar's mate)");
    assert!(score >= MATE_THRESHOLD);
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    let (mv, _) = search("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3", 3);
    let mv = mv.expect("Should find a move");
    assert_ne!(mv, "f3c6", "Should not trade the queen for a knight");
    assert_ne!(mv, "f3f7", "Should not give the queen for a pawn");
}

/// Test that the engine captures free material
#[test]
fn captures_free_piece() {
    let (mv, score) = search("r3k3/ppp2ppp/8/3n4/8/2N5/PPP2PPP/4K2R w K - 0 1", 3);
    assert_eq!(mv.as_deref(), Some("c3d5"));
    assert!(score > 200);
}

/// Test that deeper searches still return legal moves
#[test]
fn searches_return_legal_moves() {
    let mut board = Board::new();
    for depth in 1..=3 {
        let result = find_best_move(&mut board, &MaterialEvaluator::default(), &SearchLimits::depth(depth));
        let mv = result.best_move.expect("Should find a move");
        assert!(board.generate_moves().contains(mv), "Depth {depth} move should be legal");
    }
}

/// Test that search returns no move for a checkmated side
#[test]
fn no_move_in_checkmate() {
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(board.is_checkmate(), "Position should be checkmate");

    let result = find_best_move(&mut board, &MaterialEvaluator::default(), &SearchLimits::depth(3));
    assert!(result.best_move.is_none(), "Should return None for checkmate position");
    assert_eq!(result.score, -MATE_SCORE);
}

/// Test threefold repetition through the protocol move list
#[test]
fn handles_draw_by_repetition() {
    let mut board = Board::new();
    let parts = [
        "position", "startpos", "moves",
        "g1f3", "g8f6", "f3g1", "f6g8",
        "g1f3", "g8f6", "f3g1", "f6g8",
    ];
    parse_position_command(&mut board, &parts);
    assert!(board.is_threefold_repetition(), "Should be a draw by repetition");
}

/// Test evaluation is symmetric
#[test]
fn evaluation_symmetry() {
    let board = Board::new();
    for kind in [EvaluatorKind::Material, EvaluatorKind::Positional] {
        let eval = kind.build();
        assert_eq!(
            eval.evaluate(&board, Team::White, Team::Black),
            eval.evaluate(&board, Team::Black, Team::White),
            "{kind} is lopsided in the start position"
        );
    }
}

/// Test that positions with material advantage evaluate correctly
#[test]
fn evaluation_material_advantage() {
    let eval = PositionalEvaluator::default();
    let white_up = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let diff = eval.evaluate(&white_up, Team::White, Team::Black)
        - eval.evaluate(&white_up, Team::Black, Team::White);
    assert!(diff > 800, "White up a queen should be very positive (eval: {diff})");
}

/// Test that search completes at a moderate depth from the start position
#[test]
fn search_completes_at_depth_4() {
    use std::time::Instant;

    let mut board = Board::new();
    let start = Instant::now();
    let result = find_best_move(&mut board, &PositionalEvaluator::default(), &SearchLimits::depth(4));
    assert!(result.best_move.is_some(), "Should find a move at depth 4");
    assert!(start.elapsed().as_secs() < 120, "Search at depth 4 took too long");
}

/// Test that stalemate is correctly identified
#[test]
fn identifies_stalemate() {
    let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(board.is_stalemate(), "Position should be stalemate");
    assert!(!board.is_checkmate(), "Position should not be checkmate");
}

/// Test fifty move rule detection
#[test]
fn fifty_move_rule() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1");
    assert!(board.is_fifty_move_draw());
}
