//! Draw detection tests.

use crate::board::{find_best_move, Board, SearchLimits};
use crate::evaluation::MaterialEvaluator;
use crate::uci::parse_uci_move;

fn apply_uci(board: &mut Board, uci: &str) {
    let mv = parse_uci_move(board, uci).expect("uci move not legal");
    board.make_move(mv);
}

#[test]
fn test_fen_halfmove_parsing() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 57 1");
    assert_eq!(board.halfmove_clock(), 57);
}

#[test]
fn test_fifty_move_rule_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1");
    assert!(board.is_fifty_move_draw());
}

#[test]
fn test_halfmove_resets_on_pawn_move() {
    let mut board = Board::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 99 1");
    apply_uci(&mut board, "e2e4");
    assert_eq!(board.halfmove_clock(), 0);
    assert!(!board.is_fifty_move_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut board = Board::new();
    for _ in 0..2 {
        apply_uci(&mut board, "g1f3");
        apply_uci(&mut board, "g8f6");
        apply_uci(&mut board, "f3g1");
        apply_uci(&mut board, "f6g8");
    }
    assert!(board.is_threefold_repetition());
    board.undo_move();
    assert!(!board.is_threefold_repetition());
}

#[test]
fn test_threefold_repetition_survives_searches_between_moves() {
    let mut board = Board::new();
    let start = board.hash();
    let limits = SearchLimits::depth(1);
    for _ in 0..2 {
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            find_best_move(&mut board, &MaterialEvaluator::default(), &limits);
            assert_eq!(board.hash(), board.compute_hash());
            apply_uci(&mut board, uci);
        }
    }
    assert_eq!(board.hash(), start);
    assert!(board.is_threefold_repetition());
}

#[test]
fn test_repetition_needs_same_castling_rights() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let start = board.hash();
    apply_uci(&mut board, "e1f1");
    apply_uci(&mut board, "e8f8");
    apply_uci(&mut board, "f1e1");
    apply_uci(&mut board, "f8e8");
    assert_ne!(board.hash(), start);
}

#[test]
fn test_insufficient_material() {
    let cases = [
        ("8/8/8/8/8/8/8/K1k5 w - - 0 1", true),
        ("8/8/8/8/8/8/8/KNk5 w - - 0 1", true),
        ("8/8/8/8/8/8/8/KBk5 w - - 0 1", true),
        ("8/8/8/8/8/2b5/8/KB1k4 w - - 0 1", false),
        ("8/8/8/8/8/3b4/8/KB1k4 w - - 0 1", true),
        ("8/8/8/8/8/8/8/KNNk4 w - - 0 1", false),
        ("8/8/8/8/8/8/P7/K1k5 w - - 0 1", false),
        ("8/8/8/8/8/8/8/KR1k4 w - - 0 1", false),
    ];
    for (fen, expected) in cases {
        assert_eq!(Board::from_fen(fen).is_insufficient_material(), expected, "{fen}");
    }
}
