use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use bitboard_chess::board::Board;
use bitboard_chess::uci::{parse_position_command, parse_uci_move};

fn spawn_engine() -> std::process::Child {
    Command::new(env!("CARGO_BIN_EXE_bitboard_chess"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary")
}

#[test]
fn uci_go_depth_returns_legal_move() {
    let mut child = spawn_engine();
    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let mut reader = BufReader::new(stdout);

    stdin
        .write_all(b"uci\nisready\nposition startpos moves e2e4\ngo depth 2\n")
        .unwrap();

    let mut output = String::new();
    let mut bestmove_line = None;
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).expect("read failed");
        if bytes == 0 {
            break;
        }
        output.push_str(&line);
        if line.starts_with("bestmove") {
            bestmove_line = Some(line);
            break;
        }
    }

    stdin.write_all(b"quit\n").unwrap();
    let _ = child.wait();

    assert!(output.contains("uciok"));
    assert!(output.contains("readyok"));
    assert!(output.contains("info depth 2"));

    let bestmove = bestmove_line.expect("no bestmove found");
    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {}", bestmove);
    let mv = parts[1];
    assert_ne!(mv, "0000", "engine returned null move");

    let mut board = Board::new();
    parse_position_command(&mut board, &["position", "startpos", "moves", "e2e4"]);
    assert!(parse_uci_move(&mut board, mv).is_some(), "bestmove not legal in position: {}", mv);
}

#[test]
fn uci_perft_command_outputs_nodes() {
    let mut child = spawn_engine();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"position startpos\nperft 3\nquit\n")
        .unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("perft depth 3 nodes 8902"), "{stdout}");
    assert!(stdout.contains("e2e4: 600"), "{stdout}");
}

#[test]
fn uci_display_prints_fen() {
    let mut child = spawn_engine();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"position fen 4k3/8/8/8/8/8/8/4K2R w K - 0 1\nd\nposition fen bogus\nd\nquit\n")
        .unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let fens: Vec<&str> = stdout.lines().filter(|l| l.starts_with("Fen: ")).collect();
    assert_eq!(
        fens,
        ["Fen: 4k3/8/8/8/8/8/8/4K2R w K - 0 1", "Fen: 4k3/8/8/8/8/8/8/4K2R w K - 0 1"]
    );
}
