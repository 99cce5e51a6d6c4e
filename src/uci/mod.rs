//! Universal Chess Interface (UCI) protocol implementation.
//!
//! A blocking, single-threaded subset: positions, fixed-depth `go`, `perft`
//! and `d`. Searches run to completion before the next command is read.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::warn;

use crate::board::{find_best_move, Board, FenError, Move, MoveParseError, SearchLimits};
use crate::evaluation::{Evaluator, EvaluatorKind};

pub mod command;
pub mod print;

use command::{parse_uci_command, UciCommand};

/// Error type for UCI position command parsing
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in the move list
    InvalidMove { move_str: String, error: MoveParseError },
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::MissingParts => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse a move in UCI format (e.g., "e2e4", "e7e8q").
///
/// Delegates to `Board::parse_move`. Returns `None` if the move is invalid.
#[must_use]
pub fn parse_uci_move(board: &mut Board, uci_string: &str) -> Option<Move> {
    board.parse_move(uci_string).ok()
}

/// Parse a UCI position command.
///
/// Supports both "position startpos" and "position fen <fen>" formats,
/// optionally followed by "moves <move1> <move2> ...". The FEN may omit its
/// two move counters. `board` is only replaced when the whole command is valid.
pub fn try_parse_position_command(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    let moves_at = parts.iter().position(|p| *p == "moves").unwrap_or(parts.len());

    let mut next = match parts.get(1) {
        Some(&"startpos") if moves_at == 2 => Board::new(),
        Some(&"fen") if moves_at > 2 => Board::try_from_fen(&parts[2..moves_at].join(" "))?,
        _ => return Err(UciError::MissingParts),
    };

    for &move_str in parts.iter().skip(moves_at + 1) {
        next.try_make_move(move_str)
            .map_err(|error| UciError::InvalidMove {
                move_str: move_str.to_string(),
                error,
            })?;
    }

    *board = next;
    Ok(())
}

/// Parse a UCI position command, logging a warning on failure.
///
/// This is a convenience wrapper around `try_parse_position_command` for
/// use in the main UCI loop where errors should be logged but not propagated.
pub fn parse_position_command(board: &mut Board, parts: &[&str]) {
    if let Err(e) = try_parse_position_command(board, parts) {
        warn!("rejected position command: {e}");
    }
}

#[must_use]
pub fn format_uci_move(mv: &Move) -> String {
    mv.to_string()
}

/// Engine state held between UCI commands.
pub struct UciSession {
    board: Board,
    evaluator: Box<dyn Evaluator>,
    limits: SearchLimits,
}

impl Default for UciSession {
    fn default() -> Self {
        Self::new(EvaluatorKind::default(), SearchLimits::default())
    }
}

impl UciSession {
    #[must_use]
    pub fn new(evaluator: EvaluatorKind, limits: SearchLimits) -> Self {
        UciSession {
            board: Board::new(),
            evaluator: evaluator.build(),
            limits,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handle one input line. Returns `Ok(false)` once `quit` is seen.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let Some(cmd) = parse_uci_command(line) else {
            return Ok(true);
        };

        match cmd {
            UciCommand::Uci => print::print_id(out)?,
            UciCommand::IsReady => print::print_ready(out)?,
            UciCommand::UciNewGame => self.board = Board::new(),
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                parse_position_command(&mut self.board, &parts);
            }
            UciCommand::Go { depth } => {
                let limits = SearchLimits {
                    depth: depth.unwrap_or(self.limits.depth).max(1),
                    ..self.limits
                };
                let result = find_best_move(&mut self.board, self.evaluator.as_ref(), &limits);
                print::print_search_info(out, limits.depth, &result)?;
                print::print_bestmove(out, result.best_move)?;
            }
            UciCommand::Perft(depth) => {
                let start = Instant::now();
                let divide = self.board.perft_divide(depth);
                let elapsed = start.elapsed();
                for (mv, nodes) in &divide {
                    writeln!(out, "{}: {}", format_uci_move(mv), nodes)?;
                }
                let nodes = divide.iter().map(|(_, n)| n).sum();
                print::print_perft_info(out, depth, nodes, elapsed)?;
            }
            UciCommand::Display => {
                writeln!(out, "{}", self.board)?;
                writeln!(out, "Fen: {}", self.board.to_fen())?;
            }
            UciCommand::Quit => return Ok(false),
            UciCommand::Unknown(text) => warn!("unknown command: {text}"),
        }
        out.flush()?;
        Ok(true)
    }
}

/// Run the protocol over arbitrary streams until `quit` or end of input.
pub fn run_uci<R: BufRead, W: Write>(input: R, mut out: W) -> io::Result<()> {
    let mut session = UciSession::default();
    for line in input.lines() {
        if !session.handle_line(&line?, &mut out)? {
            break;
        }
    }
    Ok(())
}

/// Run the protocol on stdin/stdout.
pub fn run_uci_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_uci(stdin.lock(), stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(cmd: &str) -> Vec<&str> {
        cmd.split_whitespace().collect()
    }

    #[test]
    fn startpos_with_moves() {
        let mut board = Board::new();
        try_parse_position_command(&mut board, &split("position startpos moves e2e4 e7e5 g1f3"))
            .unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn fen_without_counters() {
        let mut board = Board::new();
        try_parse_position_command(&mut board, &split("position fen 4k3/8/8/8/8/8/8/4K2R w K - moves e1g1"))
            .unwrap();
        assert!(board.piece_at(crate::board::Square::F1).is_some());
    }

    #[test]
    fn illegal_move_leaves_board_alone() {
        let mut board = Board::new();
        board.try_make_move("d2d4").unwrap();
        let before = board.to_fen();
        let err = try_parse_position_command(&mut board, &split("position startpos moves e2e4 e2e4"));
        assert!(matches!(err, Err(UciError::InvalidMove { .. })));
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn missing_position_kind() {
        let mut board = Board::new();
        assert!(matches!(
            try_parse_position_command(&mut board, &split("position")),
            Err(UciError::MissingParts)
        ));
        assert!(matches!(
            try_parse_position_command(&mut board, &split("position fen moves e2e4")),
            Err(UciError::MissingParts)
        ));
    }

    #[test]
    fn bad_fen_is_reported() {
        let mut board = Board::new();
        let err = try_parse_position_command(&mut board, &split("position fen 8/8/8 w - -"));
        assert!(matches!(err, Err(UciError::InvalidFen(_))));
    }

    #[test]
    fn perft_total_is_the_sum_of_the_divide() {
        let mut session = UciSession::default();
        let mut out = Vec::new();
        session.handle_line("perft 2", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let divided: u64 = text
            .lines()
            .filter_map(|line| line.split_once(": "))
            .map(|(_, n)| n.parse::<u64>().unwrap())
            .sum();
        assert_eq!(divided, 400);
        assert!(text.contains("perft depth 2 nodes 400 "));
        assert_eq!(text.lines().filter(|l| l.contains(": ")).count(), 20);
    }

    #[test]
    fn session_answers_go_with_bestmove() {
        let input = "position fen 6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1\ngo depth 2\nquit\nisready\n";
        let mut out = Vec::new();
        run_uci(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("score mate 1"));
        assert!(text.contains("bestmove e1e8"));
        assert!(!text.contains("readyok"));
    }
}
