use std::io::{self, Write};
use std::time::Duration;

use crate::board::{Move, SearchResult};

use super::format_uci_move;

pub fn print_id(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "id name bitboard_chess")?;
    writeln!(out, "id author bitboard_chess developers")?;
    writeln!(out, "uciok")
}

pub fn print_ready(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "readyok")
}

pub fn print_perft_info(out: &mut impl Write, depth: usize, nodes: u64, elapsed: Duration) -> io::Result<()> {
    writeln!(
        out,
        "info string perft depth {} nodes {} time_ms {}",
        depth,
        nodes,
        elapsed.as_millis()
    )
}

/// `info` line for a finished search; mates are reported in moves.
pub fn print_search_info(out: &mut impl Write, depth: u32, result: &SearchResult) -> io::Result<()> {
    let score = match result.mate_in() {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", result.score),
    };
    writeln!(out, "info depth {} score {} nodes {}", depth, score, result.nodes)
}

pub fn print_bestmove(out: &mut impl Write, best_move: Option<Move>) -> io::Result<()> {
    match best_move {
        Some(mv) => writeln!(out, "bestmove {}", format_uci_move(&mv)),
        None => writeln!(out, "bestmove 0000"),
    }
}
