//! Search module implementing fixed-depth negamax with alpha-beta pruning.
//!
//! Features:
//! - Fail-hard alpha-beta in negamax form
//! - Quiescence search over captures with stand-pat
//! - Heuristic move ordering (captures, promotions, attacked squares)
//! - Threefold repetition scored as a draw, counting the game history
//!
//! There is no time control: the depth limit is the only stopping rule.

mod constants;
mod move_order;
mod negamax;
mod quiescence;

use std::collections::HashMap;

use log::{debug, warn};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Board, Move};
use crate::evaluation::Evaluator;

pub use constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};

/// How far to search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchLimits {
    /// Full-width plies before quiescence takes over (at least 1)
    pub depth: u32,
    /// Resolve captures at the horizon; when off, leaves are scored as they stand
    pub quiescence: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth: 4,
            quiescence: true,
        }
    }
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            ..Self::default()
        }
    }
}

/// Outcome of a search from the side to move's point of view.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// The best move found, `None` only when there are no legal moves
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

impl SearchResult {
    /// Moves until mate if the score is a forced mate, negative when being mated.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        if self.score.abs() < MATE_THRESHOLD {
            return None;
        }
        let plies = MATE_SCORE - self.score.abs();
        let moves = (plies + 1) / 2;
        Some(if self.score > 0 { moves } else { -moves })
    }
}

/// State of one search call chain. Owns the board borrow for its duration.
pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) evaluator: &'a dyn Evaluator,
    pub(crate) limits: SearchLimits,
    /// Occurrences of each position key on the current game line
    pub(crate) repetitions: HashMap<u64, u32>,
    pub(crate) nodes: u64,
    pub(crate) best_root_move: Option<Move>,
}

impl<'a> SearchContext<'a> {
    fn new(board: &'a mut Board, evaluator: &'a dyn Evaluator, limits: SearchLimits) -> Self {
        let mut repetitions = HashMap::new();
        for &key in board.position_keys() {
            *repetitions.entry(key).or_insert(0) += 1;
        }
        SearchContext {
            board,
            evaluator,
            limits,
            repetitions,
            nodes: 0,
            best_root_move: None,
        }
    }

    /// Evaluation from the side to move's point of view.
    pub(crate) fn static_eval(&self) -> i32 {
        let us = self.board.side_to_move();
        let them = us.opponent();
        self.evaluator.evaluate(self.board, us, them) - self.evaluator.evaluate(self.board, them, us)
    }
}

/// Search `board` to `limits.depth` plies and pick a move for the side to move.
///
/// The board is returned to its original position before this returns.
pub fn find_best_move(board: &mut Board, evaluator: &dyn Evaluator, limits: &SearchLimits) -> SearchResult {
    let depth = limits.depth.max(1);
    let mut ctx = SearchContext::new(board, evaluator, *limits);
    let score = ctx.negamax(depth, 0, -INFINITY, INFINITY);

    let mut best_move = ctx.best_root_move;
    if best_move.is_none() {
        let moves = ctx.board.generate_moves();
        if !moves.is_empty() {
            let pick = moves[rand::thread_rng().gen_range(0..moves.len())];
            warn!("search kept no root move, playing random {pick}");
            best_move = Some(pick);
        }
    }

    debug!(
        "search depth {depth} score {score} nodes {} best {}",
        ctx.nodes,
        best_move.unwrap_or_else(Move::null)
    );

    SearchResult {
        best_move,
        score,
        nodes: ctx.nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_distance_from_score() {
        let won = SearchResult {
            best_move: None,
            score: MATE_SCORE - 1,
            nodes: 0,
        };
        assert_eq!(won.mate_in(), Some(1));
        let lost = SearchResult {
            score: -(MATE_SCORE - 2),
            ..won
        };
        assert_eq!(lost.mate_in(), Some(-1));
        let quiet = SearchResult { score: 35, ..won };
        assert_eq!(quiet.mate_in(), None);
    }
}
