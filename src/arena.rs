//! Engine-versus-engine matches.
//!
//! Each game owns its board, so games run on worker threads with nothing
//! shared but a game counter and the running summary.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{debug, info};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{find_best_move, Board, Move, SearchLimits, Team};
use crate::evaluation::EvaluatorKind;

/// One side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    pub depth: u32,
    pub evaluator: EvaluatorKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: SearchLimits::default().depth,
            evaluator: EvaluatorKind::default(),
        }
    }
}

impl EngineConfig {
    fn limits(&self) -> SearchLimits {
        SearchLimits::depth(self.depth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchConfig {
    pub games: usize,
    /// Worker threads; at least one is used
    pub threads: usize,
    /// Games still running after this many plies are drawn
    pub max_plies: usize,
    /// Random legal moves played before the engines take over
    pub opening_plies: usize,
    /// Seed for the random openings; game `i` uses `seed + i`
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            games: 2,
            threads: thread::available_parallelism().map_or(1, |n| n.get()),
            max_plies: 300,
            opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    Checkmate { winner: Team },
    Stalemate,
    Repetition,
    FiftyMoves,
    InsufficientMaterial,
    PlyLimit,
}

impl GameOutcome {
    #[must_use]
    pub fn winner(self) -> Option<Team> {
        match self {
            GameOutcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
}

/// Totals from engine A's point of view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchSummary {
    pub games: usize,
    pub engine_a_wins: usize,
    pub engine_b_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    fn record(&mut self, a_played: Team, outcome: GameOutcome) {
        self.games += 1;
        match outcome.winner() {
            Some(winner) if winner == a_played => self.engine_a_wins += 1,
            Some(_) => self.engine_b_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Engine A's points, a draw counting half.
    #[must_use]
    pub fn score_a(&self) -> f64 {
        self.engine_a_wins as f64 + self.draws as f64 / 2.0
    }
}

/// Why the game is over in the current position, if it is.
fn adjudicate(board: &mut Board) -> Option<GameOutcome> {
    if board.generate_moves().is_empty() {
        return Some(if board.is_in_check() {
            GameOutcome::Checkmate {
                winner: board.opposing_team(),
            }
        } else {
            GameOutcome::Stalemate
        });
    }
    if board.is_threefold_repetition() {
        return Some(GameOutcome::Repetition);
    }
    if board.is_fifty_move_draw() {
        return Some(GameOutcome::FiftyMoves);
    }
    if board.is_insufficient_material() {
        return Some(GameOutcome::InsufficientMaterial);
    }
    None
}

/// Play `board` out between two engines.
pub fn play_game(white: &EngineConfig, black: &EngineConfig, mut board: Board, max_plies: usize) -> GameRecord {
    let white_eval = white.evaluator.build();
    let black_eval = black.evaluator.build();
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = adjudicate(&mut board) {
            return GameRecord { moves, outcome };
        }
        if moves.len() >= max_plies {
            return GameRecord {
                moves,
                outcome: GameOutcome::PlyLimit,
            };
        }

        let (engine, evaluator) = match board.side_to_move() {
            Team::White => (white, white_eval.as_ref()),
            Team::Black => (black, black_eval.as_ref()),
        };
        let result = find_best_move(&mut board, evaluator, &engine.limits());
        let Some(mv) = result.best_move else {
            // adjudicate() saw legal moves, so the search always returns one
            unreachable!("board invariant: search found no move in a live position");
        };
        board.make_move(mv);
        moves.push(mv);
    }
}

/// Start position with `plies` random legal moves applied.
fn random_opening(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    for _ in 0..plies {
        let moves = board.generate_moves();
        match moves.as_slice().choose(&mut rng) {
            Some(&mv) => board.make_move(mv),
            None => break,
        }
    }
    board
}

/// Play `config.games` games between `a` and `b`, alternating colours,
/// engine A taking White in even-numbered games.
pub fn run_match(a: &EngineConfig, b: &EngineConfig, config: &MatchConfig) -> io::Result<MatchSummary> {
    let next_game = AtomicUsize::new(0);
    let summary = Mutex::new(MatchSummary::default());

    thread::scope(|scope| -> io::Result<()> {
        for worker_id in 0..config.threads.max(1) {
            let next_game = &next_game;
            let summary = &summary;
            thread::Builder::new()
                .name(format!("arena-{worker_id}"))
                .spawn_scoped(scope, move || loop {
                    let game = next_game.fetch_add(1, Ordering::Relaxed);
                    if game >= config.games {
                        break;
                    }
                    let a_played = if game % 2 == 0 { Team::White } else { Team::Black };
                    let (white, black) = match a_played {
                        Team::White => (a, b),
                        Team::Black => (b, a),
                    };
                    let start = random_opening(config.seed.wrapping_add(game as u64), config.opening_plies);
                    let record = play_game(white, black, start, config.max_plies);
                    info!(
                        "game {game}: engine A as {a_played}, {:?} after {} plies",
                        record.outcome,
                        record.moves.len()
                    );
                    summary.lock().record(a_played, record.outcome);
                })?;
        }
        Ok(())
    })?;

    let summary = summary.into_inner();
    debug!("match finished: {summary:?}");
    Ok(summary)
}
