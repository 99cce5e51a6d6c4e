use log::trace;

use super::constants::{DRAW_SCORE, MATE_SCORE, REPETITION_LIMIT};
use super::move_order::order_moves;
use super::SearchContext;

impl SearchContext<'_> {
    /// Fail-hard negamax. Scores are from the side to move's point of view
    /// and always lie within `[alpha, beta]`.
    pub(crate) fn negamax(&mut self, depth: u32, ply: u32, mut alpha: i32, beta: i32) -> i32 {
        if depth == 0 {
            return if self.limits.quiescence {
                self.quiescence(alpha, beta)
            } else {
                self.nodes += 1;
                self.static_eval().clamp(alpha, beta)
            };
        }
        self.nodes += 1;

        let mut moves = self.board.generate_moves();
        if moves.is_empty() {
            let score = if self.board.is_in_check() {
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW_SCORE
            };
            return score.clamp(alpha, beta);
        }

        order_moves(self.board, self.evaluator, &mut moves);

        for mv in moves {
            self.board.make_move(mv);
            let key = self.board.hash();
            let seen = {
                let count = self.repetitions.entry(key).or_insert(0);
                *count += 1;
                *count
            };

            let score = if seen >= REPETITION_LIMIT {
                DRAW_SCORE
            } else {
                -self.negamax(depth - 1, ply + 1, -beta, -alpha)
            };

            if let Some(count) = self.repetitions.get_mut(&key) {
                *count -= 1;
            }
            self.board.undo_move();

            if ply == 0 {
                trace!("root {mv} scored {score}");
            }

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
                if ply == 0 {
                    self.best_root_move = Some(mv);
                }
            }
        }
        alpha
    }
}
