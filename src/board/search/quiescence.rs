use super::move_order::order_moves;
use super::SearchContext;

impl SearchContext<'_> {
    /// Captures-only search below the horizon, so a position is never scored
    /// halfway through an exchange. Standing pat is always allowed.
    pub(crate) fn quiescence(&mut self, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = self.static_eval();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = self.board.generate_captures();
        order_moves(self.board, self.evaluator, &mut captures);

        for mv in captures {
            self.board.make_move(mv);
            let score = -self.quiescence(-beta, -alpha);
            self.board.undo_move();

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
