use crate::zobrist::ZOBRIST;

use super::state::GameState;
use super::{Bitboard, Board, Move, MoveFlag, Piece, PieceKind, Square, Team};

/// Rook (from, to) squares for a castle landing the king on `king_to`.
fn castle_rook_squares(king_to: Square, kingside: bool) -> (Square, Square) {
    let rank = king_to.rank();
    if kingside {
        (Square::from_coords(7, rank), Square::from_coords(5, rank))
    } else {
        (Square::from_coords(0, rank), Square::from_coords(3, rank))
    }
}

impl Board {
    /// Put `piece` on its own square, updating bitboards and hash.
    ///
    /// # Panics
    ///
    /// Panics if the square is already occupied.
    pub(crate) fn place_piece(&mut self, piece: Piece) {
        let sq = piece.square;
        if let Some(existing) = self.squares[sq.index()] {
            panic!("board invariant: {sq} already holds {existing:?}");
        }
        let bit = Bitboard::from_square(sq);
        let team = piece.team.index();
        self.pieces[team][piece.kind.index()] |= bit;
        self.teams[team] |= bit;
        if piece.kind == PieceKind::King {
            self.kings[team] = Some(sq);
        }
        self.hash ^= ZOBRIST.piece(piece.kind, piece.team, sq);
        self.squares[sq.index()] = Some(piece);
    }

    /// Lift whatever stands on `sq`, updating bitboards and hash.
    pub(crate) fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        let bit = Bitboard::from_square(sq);
        let team = piece.team.index();
        self.pieces[team][piece.kind.index()] &= !bit;
        self.teams[team] &= !bit;
        if piece.kind == PieceKind::King && self.kings[team] == Some(sq) {
            self.kings[team] = None;
        }
        self.hash ^= ZOBRIST.piece(piece.kind, piece.team, sq);
        Some(piece)
    }

    fn expect_piece(&mut self, sq: Square, mv: Move) -> Piece {
        match self.take_piece(sq) {
            Some(piece) => piece,
            None => panic!("board invariant: no piece on {sq} for move {mv}"),
        }
    }

    /// Apply `mv` for the side to move and push an undo record.
    ///
    /// `mv` must come from the generator for this exact position; the board
    /// does not re-check legality.
    ///
    /// # Panics
    ///
    /// Panics if the move's source square is empty, a castle finds no rook or
    /// an en passant capture finds no pawn.
    pub fn make_move(&mut self, mv: Move) {
        let from = mv.from();
        let to = mv.to();
        // taken before any piece is lifted; undo restores it verbatim
        let state_hash = self.hash;
        let mut piece = self.expect_piece(from, mv);
        let team = piece.team;

        let old_castling = self.castling;
        let old_en_passant = self.en_passant_pawn();
        let moved_before = piece.has_moved;

        let captured = match mv.flag() {
            MoveFlag::EnPassant => {
                let victim = Square::from_coords(to.file(), from.rank());
                Some(self.expect_piece(victim, mv))
            }
            _ => self.take_piece(to),
        };

        match mv.flag() {
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let kingside = mv.flag() == MoveFlag::CastleKingside;
                let (rook_from, rook_to) = castle_rook_squares(to, kingside);
                let mut rook = match self.take_piece(rook_from) {
                    Some(rook) if rook.kind == PieceKind::Rook && rook.team == team => rook,
                    _ => panic!("board invariant: castling {mv} without a rook on {rook_from}"),
                };
                rook.square = rook_to;
                rook.has_moved = true;
                self.place_piece(rook);
            }
            _ => {}
        }

        let promoted_pawn = mv.promotion().map(|kind| {
            let pawn = piece;
            piece.kind = kind;
            pawn
        });

        piece.square = to;
        piece.has_moved = true;
        self.place_piece(piece);

        if piece.kind == PieceKind::King {
            self.castling.remove_team(team);
        }
        self.castling.remove_corner(from);
        self.castling.remove_corner(to);

        let en_passant_pawn = (mv.flag() == MoveFlag::DoublePawnPush).then_some(to);

        let pawn_move = promoted_pawn.is_some() || piece.kind == PieceKind::Pawn;
        let state = GameState {
            mv,
            en_passant_pawn,
            captured,
            promoted_pawn,
            castling: old_castling,
            moved_before,
            hash: state_hash,
            halfmove_clock: self.halfmove_clock,
        };

        self.halfmove_clock = if pawn_move || state.captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        if team == Team::Black {
            self.fullmove_number += 1;
        }

        self.hash ^= ZOBRIST.castling(old_castling) ^ ZOBRIST.castling(self.castling);
        self.hash ^= ZOBRIST.en_passant(old_en_passant) ^ ZOBRIST.en_passant(en_passant_pawn);
        self.hash ^= ZOBRIST.side(team) ^ ZOBRIST.side(team.opponent());

        self.history.push(state);
        self.current = team.opponent();
        self.position_keys.push(self.hash);
    }

    /// Reverse the most recent `make_move`. Does nothing on a fresh board.
    pub fn undo_move(&mut self) {
        let Some(state) = self.history.pop() else {
            return;
        };
        self.position_keys.pop();

        let mv = state.mv;
        let from = mv.from();
        let to = mv.to();
        let team = self.current.opponent();

        let mut piece = self.expect_piece(to, mv);
        if let Some(pawn) = state.promoted_pawn {
            piece = pawn;
        }
        piece.square = from;
        piece.has_moved = state.moved_before;
        self.place_piece(piece);

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to, mv.flag() == MoveFlag::CastleKingside);
            let mut rook = self.expect_piece(rook_to, mv);
            rook.square = rook_from;
            rook.has_moved = false;
            self.place_piece(rook);
        }

        if let Some(captured) = state.captured {
            self.place_piece(captured);
        }

        if team == Team::Black {
            self.fullmove_number -= 1;
        }
        self.current = team;
        self.castling = state.castling;
        self.halfmove_clock = state.halfmove_clock;
        self.hash = state.hash;
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Perft split by root move, for comparing against other engines.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in moves {
            self.make_move(mv);
            counts.push((mv, self.perft(depth.saturating_sub(1))));
            self.undo_move();
        }
        counts
    }
}
