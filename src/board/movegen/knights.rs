use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveList, Piece};
use super::{MoveContext, ThreatScan};

pub(super) fn knight_moves(_board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    let from = piece.square;
    let targets = KNIGHT_ATTACKS[from.index()] & ctx.allowed_for(piece);
    for to in targets {
        moves.push(Move::quiet(from, to));
    }
}

pub(super) fn knight_attacks(_board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    let attacks = KNIGHT_ATTACKS[piece.square.index()];
    scan.attacks |= attacks;
    if let Some(king) = scan.target_king {
        if attacks.contains(king) {
            scan.add_check(Bitboard::from_square(piece.square));
        }
    }
}
