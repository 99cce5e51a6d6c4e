//! Bishops, rooks and queens share one ray walk, differing only in the
//! directions they may use.

use super::super::attack_tables::{nearest_blocker, ray, ray_until_blocked, Direction};
use super::super::{Bitboard, Board, Move, MoveList, Piece, PieceKind, Square};
use super::{MoveContext, ThreatScan};

const QUEEN_DIRECTIONS: [Direction; 8] = Direction::ALL;

pub(super) fn bishop_moves(board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    slider_moves(board, piece, ctx, &Direction::DIAGONAL, moves);
}

pub(super) fn rook_moves(board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    slider_moves(board, piece, ctx, &Direction::ORTHOGONAL, moves);
}

pub(super) fn queen_moves(board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    slider_moves(board, piece, ctx, &QUEEN_DIRECTIONS, moves);
}

pub(super) fn bishop_attacks(board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    slider_attacks(board, piece, &Direction::DIAGONAL, scan);
}

pub(super) fn rook_attacks(board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    slider_attacks(board, piece, &Direction::ORTHOGONAL, scan);
}

pub(super) fn queen_attacks(board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    slider_attacks(board, piece, &QUEEN_DIRECTIONS, scan);
}

fn slider_moves(
    _board: &Board,
    piece: &Piece,
    ctx: &MoveContext,
    dirs: &[Direction],
    moves: &mut MoveList,
) {
    let from = piece.square;
    let allowed = ctx.allowed_for(piece);
    for &dir in dirs {
        for to in ray_until_blocked(from, dir, ctx.occupied) & allowed {
            moves.push(Move::quiet(from, to));
        }
    }
}

/// Squares strictly between `from` and the blocker `to` along `dir`.
#[inline]
fn between(from: Square, to: Square, dir: Direction) -> Bitboard {
    ray(from, dir) & !ray(to, dir) & !Bitboard::from_square(to)
}

/// Cast every ray of a slider, adding its attacks and reporting checks and
/// pins against the king of the other side.
fn slider_attacks(board: &Board, piece: &Piece, dirs: &[Direction], scan: &mut ThreatScan) {
    let from = piece.square;
    let origin = Bitboard::from_square(from);
    let occupied = board.all_pieces_bitboard();
    let king = scan.target_king;

    for &dir in dirs {
        let full = ray(from, dir);
        let Some(first) = nearest_blocker(dir, full & occupied) else {
            scan.attacks |= full;
            continue;
        };
        scan.attacks |= full & !ray(first, dir);

        if Some(first) == king {
            scan.add_check(between(from, first, dir) | origin);
            // The king cannot step back along the checking ray.
            scan.attacks |= ray_until_blocked(first, dir, occupied);
            continue;
        }

        let beyond = ray(first, dir) & occupied;
        let Some(second) = nearest_blocker(dir, beyond) else {
            continue;
        };

        if dir.is_horizontal() {
            restrict_en_passant(board, piece, dir, first, second, scan);
        }

        let blocker_is_friendly = board.piece_at(first).is_some_and(|p| p.team == piece.team);
        if blocker_is_friendly {
            continue;
        }
        if Some(second) == king {
            scan.add_pin(first, between(from, second, dir) | origin);
        }
    }
}

/// Two adjacent pawns on the slider's rank, one of them the en passant pawn
/// and the other an enemy pawn able to take it, with the enemy king right
/// behind: taking en passant would clear both squares and expose the king.
fn restrict_en_passant(
    board: &Board,
    slider: &Piece,
    dir: Direction,
    first: Square,
    second: Square,
    scan: &mut ThreatScan,
) {
    let Some(ep_pawn) = board.en_passant_pawn() else {
        return;
    };
    if first.file().abs_diff(second.file()) != 1 {
        return;
    }
    let occupied = board.all_pieces_bitboard();
    let third = nearest_blocker(dir, ray(second, dir) & occupied);
    if third.is_none() || third != scan.target_king {
        return;
    }

    let capturer = if first == ep_pawn {
        second
    } else if second == ep_pawn {
        first
    } else {
        return;
    };
    let ep_is_slider_side = board
        .piece_at(ep_pawn)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.team == slider.team);
    let capturer_is_enemy_pawn = board
        .piece_at(capturer)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.team != slider.team);
    if !(ep_is_slider_side && capturer_is_enemy_pawn) {
        return;
    }

    let capturing_team = slider.team.opponent();
    if let Some(target) = ep_pawn.offset(0, capturing_team.pawn_direction()) {
        scan.add_pin(capturer, !Bitboard::from_square(target));
    }
}
