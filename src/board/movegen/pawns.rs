use super::super::attack_tables::{nearest_blocker, ray, Direction, PAWN_ATTACKS};
use super::super::{Bitboard, Board, Move, MoveFlag, MoveList, Piece, PieceKind, Square};
use super::{push_pawn_move, MoveContext, ThreatScan};

pub(super) fn pawn_moves(board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    let from = piece.square;
    let team = ctx.team;
    let step = team.pawn_direction();
    let legal = ctx.check_mask & piece.pin;

    if !ctx.captures_only {
        if let Some(one) = from.offset(0, step).filter(|sq| !ctx.occupied.contains(*sq)) {
            if legal.contains(one) {
                push_pawn_move(moves, team, from, one);
            }
            if from.rank() == team.pawn_start_rank() {
                if let Some(two) = one.offset(0, step).filter(|sq| !ctx.occupied.contains(*sq)) {
                    if legal.contains(two) {
                        moves.push(Move::new(from, two, MoveFlag::DoublePawnPush));
                    }
                }
            }
        }
    }

    let captures = PAWN_ATTACKS[team.index()][from.index()] & ctx.enemy & legal;
    for to in captures {
        push_pawn_move(moves, team, from, to);
    }

    if let Some(mv) = en_passant(board, piece, ctx) {
        moves.push(mv);
    }
}

fn en_passant(board: &Board, piece: &Piece, ctx: &MoveContext) -> Option<Move> {
    let from = piece.square;
    let victim = board.en_passant_pawn()?;
    if victim.rank() != from.rank() || victim.file().abs_diff(from.file()) != 1 {
        return None;
    }
    let victim_is_enemy_pawn = board
        .piece_at(victim)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.team != ctx.team);
    if !victim_is_enemy_pawn {
        return None;
    }
    let target = victim.offset(0, ctx.team.pawn_direction())?;
    if !piece.pin.contains(target) {
        return None;
    }
    // Capturing the checking pawn or blocking on the target both resolve a check.
    if !(ctx.check_mask.contains(victim) || ctx.check_mask.contains(target)) {
        return None;
    }
    if exposes_king_diagonally(board, ctx, from, victim, target) {
        return None;
    }
    Some(Move::new(from, target, MoveFlag::EnPassant))
}

/// The captured pawn may be the only piece between the king and an enemy
/// bishop or queen; removing it would then leave the king in check.
fn exposes_king_diagonally(
    board: &Board,
    ctx: &MoveContext,
    from: Square,
    victim: Square,
    target: Square,
) -> bool {
    let Some(king) = board.teams_king(ctx.team) else {
        return false;
    };
    let occupied = (ctx.occupied & !Bitboard::from_square(from) & !Bitboard::from_square(victim))
        | Bitboard::from_square(target);
    let enemy = ctx.team.opponent();
    let diagonal_sliders = board.piece_bitboard(PieceKind::Bishop, enemy)
        | board.piece_bitboard(PieceKind::Queen, enemy);
    Direction::DIAGONAL.iter().any(|&dir| {
        nearest_blocker(dir, ray(king, dir) & occupied)
            .is_some_and(|blocker| diagonal_sliders.contains(blocker))
    })
}

pub(super) fn pawn_attacks(_board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    let attacks = PAWN_ATTACKS[piece.team.index()][piece.square.index()];
    scan.attacks |= attacks;
    if let Some(king) = scan.target_king {
        if attacks.contains(king) {
            scan.add_check(Bitboard::from_square(piece.square));
        }
    }
}
