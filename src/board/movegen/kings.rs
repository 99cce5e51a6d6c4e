use super::super::attack_tables::KING_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveFlag, MoveList, Piece, PieceKind, Square};
use super::{MoveContext, ThreatScan};

/// Castling geometry on one side, as files on the back rank.
struct CastleSide {
    kingside: bool,
    rook_file: u8,
    king_to_file: u8,
    /// Files that must be empty
    empty_files: &'static [u8],
    /// Files the king crosses or lands on, which must not be attacked
    transit_files: &'static [u8],
    flag: MoveFlag,
}

const CASTLE_SIDES: [CastleSide; 2] = [
    CastleSide {
        kingside: true,
        rook_file: 7,
        king_to_file: 6,
        empty_files: &[5, 6],
        transit_files: &[5, 6],
        flag: MoveFlag::CastleKingside,
    },
    CastleSide {
        kingside: false,
        rook_file: 0,
        king_to_file: 2,
        empty_files: &[1, 2, 3],
        transit_files: &[2, 3],
        flag: MoveFlag::CastleQueenside,
    },
];

pub(super) fn king_moves(board: &Board, piece: &Piece, ctx: &MoveContext, moves: &mut MoveList) {
    let from = piece.square;
    let attacked = board.squares_attacked_by(ctx.team.opponent());
    let targets = KING_ATTACKS[from.index()] & !attacked & !ctx.friendly & ctx.target_mask;
    for to in targets {
        moves.push(Move::quiet(from, to));
    }

    if ctx.captures_only || piece.has_moved || ctx.checks > 0 {
        return;
    }
    let rank = ctx.team.back_rank();
    if from != Square::from_coords(4, rank) {
        return;
    }

    for side in &CASTLE_SIDES {
        if !board.castling_rights().has(ctx.team, side.kingside) {
            continue;
        }
        let files_mask = |files: &[u8]| {
            files
                .iter()
                .fold(Bitboard::EMPTY, |acc, &file| acc.with(Square::from_coords(file, rank)))
        };
        if ctx.occupied.intersects(files_mask(side.empty_files))
            || attacked.intersects(files_mask(side.transit_files))
        {
            continue;
        }
        let rook_ready = matches!(
            board.piece_at(Square::from_coords(side.rook_file, rank)),
            Some(rook) if rook.kind == PieceKind::Rook && rook.team == ctx.team && !rook.has_moved
        );
        if rook_ready {
            moves.push(Move::new(from, Square::from_coords(side.king_to_file, rank), side.flag));
        }
    }
}

pub(super) fn king_attacks(_board: &Board, piece: &Piece, scan: &mut ThreatScan) {
    scan.attacks |= KING_ATTACKS[piece.square.index()];
}
