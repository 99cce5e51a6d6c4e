//! Legal move generation.
//!
//! Every pass first rebuilds the attack map of the side not to move. While
//! doing so it records checks against the side to move and the pins its
//! pieces are under. Each piece kind then emits only moves that respect those
//! masks, so no make/undo legality probe is needed.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::state::KingSafety;
use super::{Bitboard, Board, Move, MoveList, Piece, PieceKind, Square, Team};

/// Most pin records one pass can produce: one per ray into the king, plus
/// the en passant restriction.
const MAX_PINS: usize = 9;

/// What the attacking side's pieces found while rebuilding its attack map.
pub(crate) struct ThreatScan {
    pub(crate) attacks: Bitboard,
    pub(crate) checks: u8,
    pub(crate) check_mask: Bitboard,
    pins: [(Square, Bitboard); MAX_PINS],
    pin_count: usize,
    /// King of the side under attack
    pub(crate) target_king: Option<Square>,
}

impl ThreatScan {
    fn new(target_king: Option<Square>) -> Self {
        ThreatScan {
            attacks: Bitboard::EMPTY,
            checks: 0,
            check_mask: Bitboard::ALL,
            pins: [(Square::A1, Bitboard::ALL); MAX_PINS],
            pin_count: 0,
            target_king,
        }
    }

    /// Record one check source; `blocking` holds the squares that resolve it.
    #[inline]
    pub(crate) fn add_check(&mut self, blocking: Bitboard) {
        self.checks += 1;
        self.check_mask &= blocking;
    }

    #[inline]
    pub(crate) fn add_pin(&mut self, sq: Square, mask: Bitboard) {
        debug_assert!(self.pin_count < MAX_PINS, "too many pins");
        if self.pin_count < MAX_PINS {
            self.pins[self.pin_count] = (sq, mask);
            self.pin_count += 1;
        }
    }

    fn pins(&self) -> &[(Square, Bitboard)] {
        &self.pins[..self.pin_count]
    }
}

/// Per-pass constraints shared by every piece of the side to move.
pub(crate) struct MoveContext {
    pub(crate) team: Team,
    pub(crate) friendly: Bitboard,
    pub(crate) enemy: Bitboard,
    pub(crate) occupied: Bitboard,
    /// Enemy squares in captures-only mode, everything otherwise
    pub(crate) target_mask: Bitboard,
    pub(crate) check_mask: Bitboard,
    pub(crate) checks: u8,
    pub(crate) captures_only: bool,
}

impl MoveContext {
    /// Destinations a non-king piece may land on, before its own movement rule.
    #[inline]
    pub(crate) fn allowed_for(&self, piece: &Piece) -> Bitboard {
        !self.friendly & self.target_mask & self.check_mask & piece.pin
    }
}

type MoveFn = fn(&Board, &Piece, &MoveContext, &mut MoveList);
type AttackFn = fn(&Board, &Piece, &mut ThreatScan);

/// Movement and attack behaviour of one piece kind.
struct PieceRules {
    moves: MoveFn,
    attacks: AttackFn,
}

/// Indexed by `PieceKind::index`.
const RULES: [PieceRules; 6] = [
    PieceRules {
        moves: pawns::pawn_moves,
        attacks: pawns::pawn_attacks,
    },
    PieceRules {
        moves: knights::knight_moves,
        attacks: knights::knight_attacks,
    },
    PieceRules {
        moves: sliders::bishop_moves,
        attacks: sliders::bishop_attacks,
    },
    PieceRules {
        moves: sliders::rook_moves,
        attacks: sliders::rook_attacks,
    },
    PieceRules {
        moves: sliders::queen_moves,
        attacks: sliders::queen_attacks,
    },
    PieceRules {
        moves: kings::king_moves,
        attacks: kings::king_attacks,
    },
];

const NON_KING: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl Board {
    /// Rebuild attack, check and pin state for the side to move and return
    /// its legal moves (only captures when `captures_only`).
    pub fn update_all_pieces(&mut self, captures_only: bool) -> MoveList {
        let team = self.current;
        let opponent = team.opponent();

        self.king_safety[team.index()] = KingSafety::default();
        self.unpin_all_pinned_pieces(team);
        self.clear_attacked_squares(opponent);

        let scan = self.scan_threats(opponent);
        self.add_attacks(opponent, scan.attacks);
        self.king_safety[team.index()] = KingSafety {
            checks: scan.checks,
            check_mask: scan.check_mask,
        };
        for &(sq, mask) in scan.pins() {
            self.pin_piece(sq, mask);
        }

        let friendly = self.team_bitboard(team);
        let enemy = self.team_bitboard(opponent);
        let ctx = MoveContext {
            team,
            friendly,
            enemy,
            occupied: friendly | enemy,
            target_mask: if captures_only { enemy } else { Bitboard::ALL },
            check_mask: scan.check_mask,
            checks: scan.checks,
            captures_only,
        };

        let mut moves = MoveList::new();
        if let Some(king) = self.teams_king(team).and_then(|sq| self.squares[sq.index()]) {
            (RULES[PieceKind::King.index()].moves)(self, &king, &ctx, &mut moves);
        }

        // Double check: only the king can move.
        if scan.checks >= 2 {
            return moves;
        }

        for kind in NON_KING {
            for sq in self.piece_bitboard(kind, team) {
                if let Some(piece) = self.squares[sq.index()] {
                    (RULES[kind.index()].moves)(self, &piece, &ctx, &mut moves);
                }
            }
        }
        moves
    }

    /// All legal moves for the side to move.
    #[inline]
    pub fn generate_moves(&mut self) -> MoveList {
        self.update_all_pieces(false)
    }

    /// Legal captures (en passant and capturing promotions included).
    #[inline]
    pub fn generate_captures(&mut self) -> MoveList {
        self.update_all_pieces(true)
    }

    /// No legal moves and in check.
    pub fn is_checkmate(&mut self) -> bool {
        self.generate_moves().is_empty() && self.is_in_check()
    }

    /// No legal moves and not in check.
    pub fn is_stalemate(&mut self) -> bool {
        self.generate_moves().is_empty() && !self.is_in_check()
    }

    /// Squares `attacker` attacks right now, recomputed from the placement
    /// rather than read from the last generation pass.
    #[must_use]
    pub fn compute_attacks(&self, attacker: Team) -> Bitboard {
        self.scan_threats(attacker).attacks
    }

    fn scan_threats(&self, attacker: Team) -> ThreatScan {
        let mut scan = ThreatScan::new(self.teams_king(attacker.opponent()));
        for sq in self.team_bitboard(attacker) {
            if let Some(piece) = &self.squares[sq.index()] {
                (RULES[piece.kind.index()].attacks)(self, piece, &mut scan);
            }
        }
        scan
    }
}

/// Push one move per promotion kind when `to` is on the last rank.
pub(crate) fn push_pawn_move(moves: &mut MoveList, team: Team, from: Square, to: Square) {
    if to.rank() == team.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            if let Some(flag) = super::MoveFlag::promotion(kind) {
                moves.push(Move::new(from, to, flag));
            }
        }
    } else {
        moves.push(Move::quiet(from, to));
    }
}
