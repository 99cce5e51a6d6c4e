use std::fmt;

use super::{Bitboard, CastlingRights, Move, Piece, PieceKind, Square, Team};
use crate::zobrist::ZOBRIST;

/// Undo record pushed by `make_move` and consumed by `undo_move`.
#[derive(Clone, Debug)]
pub(crate) struct GameState {
    pub(crate) mv: Move,
    /// Pawn that became capturable en passant by this move
    pub(crate) en_passant_pawn: Option<Square>,
    pub(crate) captured: Option<Piece>,
    /// The pawn as it was before promoting
    pub(crate) promoted_pawn: Option<Piece>,
    pub(crate) castling: CastlingRights,
    pub(crate) moved_before: bool,
    pub(crate) hash: u64,
    pub(crate) halfmove_clock: u32,
}

/// Check state of one king, rebuilt by every generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct KingSafety {
    pub(crate) checks: u8,
    /// Squares a non-king move must land on to resolve the check(s)
    pub(crate) check_mask: Bitboard,
}

impl Default for KingSafety {
    fn default() -> Self {
        KingSafety {
            checks: 0,
            check_mask: Bitboard::ALL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) teams: [Bitboard; 2],
    pub(crate) attacked: [Bitboard; 2],
    pub(crate) kings: [Option<Square>; 2],
    pub(crate) king_safety: [KingSafety; 2],
    pub(crate) castling: CastlingRights,
    pub(crate) current: Team,
    pub(crate) history: Vec<GameState>,
    pub(crate) position_keys: Vec<u64>,
    /// En passant pawn of the initial position, before any move was made
    pub(crate) root_en_passant: Option<Square>,
    pub(crate) hash: u64, // Zobrist hash
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

/// Persistent part of a board, for comparing positions before and after make/undo.
///
/// Pin masks, attack maps and check state are excluded: they are rebuilt by
/// every generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub placement: Vec<Option<(PieceKind, Team, bool)>>,
    pub pieces: [[Bitboard; 6]; 2],
    pub teams: [Bitboard; 2],
    pub kings: [Option<Square>; 2],
    pub castling: CastlingRights,
    pub en_passant_pawn: Option<Square>,
    pub side_to_move: Team,
    pub hash: u64,
    pub halfmove_clock: u32,
    pub history_len: usize,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        let mut placement = Vec::with_capacity(32);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            placement.push(Piece::new(kind, Team::White, Square::from_coords(file, 0)));
            placement.push(Piece::new(PieceKind::Pawn, Team::White, Square::from_coords(file, 1)));
            placement.push(Piece::new(PieceKind::Pawn, Team::Black, Square::from_coords(file, 6)));
            placement.push(Piece::new(kind, Team::Black, Square::from_coords(file, 7)));
        }
        let mut board = Board::empty();
        board.set_board(&placement, Team::White);
        board
    }

    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            teams: [Bitboard::EMPTY; 2],
            attacked: [Bitboard::EMPTY; 2],
            kings: [None; 2],
            king_safety: [KingSafety::default(); 2],
            castling: CastlingRights::none(),
            current: Team::White,
            history: Vec::new(),
            position_keys: vec![0],
            root_en_passant: None,
            hash: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Replace the whole position with `placement`, `starting_team` to move.
    ///
    /// Castling rights are granted wherever an unmoved king stands on its
    /// home square next to an unmoved rook in the matching corner. History
    /// and counters are reset.
    ///
    /// # Panics
    ///
    /// Panics if a team has two kings or two pieces share a square.
    pub fn set_board(&mut self, placement: &[Piece], starting_team: Team) {
        *self = Board::empty();
        for piece in placement {
            if piece.kind == PieceKind::King && self.kings[piece.team.index()].is_some() {
                panic!("board invariant: {} has two kings", piece.team);
            }
            let mut piece = *piece;
            piece.pin = Bitboard::ALL;
            self.place_piece(piece);
        }
        self.current = starting_team;
        self.castling = self.derive_castling_rights();
        self.refresh_hash();
    }

    fn derive_castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for team in Team::ALL {
            let rank = team.back_rank();
            let home = Square::from_coords(4, rank);
            let king_ready = matches!(
                self.squares[home.index()],
                Some(p) if p.kind == PieceKind::King && p.team == team && !p.has_moved
            );
            if !king_ready {
                continue;
            }
            for (file, kingside) in [(7, true), (0, false)] {
                let corner = Square::from_coords(file, rank);
                let rook_ready = matches!(
                    self.squares[corner.index()],
                    Some(p) if p.kind == PieceKind::Rook && p.team == team && !p.has_moved
                );
                if rook_ready {
                    rights.set(team, kingside);
                }
            }
        }
        rights
    }

    /// Recompute the hash from scratch and restart the position-key history.
    pub(crate) fn refresh_hash(&mut self) {
        self.hash = self.compute_hash();
        self.position_keys.clear();
        self.position_keys.push(self.hash);
    }

    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for piece in self.squares.iter().flatten() {
            hash ^= ZOBRIST.piece(piece.kind, piece.team, piece.square);
        }
        hash ^= ZOBRIST.side(self.current);
        hash ^= ZOBRIST.castling(self.castling);
        hash ^= ZOBRIST.en_passant(self.en_passant_pawn());
        hash
    }

    #[inline]
    pub fn piece_bitboard(&self, kind: PieceKind, team: Team) -> Bitboard {
        self.pieces[team.index()][kind.index()]
    }

    #[inline]
    pub fn team_bitboard(&self, team: Team) -> Bitboard {
        self.teams[team.index()]
    }

    #[inline]
    pub fn all_pieces_bitboard(&self) -> Bitboard {
        self.teams[0] | self.teams[1]
    }

    #[inline]
    pub fn teams_king(&self, team: Team) -> Option<Square> {
        self.kings[team.index()]
    }

    /// Squares `team` attacked as of the last generation pass in which it was
    /// the side not to move.
    #[inline]
    pub fn squares_attacked_by(&self, team: Team) -> Bitboard {
        self.attacked[team.index()]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    #[inline]
    pub fn side_to_move(&self) -> Team {
        self.current
    }

    #[inline]
    pub fn opposing_team(&self) -> Team {
        self.current.opponent()
    }

    /// Pawn that may be captured en passant right now.
    pub fn en_passant_pawn(&self) -> Option<Square> {
        self.history
            .last()
            .map_or(self.root_en_passant, |state| state.en_passant_pawn)
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves made on this board since it was set up.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Keys of every position reached so far, oldest first, current last.
    #[inline]
    pub fn position_keys(&self) -> &[u64] {
        &self.position_keys
    }

    /// Whether the side to move was in check at the last generation pass.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.king_safety[self.current.index()].checks > 0
    }

    #[inline]
    pub fn check_count(&self, team: Team) -> u8 {
        self.king_safety[team.index()].checks
    }

    /// Fold `attacks` into the attacked-square set of `team`.
    #[inline]
    pub fn add_attacks(&mut self, team: Team, attacks: Bitboard) {
        self.attacked[team.index()] |= attacks;
    }

    #[inline]
    pub fn clear_attacked_squares(&mut self, team: Team) {
        self.attacked[team.index()] = Bitboard::EMPTY;
    }

    /// Restrict the piece on `sq` to `mask`. Masks from several pins intersect.
    ///
    /// # Panics
    ///
    /// Panics if `sq` is empty.
    pub fn pin_piece(&mut self, sq: Square, mask: Bitboard) {
        match self.squares[sq.index()].as_mut() {
            Some(piece) => piece.pin &= mask,
            None => panic!("board invariant: pinning empty square {sq}"),
        }
    }

    pub fn unpin_all_pinned_pieces(&mut self, team: Team) {
        for sq in self.teams[team.index()] {
            if let Some(piece) = self.squares[sq.index()].as_mut() {
                piece.pin = Bitboard::ALL;
            }
        }
    }

    /// Threefold repetition of the current position.
    pub fn is_threefold_repetition(&self) -> bool {
        self.position_keys
            .iter()
            .filter(|&&key| key == self.hash)
            .count()
            >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side has mating material.
    pub fn is_insufficient_material(&self) -> bool {
        let both = |kind: PieceKind| self.pieces[0][kind.index()] | self.pieces[1][kind.index()];

        let heavy = both(PieceKind::Pawn) | both(PieceKind::Rook) | both(PieceKind::Queen);
        if !heavy.is_empty() {
            return false;
        }

        let knights = both(PieceKind::Knight);
        let bishops = both(PieceKind::Bishop);
        let total_minors = knights.popcount() + bishops.popcount();

        if total_minors <= 1 {
            return true;
        }

        knights.is_empty() && bishops_all_same_color(bishops)
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            placement: self
                .squares
                .iter()
                .map(|slot| slot.map(|p| (p.kind, p.team, p.has_moved)))
                .collect(),
            pieces: self.pieces,
            teams: self.teams,
            kings: self.kings,
            castling: self.castling,
            en_passant_pawn: self.en_passant_pawn(),
            side_to_move: self.current,
            hash: self.hash,
            halfmove_clock: self.halfmove_clock,
            history_len: self.history.len(),
        }
    }

    /// Check that placement, bitboards and hash agree with each other.
    ///
    /// Used by tests and debug assertions; returns a description of the first
    /// mismatch found.
    pub fn validate(&self) -> Result<(), String> {
        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        for (idx, slot) in self.squares.iter().enumerate() {
            if let Some(piece) = slot {
                if piece.square.index() != idx {
                    return Err(format!("piece on {} thinks it is on {}", Square::from_index(idx), piece.square));
                }
                pieces[piece.team.index()][piece.kind.index()] |= Bitboard::from_square(piece.square);
            }
        }
        if pieces != self.pieces {
            return Err("kind bitboards disagree with placement".to_string());
        }
        for team in Team::ALL {
            let union = self.pieces[team.index()]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
            if union != self.teams[team.index()] {
                return Err(format!("{team} bitboard is not the union of its kinds"));
            }
            let king = self.piece_bitboard(PieceKind::King, team).lsb();
            if king != self.kings[team.index()] {
                return Err(format!("{team} king reference is stale"));
            }
        }
        if self.teams[0].intersects(self.teams[1]) {
            return Err("team bitboards overlap".to_string());
        }
        if self.hash != self.compute_hash() {
            return Err("incremental hash drifted".to_string());
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// ASCII diagram, rank 8 on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = self.squares[Square::from_coords(file, rank).index()]
                    .map_or('.', |p| p.to_char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.current)
    }
}

fn bishops_all_same_color(bishops: Bitboard) -> bool {
    !bishops.intersects(Bitboard::LIGHT_SQUARES) || !bishops.intersects(Bitboard::DARK_SQUARES)
}
