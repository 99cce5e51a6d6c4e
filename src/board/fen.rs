use super::error::{FenError, MoveParseError};
use super::{
    file_to_index, rank_to_index, Board, CastlingRights, Move, Piece, PieceKind, Square, Team,
};

/// Whether a piece found in a FEN placement can still be on its starting square.
fn looks_unmoved(kind: PieceKind, team: Team, sq: Square) -> bool {
    let back = team.back_rank();
    match kind {
        PieceKind::Pawn => sq.rank() == team.pawn_start_rank(),
        PieceKind::King => sq == Square::from_coords(4, back),
        PieceKind::Rook => sq == Square::from_coords(0, back) || sq == Square::from_coords(7, back),
        _ => true,
    }
}

fn parse_placement(field: &str) -> Result<Vec<Piece>, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut placement = Vec::with_capacity(32);
    let mut king_counts = [0u32; 2];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let team = if c.is_ascii_uppercase() {
                Team::White
            } else {
                Team::Black
            };
            if file >= 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank as usize + 1,
                    files: file + 1,
                });
            }
            let sq = Square::from_coords(file as u8, rank);
            let mut piece = Piece::new(kind, team, sq);
            piece.has_moved = !looks_unmoved(kind, team, sq);
            if kind == PieceKind::King {
                king_counts[team.index()] += 1;
            }
            placement.push(piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankWidth {
                rank: rank as usize + 1,
                files: file,
            });
        }
    }

    for team in Team::ALL {
        let found = king_counts[team.index()];
        if found != 1 {
            return Err(FenError::KingCount { team, found });
        }
    }
    Ok(placement)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Team::White, true),
            'Q' => rights.set(Team::White, false),
            'k' => rights.set(Team::Black, true),
            'q' => rights.set(Team::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_counter(field: Option<&&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
            found: (*s).to_string(),
        }),
    }
}

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The half-move and full-move counters are optional. Castling rights
    /// that the placement cannot support (king or rook missing) are dropped.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let placement = parse_placement(parts[0])?;
        let side = match parts[1] {
            "w" => Team::White,
            "b" => Team::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };
        let rights = parse_castling(parts[2])?;
        let halfmove_clock = parse_counter(parts.get(4), 0)?;
        let fullmove_number = parse_counter(parts.get(5), 1)?.max(1);

        let mut board = Board::empty();
        board.set_board(&placement, side);
        board.castling = CastlingRights::from_u8(rights.as_u8() & board.castling.as_u8());

        if parts[3] != "-" {
            let bad_square = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let target: Square = parts[3].parse().map_err(|_| bad_square())?;
            let mover = side.opponent();
            let capture_rank = mover.pawn_start_rank() as i8 + mover.pawn_direction();
            if target.rank() as i8 != capture_rank {
                return Err(bad_square());
            }
            let pawn = target
                .offset(0, -side.pawn_direction())
                .ok_or_else(bad_square)?;
            let pawn_present = matches!(
                board.piece_at(pawn),
                Some(p) if p.kind == PieceKind::Pawn && p.team == side.opponent()
            );
            if !pawn_present {
                return Err(bad_square());
            }
            board.root_en_passant = Some(pawn);
        }

        board.halfmove_clock = halfmove_clock;
        board.fullmove_number = fullmove_number;
        board.refresh_hash();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(e) => panic!("Invalid FEN string: {e}"),
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.current {
            Team::White => "w",
            Team::Black => "b",
        };
        let ep = self
            .en_passant_pawn()
            .and_then(|pawn| pawn.offset(0, self.current.pawn_direction()))
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why
    /// parsing failed. The position itself is not changed.
    ///
    /// # Example
    /// ```
    /// use bitboard_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let square_at = |file: char, rank: char| {
            Some(Square::from_coords(file_to_index(file)?, rank_to_index(rank)?))
        };
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from = square_at(chars[0], chars[1]).ok_or_else(invalid_square)?;
        let to = square_at(chars[2], chars[3]).ok_or_else(invalid_square)?;

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match PieceKind::from_char(c) {
                Some(kind) if !matches!(kind, PieceKind::Pawn | PieceKind::King) => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse and play a UCI move; the board is untouched on error.
    pub fn try_make_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }
}
