//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Score of being checkmated at the root; a mate `ply` moves deep scores
/// `-(MATE_SCORE - ply)` for the mated side.
pub const MATE_SCORE: i32 = 1_000_000;

/// Scores with absolute value >= this are considered checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Initial alpha-beta window bound, outside every reachable score
pub const INFINITY: i32 = 99_999_999;

pub const DRAW_SCORE: i32 = 0;

/// Occurrences of one position that end the game as a draw
pub const REPETITION_LIMIT: u32 = 3;

// ============================================================================
// MOVE ORDERING
// ============================================================================
// Bonuses dwarf material differences, so each class is tried as a block.

const ORDER_UNIT: i32 = 1_000_000;

/// Capture onto an undefended square, or a defended one that still wins material
pub const WINNING_CAPTURE_BONUS: i32 = 8 * ORDER_UNIT;

/// Capture that can be answered by an even or favourable recapture
pub const LOSING_CAPTURE_BONUS: i32 = 2 * ORDER_UNIT;

pub const PROMOTION_BONUS: i32 = 6 * ORDER_UNIT;

/// Quiet move onto a square an enemy pawn attacks
pub const PAWN_ATTACKED_PENALTY: i32 = 50;

/// Quiet move onto a square any other enemy piece attacks
pub const PIECE_ATTACKED_PENALTY: i32 = 25;
