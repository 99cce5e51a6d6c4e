//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation correctness
//! - `movegen.rs` - Pins, checks, castling and en passant legality
//! - `make_unmake.rs` - Make/undo move correctness
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `search.rs` - Search results on small tactical positions
//! - `proptest.rs` - Property-based tests

mod draw;
mod perft;
mod search;
