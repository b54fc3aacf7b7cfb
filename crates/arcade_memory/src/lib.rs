//! Pure memory-match rules.
//!
//! Sixteen face-down cards hold eight pairs of icons. The player turns
//! two cards per move; a pair stays face up, a mismatch turns back over.
//! The game is won when every pair is matched.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;

pub use board::{
    CARD_COUNT, Card, CardState, FlipOutcome, ICONS, Icon, MemoryBoard, MemoryError, PAIRS,
};
