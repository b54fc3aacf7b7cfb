//! Pure tic-tac-toe rules with a minimax computer opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Square`], [`Outcome`], [`Position`]
//! - **Rules**: [`evaluate`], [`apply_move`], [`legal_moves`]
//! - **Game**: turn-enforcing immutable snapshots ([`Game`])
//! - **Search**: exhaustive minimax with alpha-beta pruning ([`Minimax`])
//!
//! # Example
//!
//! ```
//! use arcade_tictactoe::{Board, Minimax, Position};
//!
//! let board: Board = "XX./OO./...".parse().unwrap();
//! assert_eq!(Minimax::default().best_move(&board), Some(Position::MiddleRight));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
mod search;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{InvalidMove, Move};
pub use game::Game;
pub use invariants::{InvariantViolation, check_invariants};
pub use position::Position;
pub use rules::{apply_move, evaluate, legal_moves};
pub use search::{Minimax, ScoredMove, SearchPolicy, SearchReport, SearchStats, WIN_SCORE};
pub use types::{Board, BoardParseError, Mark, Outcome, Square};
