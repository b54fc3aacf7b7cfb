//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They can be validated
//! independently of execution and replayed from history.

use super::{Mark, Outcome, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark placed by this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// A rejected move.
///
/// Every variant is an invalid move; the variant records why. Rejection
/// never changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The index is outside 0-8.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game already has a terminal outcome.
    #[display("Game is already over ({})", _0)]
    GameOver(Outcome),

    /// It's not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),
}

impl std::error::Error for InvalidMove {}
