//! Turn-enforcing game snapshots.
//!
//! A [`Game`] is an immutable value: playing a move returns the next
//! snapshot and leaves the current one untouched, so a delayed caller can
//! never act on a board that has since changed underneath it.

use crate::invariants::check_invariants;
use crate::rules::{apply_move, evaluate, legal_moves};
use crate::{Board, InvalidMove, Mark, Move, Outcome, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board plus move history with the derived outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
}

impl Game {
    /// Creates a new game on an empty board.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True once the outcome is terminal.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Mark due to move, `None` once the game is over.
    pub fn to_move(&self) -> Option<Mark> {
        if self.is_over() {
            None
        } else {
            Some(self.board.to_move())
        }
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_over() {
            Vec::new()
        } else {
            legal_moves(&self.board)
        }
    }

    /// Plays the side to move at `position`.
    pub fn play(&self, position: Position) -> Result<Self, InvalidMove> {
        let mark = self.to_move().ok_or(InvalidMove::GameOver(self.outcome))?;
        self.make_move(Move::new(mark, position))
    }

    /// Plays the side to move at a raw board index.
    pub fn play_index(&self, index: usize) -> Result<Self, InvalidMove> {
        let mark = self.to_move().ok_or(InvalidMove::GameOver(self.outcome))?;
        let next = apply_move(&self.board, index, mark)?;
        let position = Position::from_index(index).ok_or(InvalidMove::OutOfBounds(index))?;
        Ok(self.advance(next, Move::new(mark, position)))
    }

    /// Applies an explicit move, rejecting it if it is out of turn.
    #[instrument(level = "debug", skip(self), fields(board = %self.board.notation()))]
    pub fn make_move(&self, action: Move) -> Result<Self, InvalidMove> {
        if self.is_over() {
            return Err(InvalidMove::GameOver(self.outcome));
        }
        if action.mark != self.board.to_move() {
            return Err(InvalidMove::WrongTurn(action.mark));
        }

        let next = apply_move(&self.board, action.position.to_index(), action.mark)?;
        Ok(self.advance(next, action))
    }

    fn advance(&self, board: Board, action: Move) -> Self {
        let mut history = self.history.clone();
        history.push(action);
        let outcome = evaluate(&board);

        debug_assert!(
            check_invariants(&board).is_ok(),
            "Board invariants violated after {action}"
        );
        debug_assert_eq!(history.len(), board.marks_played());

        debug!(%action, %outcome, "Move applied");
        Self {
            board,
            history,
            outcome,
        }
    }

    /// Rebuilds a game by playing `positions` in order from empty.
    #[instrument(level = "debug")]
    pub fn replay(positions: &[Position]) -> Result<Self, InvalidMove> {
        positions
            .iter()
            .try_fold(Self::new(), |game, pos| game.play(*pos))
    }

    /// A fresh game, discarding this one.
    pub fn restart(&self) -> Self {
        Self::new()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
