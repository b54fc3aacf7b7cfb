//! First-class board invariants.
//!
//! Invariants are logical properties every board reached through
//! turn-enforced play satisfies. They are checked after each move in
//! debug builds and can be tested independently.

use crate::rules::has_line;
use crate::{Board, Mark};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose by type.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// X moves first, so `count(X) - count(O)` is always 0 or 1.
pub struct BalancedMarks;

impl Invariant<Board> for BalancedMarks {
    fn holds(board: &Board) -> bool {
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

/// At most one mark holds a completed line.
pub struct SingleWinner;

impl Invariant<Board> for SingleWinner {
    fn holds(board: &Board) -> bool {
        let valid = !(has_line(board, Mark::X) && has_line(board, Mark::O));
        if !valid {
            warn!(board = %board.notation(), "Both marks hold a line");
        }
        valid
    }

    fn description() -> &'static str {
        "At most one mark holds a completed line"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (BalancedMarks, SingleWinner);

/// Checks every board invariant, reporting all violations.
#[instrument(level = "debug", skip(board), fields(board = %board.notation()))]
pub fn check_invariants(board: &Board) -> Result<(), Vec<InvariantViolation>> {
    BoardInvariants::check_all(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_holds() {
        assert!(check_invariants(&Board::new()).is_ok());
    }

    #[test]
    fn test_o_ahead_violates_balance() {
        let board: Board = "OO./X../...".parse().unwrap();
        assert!(!BalancedMarks::holds(&board));
        assert!(SingleWinner::holds(&board));
    }

    #[test]
    fn test_double_winner_reports_both_violations() {
        // Three of each is balanced; only the winner check fails.
        let board: Board = "XXX/OOO/...".parse().unwrap();
        let violations = check_invariants(&board).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, SingleWinner::description());

        let board: Board = "XXX/OOO/O..".parse().unwrap();
        let violations = check_invariants(&board).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
