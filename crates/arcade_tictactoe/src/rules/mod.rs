//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the search, the game
//! snapshot and the invariants can all share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, has_line};

use crate::{Board, InvalidMove, Mark, Outcome, Position};
use tracing::{instrument, trace};

/// Classifies a board: a completed line wins, a full board draws.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::win_for(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// All empty positions in index order; empty when the board is full.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}

/// Places `mark` at `index`, returning the new board.
///
/// Fails if the index is out of range, the square is occupied, or the
/// board already has a terminal outcome. Turn order is not checked here;
/// [`crate::Game`] enforces it.
#[instrument(level = "debug", skip(board), fields(board = %board.notation()))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, InvalidMove> {
    let outcome = evaluate(board);
    if outcome.is_terminal() {
        return Err(InvalidMove::GameOver(outcome));
    }

    let pos = Position::from_index(index).ok_or(InvalidMove::OutOfBounds(index))?;
    if !board.is_empty(pos) {
        return Err(InvalidMove::SquareOccupied(pos));
    }

    trace!(%pos, %mark, "Placing mark");
    Ok(board.with_mark(pos, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_places_mark() {
        let board = Board::new();
        let next = apply_move(&board, 4, Mark::X).unwrap();
        assert!(next.is_empty(Position::TopLeft));
        assert!(!next.is_empty(Position::Center));
        // The original snapshot is untouched.
        assert!(board.is_blank());
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        assert_eq!(
            apply_move(&Board::new(), 9, Mark::X),
            Err(InvalidMove::OutOfBounds(9))
        );
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let board: Board = "X........".parse().unwrap();
        assert_eq!(
            apply_move(&board, 0, Mark::O),
            Err(InvalidMove::SquareOccupied(Position::TopLeft))
        );
    }

    #[test]
    fn test_apply_move_rejects_after_win() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(
            apply_move(&board, 5, Mark::O),
            Err(InvalidMove::GameOver(Outcome::PlayerWin))
        );
    }

    #[test]
    fn test_evaluate_classifies() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
        assert_eq!(
            evaluate(&"OOO/XX./X..".parse().unwrap()),
            Outcome::OpponentWin
        );
        assert_eq!(evaluate(&"XOX/OXX/OXO".parse().unwrap()), Outcome::Draw);
    }

    #[test]
    fn test_legal_moves_full_board_is_empty() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert!(legal_moves(&board).is_empty());
    }
}
