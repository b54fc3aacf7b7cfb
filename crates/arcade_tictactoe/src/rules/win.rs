//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};

/// The 8 fixed lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Mark holding the given line, if all three squares match.
fn line_owner(board: &Board, [a, b, c]: [Position; 3]) -> Option<Mark> {
    match board.get(a) {
        Square::Occupied(mark) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
            Some(mark)
        }
        _ => None,
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first completed line in [`LINES`] order,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.into_iter().find_map(|line| line_owner(board, line))
}

/// Whether `mark` holds at least one full line.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES
        .into_iter()
        .any(|line| line_owner(board, line) == Some(mark))
}
