//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A mark placed on the board.
///
/// `X` is always the human and moves first; `O` is the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// The human player's mark (moves first).
    X,
    /// The computer opponent's mark.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values: every accepted move produces a new
/// board rather than mutating a shared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Gets the square at a raw index, `None` when out of range.
    pub fn get_index(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Total number of marks on the board.
    pub fn marks_played(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Whether the board holds no marks at all.
    pub fn is_blank(&self) -> bool {
        self.marks_played() == 0
    }

    /// The mark due to move, derived from the mark counts.
    ///
    /// X moves when the counts are equal, O otherwise.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) == self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    ///
    /// No rule checks happen here; see [`crate::apply_move`].
    pub(crate) fn with_mark(mut self, pos: Position, mark: Mark) -> Self {
        self.squares[pos.to_index()] = Square::Occupied(mark);
        self
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Compact nine-character form, `.` for empty squares.
    pub fn notation(&self) -> String {
        self.squares
            .iter()
            .map(|s| match s {
                Square::Empty => '.',
                Square::Occupied(Mark::X) => 'X',
                Square::Occupied(Mark::O) => 'O',
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// A character that is neither a mark nor an empty marker.
    #[display("Unexpected character {:?} in board", _0)]
    UnexpectedChar(char),

    /// The text did not describe exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `XX./OO./...` style text. `/` and whitespace are ignored;
    /// `.`, `_` and `-` are empty squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c {
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                '/' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(BoardParseError::UnexpectedChar(c)),
            };
            squares.push(square);
        }

        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and at least one empty square remains.
    InProgress,
    /// X (the human) completed a line.
    PlayerWin,
    /// O (the computer) completed a line.
    OpponentWin,
    /// Board full without a line.
    Draw,
}

impl Outcome {
    /// Outcome for a completed line by `mark`.
    pub fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::X => Outcome::PlayerWin,
            Mark::O => Outcome::OpponentWin,
        }
    }

    /// Returns the winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::PlayerWin => Some(Mark::X),
            Outcome::OpponentWin => Some(Mark::O),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// True for every outcome except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::PlayerWin => write!(f, "X wins"),
            Outcome::OpponentWin => write!(f, "O wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
