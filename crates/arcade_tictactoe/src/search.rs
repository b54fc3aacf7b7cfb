//! Minimax search with alpha-beta pruning for the computer opponent.
//!
//! The game tree is at most 9 plies deep, so the search is exhaustive and
//! runs to completion synchronously. Pruning skips branches that cannot
//! change the value chosen at the root.

use crate::rules::{check_winner, evaluate, is_full};
use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Value of a win for the searching side; a loss is the negation.
pub const WIN_SCORE: i32 = 10;

/// How leaf values are shaped by depth.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchPolicy {
    /// Wins score `10 - depth` and losses `depth - 10`: the opponent takes
    /// the fastest win and, when beaten, the slowest loss.
    #[default]
    DepthShaped,
    /// Wins score +10 and losses -10 regardless of depth.
    Flat,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, the root's children included.
    pub nodes: u64,
    /// Branches abandoned by an alpha-beta cutoff.
    pub cutoffs: u64,
}

/// A candidate move and its minimax value for the searching side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Where the mark goes.
    pub position: Position,
    /// Minimax value from the searching side's point of view.
    pub score: i32,
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Chosen move, `None` when there is nothing to play.
    pub best: Option<ScoredMove>,
    /// Work done finding it.
    pub stats: SearchStats,
}

/// Exhaustive minimax searcher.
///
/// The side to move at the root is always named by the caller rather than
/// derived from mark counts, so the searcher can be asked about any board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax {
    policy: SearchPolicy,
}

impl Minimax {
    /// Creates a searcher with the given scoring policy.
    pub fn new(policy: SearchPolicy) -> Self {
        Self { policy }
    }

    /// The scoring policy in use.
    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    /// Best move for the computer opponent (O).
    pub fn best_move(&self, board: &Board) -> Option<Position> {
        self.best_move_for(board, Mark::O)
    }

    /// Best move for `me`, who is to move on `board`.
    pub fn best_move_for(&self, board: &Board, me: Mark) -> Option<Position> {
        self.search(board, me).best.map(|m| m.position)
    }

    /// Searches `board` with `me` to move.
    ///
    /// An empty board answers the center without searching. A board that
    /// is already decided, or has no empty square, yields no move. Among
    /// equally valued moves the lowest index wins.
    #[instrument(
        level = "debug",
        skip(self, board),
        fields(board = %board.notation(), policy = %self.policy)
    )]
    pub fn search(&self, board: &Board, me: Mark) -> SearchReport {
        let mut stats = SearchStats::default();

        if evaluate(board).is_terminal() {
            debug!("Board already decided, no move");
            return SearchReport { best: None, stats };
        }

        if board.is_blank() {
            debug!("Opening move, taking the center");
            return SearchReport {
                best: Some(ScoredMove {
                    position: Position::Center,
                    score: 0,
                }),
                stats,
            };
        }

        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best: Option<ScoredMove> = None;

        for position in empty_squares(board) {
            let child = board.with_mark(position, me);
            let score = self.alphabeta(&child, me, me.opponent(), 1, alpha, beta, &mut stats);
            if best.is_none_or(|b| score > b.score) {
                best = Some(ScoredMove { position, score });
                alpha = alpha.max(score);
            }
        }

        debug!(
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            best = ?best,
            "Search complete"
        );
        SearchReport { best, stats }
    }

    /// Exact minimax value of every legal move for `me`, in index order.
    ///
    /// Each move is searched with a full window so the values can be
    /// compared directly; use [`Minimax::search`] to pick a move.
    #[instrument(level = "debug", skip(self, board), fields(board = %board.notation()))]
    pub fn score_moves(&self, board: &Board, me: Mark) -> Vec<ScoredMove> {
        if evaluate(board).is_terminal() {
            return Vec::new();
        }

        let mut stats = SearchStats::default();
        empty_squares(board)
            .map(|position| {
                let child = board.with_mark(position, me);
                let score = self.alphabeta(
                    &child,
                    me,
                    me.opponent(),
                    1,
                    i32::MIN,
                    i32::MAX,
                    &mut stats,
                );
                ScoredMove { position, score }
            })
            .collect()
    }

    /// Leaf value of `board` for `me`, `None` if play continues.
    fn terminal_score(&self, board: &Board, me: Mark, depth: i32) -> Option<i32> {
        let win = match self.policy {
            SearchPolicy::DepthShaped => WIN_SCORE - depth,
            SearchPolicy::Flat => WIN_SCORE,
        };

        match check_winner(board) {
            Some(mark) if mark == me => Some(win),
            Some(_) => Some(-win),
            None if is_full(board) => Some(0),
            None => None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        board: &Board,
        me: Mark,
        turn: Mark,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.nodes += 1;

        if let Some(score) = self.terminal_score(board, me, depth) {
            return score;
        }

        let maximizing = turn == me;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for position in empty_squares(board) {
            let child = board.with_mark(position, turn);
            let score = self.alphabeta(&child, me, turn.opponent(), depth + 1, alpha, beta, stats);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

fn empty_squares(board: &Board) -> impl Iterator<Item = Position> + '_ {
    Position::ALL
        .into_iter()
        .filter(move |pos| board.is_empty(*pos))
}
