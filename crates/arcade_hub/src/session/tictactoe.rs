//! Tic-tac-toe session: human (X) against the minimax opponent (O).

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_tictactoe::{Game, InvalidMove, Mark, Minimax, Move, Outcome, Position};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the human.
    PlayerTurn,
    /// Waiting for the computer.
    OpponentTurn,
    /// Game over.
    Finished(Outcome),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::PlayerTurn => write!(f, "Next player: You (X)"),
            Status::OpponentTurn => write!(f, "Next player: Computer (O)"),
            Status::Finished(Outcome::PlayerWin) => write!(f, "Winner: You!"),
            Status::Finished(Outcome::OpponentWin) => write!(f, "Winner: Computer!"),
            Status::Finished(Outcome::Draw) => write!(f, "It's a Draw!"),
            Status::Finished(Outcome::InProgress) => write!(f, "Game in progress"),
        }
    }
}

/// Response to a submitted move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResponse {
    /// The move was applied.
    Accepted {
        /// The move that was played.
        action: Move,
        /// Outcome after the move.
        outcome: Outcome,
        /// Reward claim made by this move, if it won the game for X.
        reward: RewardOutcome,
    },
    /// The move was rejected; nothing changed.
    Ignored(InvalidMove),
    /// The move was planned against a game that has since changed.
    Stale,
}

/// A tic-tac-toe game against the computer.
pub struct TicTacToeSession {
    game: Game,
    engine: Minimax,
    notifier: Arc<dyn RewardNotifier>,
    rewarded: bool,
}

impl TicTacToeSession {
    /// Creates a session with a fresh game.
    pub fn new(engine: Minimax, notifier: Arc<dyn RewardNotifier>) -> Self {
        info!(policy = %engine.policy(), "Creating tic-tac-toe session");
        Self {
            game: Game::new(),
            engine,
            notifier,
            rewarded: false,
        }
    }

    /// Current game snapshot.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The opponent's search engine.
    pub fn engine(&self) -> Minimax {
        self.engine
    }

    /// Status projection for display.
    pub fn status(&self) -> Status {
        match self.game.to_move() {
            Some(Mark::X) => Status::PlayerTurn,
            Some(Mark::O) => Status::OpponentTurn,
            None => Status::Finished(self.game.outcome()),
        }
    }

    /// Human move at `index` (0-8).
    ///
    /// Ignored when it is not the human's turn, the square is occupied or
    /// out of range, or the game is over.
    #[instrument(skip(self), fields(board = %self.game.board().notation()))]
    pub async fn handle_player_move(&mut self, index: usize) -> MoveResponse {
        if self.game.to_move() == Some(Mark::O) {
            warn!("Player tried to move out of turn");
            return MoveResponse::Ignored(InvalidMove::WrongTurn(Mark::X));
        }
        self.apply(index).await
    }

    /// Computes the opponent's reply for the current snapshot.
    ///
    /// Pure: the session is not changed.
    pub fn plan_opponent_move(&self) -> Option<Position> {
        if self.game.to_move() != Some(Mark::O) {
            return None;
        }
        self.engine.best_move(self.game.board())
    }

    /// Commits an opponent move planned against `snapshot`.
    ///
    /// Rejected as [`MoveResponse::Stale`] if the game has changed since
    /// the snapshot was taken (for example after a restart).
    #[instrument(skip(self, snapshot), fields(board = %self.game.board().notation()))]
    pub async fn commit_opponent_move(&mut self, snapshot: &Game, index: usize) -> MoveResponse {
        if *snapshot != self.game {
            debug!("Snapshot no longer current, dropping opponent move");
            return MoveResponse::Stale;
        }
        if self.game.to_move() == Some(Mark::X) {
            warn!("Opponent tried to move out of turn");
            return MoveResponse::Ignored(InvalidMove::WrongTurn(Mark::O));
        }
        self.apply(index).await
    }

    async fn apply(&mut self, index: usize) -> MoveResponse {
        let action = match (self.game.to_move(), Position::from_index(index)) {
            (Some(mark), Some(position)) => Move::new(mark, position),
            (None, _) => return ignore(index, InvalidMove::GameOver(self.game.outcome())),
            (_, None) => return ignore(index, InvalidMove::OutOfBounds(index)),
        };

        let next = match self.game.make_move(action) {
            Ok(next) => next,
            Err(e) => return ignore(index, e),
        };
        let outcome = next.outcome();
        self.game = next;
        debug!(%action, %outcome, "Move accepted");

        let reward = if outcome == Outcome::PlayerWin && !self.rewarded {
            self.rewarded = true;
            Some(claim_reward(self.notifier.as_ref(), GameKind::TicTacToe).await)
        } else {
            None
        };

        MoveResponse::Accepted {
            action,
            outcome,
            reward,
        }
    }

    /// Discards the current game and starts a fresh one.
    pub fn reset(&mut self) {
        info!("Restarting tic-tac-toe");
        self.game = self.game.restart();
        self.rewarded = false;
    }
}

fn ignore(index: usize, error: InvalidMove) -> MoveResponse {
    warn!(index, %error, "Invalid move ignored");
    MoveResponse::Ignored(error)
}
