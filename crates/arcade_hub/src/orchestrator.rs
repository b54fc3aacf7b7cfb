//! Game orchestration between players.

use crate::players::{Player, PlayerAction};
use crate::reward::{RewardError, RewardReceipt};
use crate::session::{MoveResponse, Status, TicTacToeSession};
use anyhow::Result;
use arcade_tictactoe::{InvalidMove, Mark, Move, Outcome};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Game state updated.
    StateChanged {
        /// Rendered board.
        board: String,
        /// Status line.
        status: Status,
    },
    /// The computer is thinking.
    Thinking {
        /// Who is thinking.
        player: String,
    },
    /// Move was made.
    MoveMade {
        /// Who moved.
        player: String,
        /// The move.
        action: Move,
    },
    /// Input was rejected; nothing changed.
    Rejected(InvalidMove),
    /// A reward claim finished.
    Reward(Result<RewardReceipt, RewardError>),
    /// Game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
    },
}

/// Orchestrates a tic-tac-toe session between two players.
pub struct Orchestrator {
    session: TicTacToeSession,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: TicTacToeSession,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            player_x,
            player_o,
            event_tx,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &TicTacToeSession {
        &self.session
    }

    /// Plays games until player X quits.
    ///
    /// A finished game stays on screen until player X restarts or quits.
    /// Moves typed in the meantime are rejected by the session.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            if self.run_game().await?.is_none() {
                return Ok(());
            }
            if !self.await_restart().await? {
                return Ok(());
            }
        }
    }

    /// Waits on a finished game. Returns `true` after a restart, `false`
    /// when player X quits.
    async fn await_restart(&mut self) -> Result<bool> {
        loop {
            let game = self.session.game().clone();
            match self.player_x.get_move(&game).await? {
                PlayerAction::Quit => return Ok(false),
                PlayerAction::Restart => {
                    self.session.reset();
                    return Ok(true);
                }
                PlayerAction::Place(index) => {
                    let response = self.session.handle_player_move(index).await;
                    let name = self.player_x.name().to_string();
                    self.report(name, response)?;
                }
            }
        }
    }

    /// Plays one game to the end.
    ///
    /// Returns the outcome, or `None` if a player quit.
    #[instrument(skip(self))]
    pub async fn run_game(&mut self) -> Result<Option<Outcome>> {
        info!("Starting game orchestration");

        loop {
            self.send(GameEvent::StateChanged {
                board: self.session.game().board().display(),
                status: self.session.status(),
            })?;

            let Some(mark) = self.session.game().to_move() else {
                let outcome = self.session.game().outcome();
                info!(%outcome, "Game over");
                self.send(GameEvent::GameOver { outcome })?;
                return Ok(Some(outcome));
            };

            let snapshot = self.session.game().clone();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let player_name = player.name().to_string();

            if mark == Mark::O {
                self.event_tx.send(GameEvent::Thinking {
                    player: player_name.clone(),
                })?;
            }

            debug!(player = %player_name, %mark, "Waiting for move");
            let index = match player.get_move(&snapshot).await? {
                PlayerAction::Place(index) => index,
                PlayerAction::Restart => {
                    self.session.reset();
                    continue;
                }
                PlayerAction::Quit => {
                    info!(player = %player_name, "Player quit");
                    return Ok(None);
                }
            };

            let response = match mark {
                Mark::X => self.session.handle_player_move(index).await,
                Mark::O => self.session.commit_opponent_move(&snapshot, index).await,
            };
            self.report(player_name, response)?;
        }
    }

    fn report(&self, player: String, response: MoveResponse) -> Result<()> {
        match response {
            MoveResponse::Accepted { action, reward, .. } => {
                self.send(GameEvent::MoveMade { player, action })?;
                if let Some(result) = reward {
                    self.send(GameEvent::Reward(result))?;
                }
            }
            MoveResponse::Ignored(error) => self.send(GameEvent::Rejected(error))?,
            MoveResponse::Stale => debug!("Stale move dropped"),
        }
        Ok(())
    }

    fn send(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }
}
