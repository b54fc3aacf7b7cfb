//! Arcade - terminal mini-game hub.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use arcade_hub::players::{MinimaxPlayer, ThinkDelay};
use arcade_hub::terminal::{self, render_event};
use arcade_hub::{AiConfig, HubConfig, Orchestrator, TicTacToeSession, TracingNotifier};
use arcade_tictactoe::{Board, Mark, Minimax, SearchPolicy, check_invariants};
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HubConfig::load(&cli.config)?;

    match cli.command {
        Command::Play { game } => terminal::play(game, &config).await,
        Command::Hint { board, mark } => run_hint(&config, &board, mark.into()),
        Command::SelfPlay { policy } => run_self_play(config, policy.map(Into::into)).await,
    }
}

/// Print the value of every move and the move the computer would make.
#[instrument(skip(config))]
fn run_hint(config: &HubConfig, board: &str, mark: Mark) -> Result<()> {
    let board: Board = board.parse()?;
    if let Err(violations) = check_invariants(&board) {
        for v in &violations {
            warn!(violation = %v.description, "Board is not reachable in a real game");
        }
    }

    let engine = Minimax::new(*config.ai().policy());
    println!("{}\n", board.display());

    let scored = engine.score_moves(&board, mark);
    if scored.is_empty() {
        println!("No moves: {}", arcade_tictactoe::evaluate(&board));
        return Ok(());
    }
    for candidate in &scored {
        println!(
            "{} ({}): {}",
            candidate.position.label(),
            candidate.position.to_index() + 1,
            candidate.score
        );
    }

    let report = engine.search(&board, mark);
    if let Some(best) = report.best {
        println!(
            "\n{} plays {} ({} positions searched, {} cutoffs)",
            mark,
            best.position.label(),
            report.stats.nodes,
            report.stats.cutoffs
        );
    }
    Ok(())
}

/// Play the engine against itself and print the result.
#[instrument(skip(config))]
async fn run_self_play(config: HubConfig, policy: Option<SearchPolicy>) -> Result<()> {
    let policy = policy.unwrap_or(*config.ai().policy());
    let config = config.with_ai(AiConfig::new(policy, 0, 0));
    info!(%policy, "Starting self-play");

    let engine = Minimax::new(policy);
    let notifier = Arc::new(TracingNotifier::new(config.reward().clone()));
    let session = TicTacToeSession::new(engine, notifier);
    let delay = ThinkDelay::from(config.ai());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            println!("{}", render_event(&event));
        }
    });

    let mut orchestrator = Orchestrator::new(
        session,
        Box::new(MinimaxPlayer::new("Engine X", engine, delay)),
        Box::new(MinimaxPlayer::new("Engine O", engine, delay)),
        event_tx,
    );
    let outcome = orchestrator.run_game().await?;
    drop(orchestrator);
    printer.await?;

    info!(?outcome, "Self-play finished");
    Ok(())
}
