//! Line-based terminal front end.
//!
//! Input is read from stdin on a background task and fed through a
//! channel; game output goes to stdout. Logs go to stderr.

use crate::config::HubConfig;
use crate::kind::GameKind;
use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{HumanPlayer, MinimaxPlayer, ThinkDelay};
use crate::reward::{RewardError, RewardNotifier, RewardReceipt, TracingNotifier};
use crate::session::{
    BoxResponse, DiceResponse, DiceSession, HangmanResponse, HangmanSession, MemoryResponse,
    MemorySession, MysteryBoxSession, RewardOutcome, RpsResponse, RpsSession, TicTacToeSession,
};
use anyhow::Result;
use arcade_dice::{DiceTable, Face, RollOutcome};
use arcade_hangman::{GuessOutcome, Hangman, HangmanStatus, MAX_MISTAKES};
use arcade_memory::{CARD_COUNT, FlipOutcome, MemoryBoard, PAIRS};
use arcade_mystery_box::{BoxGrid, OpenOutcome, TOTAL_BOXES};
use arcade_rps::{Choice, RoundResult, Scoreboard};
use arcade_tictactoe::Minimax;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Spawns a task forwarding stdin lines into a channel.
///
/// The channel closes at end of input.
pub fn spawn_stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
        debug!("Stdin reader finished");
    });
    rx
}

/// Runs the chosen game until the player quits.
#[instrument(skip(config))]
pub async fn play(kind: GameKind, config: &HubConfig) -> Result<()> {
    let notifier: Arc<dyn RewardNotifier> =
        Arc::new(TracingNotifier::new(config.reward().clone()));
    let mut lines = spawn_stdin_lines();

    println!("=== {} ===", kind.title());
    match kind {
        GameKind::TicTacToe => play_tictactoe(config, notifier, lines).await,
        GameKind::Rps => play_rps(RpsSession::new(notifier), &mut lines).await,
        GameKind::Dice => {
            let session = DiceSession::new(*config.dice().starting_coins(), notifier);
            play_dice(session, &mut lines).await
        }
        GameKind::Hangman => play_hangman(HangmanSession::new(notifier), &mut lines).await,
        GameKind::Memory => play_memory(MemorySession::new(notifier), &mut lines).await,
        GameKind::MysteryBox => {
            play_mystery_box(MysteryBoxSession::new(notifier), &mut lines).await
        }
    }
}

/// Human (X) against the computer (O).
pub async fn play_tictactoe(
    config: &HubConfig,
    notifier: Arc<dyn RewardNotifier>,
    lines: mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let engine = Minimax::new(*config.ai().policy());
    let session = TicTacToeSession::new(engine, notifier);
    let human = HumanPlayer::new("You", lines);
    let computer = MinimaxPlayer::new("Computer", engine, ThinkDelay::from(config.ai()));

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = spawn_event_printer(event_rx);

    println!("Type 1-9 to place X, r to restart, q to quit.");
    let mut orchestrator =
        Orchestrator::new(session, Box::new(human), Box::new(computer), event_tx);
    let result = orchestrator.run().await;

    // Dropping the orchestrator closes the event channel.
    drop(orchestrator);
    printer.await?;
    result
}

fn spawn_event_printer(mut rx: mpsc::UnboundedReceiver<GameEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("{}", render_event(&event));
            if matches!(event, GameEvent::GameOver { .. }) {
                println!("Type r to play again or q to quit.");
            }
        }
    })
}

/// Renders an orchestrator event for the terminal.
pub fn render_event(event: &GameEvent) -> String {
    match event {
        GameEvent::StateChanged { board, status } => format!("\n{}\n{}", board, status),
        GameEvent::Thinking { player } => format!("{} is thinking...", player),
        GameEvent::MoveMade { player, action } => {
            format!("{} played {}", player, action.position.label())
        }
        GameEvent::Rejected(error) => format!("Move ignored: {}", error),
        GameEvent::Reward(result) => render_reward(result),
        GameEvent::GameOver { outcome } => format!("Game over: {}", outcome),
    }
}

fn render_reward(result: &Result<RewardReceipt, RewardError>) -> String {
    match result {
        Ok(receipt) => format!("Reward: {}", receipt),
        Err(e) => format!("Reward not sent: {}", e.message),
    }
}

fn push_reward(out: &mut String, reward: &RewardOutcome) {
    if let Some(result) = reward {
        out.push('\n');
        out.push_str(&render_reward(result));
    }
}

/// A typed rock-paper-scissors command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsCommand {
    /// Play a hand.
    Throw(Choice),
    /// Clear the scoreboard.
    Reset,
    /// Leave.
    Quit,
}

/// Parses one line of rock-paper-scissors input.
pub fn parse_rps(line: &str) -> Option<RpsCommand> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(RpsCommand::Quit),
        "reset" => Some(RpsCommand::Reset),
        "1" => Some(RpsCommand::Throw(Choice::Rock)),
        "2" => Some(RpsCommand::Throw(Choice::Paper)),
        "3" => Some(RpsCommand::Throw(Choice::Scissors)),
        _ => line.parse().ok().map(RpsCommand::Throw),
    }
}

/// Plays rounds until `q` or end of input.
pub async fn play_rps(
    mut session: RpsSession,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    println!("Type rock, paper or scissors (or 1-3), reset, or q.");
    while let Some(line) = lines.recv().await {
        match parse_rps(&line) {
            Some(RpsCommand::Throw(choice)) => {
                let response = session.play(choice).await;
                println!("{}", render_rps(&response, session.scoreboard()));
            }
            Some(RpsCommand::Reset) => {
                session.reset();
                println!("{}", session.scoreboard());
            }
            Some(RpsCommand::Quit) => break,
            None => println!("Unknown hand: {}", line.trim()),
        }
    }
    info!(scoreboard = %session.scoreboard(), "Leaving rock-paper-scissors");
    Ok(())
}

/// Renders a played round and the running tally.
pub fn render_rps(response: &RpsResponse, scoreboard: &Scoreboard) -> String {
    let round = &response.round;
    let verdict = match round.result {
        RoundResult::Win => "You win!",
        RoundResult::Lose => "You lose!",
        RoundResult::Draw => "It's a draw!",
    };
    let mut out = format!(
        "You: {}  Computer: {}  {}\n{}",
        round.player, round.computer, verdict, scoreboard
    );
    push_reward(&mut out, &response.reward);
    out
}

/// A typed dice command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceCommand {
    /// Set the guess.
    Guess(Face),
    /// Clear the guess.
    Clear,
    /// Roll the die.
    Roll,
    /// Restore the starting bank.
    Reset,
    /// Leave.
    Quit,
}

/// Parses one line of dice input. An empty line rolls.
pub fn parse_dice(line: &str) -> Option<DiceCommand> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" | "roll" => Some(DiceCommand::Roll),
        "none" | "clear" => Some(DiceCommand::Clear),
        "reset" => Some(DiceCommand::Reset),
        "q" | "quit" | "exit" => Some(DiceCommand::Quit),
        _ => line.parse().ok().map(DiceCommand::Guess),
    }
}

/// Plays the dice game until `q` or end of input.
pub async fn play_dice(
    mut session: DiceSession,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    println!("Type 1-6 to guess, Enter to roll, clear, reset, or q.");
    println!("{}", render_table(session.table()));
    while let Some(line) = lines.recv().await {
        match parse_dice(&line) {
            Some(DiceCommand::Guess(face)) => {
                session.set_guess(Some(face));
                println!("Guessing {}; a hit pays {}.", face, session.table().payout());
            }
            Some(DiceCommand::Clear) => {
                session.set_guess(None);
                println!("Guess cleared.");
            }
            Some(DiceCommand::Roll) => {
                let response = session.roll().await;
                println!("{}", render_dice(&response));
                println!("{}", render_table(session.table()));
            }
            Some(DiceCommand::Reset) => {
                session.reset();
                println!("{}", render_table(session.table()));
            }
            Some(DiceCommand::Quit) => break,
            None => println!("Not a die face: {}", line.trim()),
        }
    }
    info!(coins = *session.table().coins(), "Leaving dice");
    Ok(())
}

/// Renders a settled roll.
pub fn render_dice(response: &DiceResponse) -> String {
    let roll = &response.roll;
    let mut out = match roll.outcome {
        RollOutcome::Hit { won } => format!("Rolled {}. Hit! +{} coins", roll.face, won),
        RollOutcome::Miss { lost } => format!("Rolled {}. Miss, -{} coins", roll.face, lost),
        RollOutcome::NoGuess { lost } => {
            format!("Rolled {}. No guess, -{} coins", roll.face, lost)
        }
    };
    push_reward(&mut out, &response.reward);
    out
}

/// Renders bank, streaks and recent rolls.
pub fn render_table(table: &DiceTable) -> String {
    let history: Vec<String> = table.history().iter().map(|f| f.to_string()).collect();
    format!(
        "Coins: {}  Streak: {} (best {})  Recent: [{}]",
        table.coins(),
        table.streak(),
        table.best_streak(),
        history.join(" ")
    )
}

/// A typed hangman command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangmanCommand {
    /// Guess a letter.
    Guess(char),
    /// Draw a new word.
    Reset,
    /// Leave.
    Quit,
}

/// Parses one line of hangman input.
///
/// A lone `q` is a guess; leaving takes `quit` or `exit`.
pub fn parse_hangman(line: &str) -> Option<HangmanCommand> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "quit" | "exit" => Some(HangmanCommand::Quit),
        "new" | "reset" => Some(HangmanCommand::Reset),
        _ => {
            let mut chars = line.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(HangmanCommand::Guess(c)),
                _ => None,
            }
        }
    }
}

/// Plays hangman until `quit` or end of input.
pub async fn play_hangman(
    mut session: HangmanSession,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    println!("Type a letter to guess, new for another word, or quit.");
    println!("{}", render_puzzle(session.puzzle()));
    while let Some(line) = lines.recv().await {
        match parse_hangman(&line) {
            Some(HangmanCommand::Guess(letter)) => match session.guess(letter).await {
                Ok(response) => {
                    println!("{}", render_guess(&response));
                    println!("{}", render_puzzle(session.puzzle()));
                }
                Err(e) => println!("Guess ignored: {}", e),
            },
            Some(HangmanCommand::Reset) => {
                session.reset();
                println!("{}", render_puzzle(session.puzzle()));
            }
            Some(HangmanCommand::Quit) => break,
            None => println!("Type a single letter: {}", line.trim()),
        }
    }
    info!(word = session.puzzle().word(), "Leaving hangman");
    Ok(())
}

/// Renders an accepted guess.
pub fn render_guess(response: &HangmanResponse) -> String {
    let mut out = match response.guess {
        GuessOutcome::Hit { letter, count: 1 } => format!("{} is in the word once.", letter),
        GuessOutcome::Hit { letter, count } => {
            format!("{} is in the word {} times.", letter, count)
        }
        GuessOutcome::Miss { letter } => format!("No {}.", letter),
    };
    push_reward(&mut out, &response.reward);
    out
}

/// Renders the masked word, misses and guessed letters. A finished
/// puzzle shows the word.
pub fn render_puzzle(puzzle: &Hangman) -> String {
    let guessed: String = puzzle.guessed().iter().collect();
    let mut out = format!(
        "{}  Mistakes: {}/{}  Guessed: [{}]",
        puzzle.masked(),
        puzzle.mistakes(),
        MAX_MISTAKES,
        guessed
    );
    match puzzle.status() {
        HangmanStatus::Playing => {}
        HangmanStatus::Won => {
            out.push_str(&format!("\nSolved! The word was {}.", puzzle.word()));
        }
        HangmanStatus::Lost => {
            out.push_str(&format!("\nHanged! The word was {}.", puzzle.word()));
        }
    }
    out
}

/// A typed command for the pick-a-cell games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickCommand {
    /// Pick a cell (0-based).
    Pick(usize),
    /// Start a new board.
    Reset,
    /// Leave.
    Quit,
}

/// Parses a 1-based cell number up to `cells`, `reset`, or `q`.
pub fn parse_pick(line: &str, cells: usize) -> Option<PickCommand> {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(PickCommand::Quit),
        "new" | "reset" => Some(PickCommand::Reset),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=cells).contains(n))
            .map(|n| PickCommand::Pick(n - 1)),
    }
}

/// Plays memory match until `q` or end of input.
pub async fn play_memory(
    mut session: MemorySession,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    println!("Type 1-{} to turn a card, reset, or q.", CARD_COUNT);
    println!("{}", render_memory_board(session.board()));
    while let Some(line) = lines.recv().await {
        match parse_pick(&line, CARD_COUNT) {
            Some(PickCommand::Pick(index)) => match session.flip(index).await {
                Ok(response) => {
                    println!("{}", render_flip(&response));
                    println!("{}", render_memory_board(session.board()));
                }
                Err(e) => println!("Flip ignored: {}", e),
            },
            Some(PickCommand::Reset) => {
                session.reset();
                println!("{}", render_memory_board(session.board()));
            }
            Some(PickCommand::Quit) => break,
            None => println!("Not a card: {}", line.trim()),
        }
    }
    info!(moves = session.board().moves(), "Leaving memory match");
    Ok(())
}

/// Renders an accepted flip. Cards are numbered from 1.
pub fn render_flip(response: &MemoryResponse) -> String {
    let mut out = match response.flip {
        FlipOutcome::First { index, icon } => format!("Card {}: {}", index + 1, icon),
        FlipOutcome::Match { icon, .. } => format!("{} {} Match!", icon, icon),
        FlipOutcome::Mismatch {
            first_icon,
            second_icon,
            ..
        } => format!("{} {} No match.", first_icon, second_icon),
    };
    if response.cleared {
        out.push_str("\nAll pairs found!");
    }
    push_reward(&mut out, &response.reward);
    out
}

/// Renders the card grid and progress.
pub fn render_memory_board(board: &MemoryBoard) -> String {
    format!(
        "{}\nPairs: {}/{}  Moves: {}",
        board.display(),
        board.matched_pairs(),
        PAIRS,
        board.moves()
    )
}

/// Plays mystery box until `q` or end of input.
pub async fn play_mystery_box(
    mut session: MysteryBoxSession,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    println!("Type 1-{} to open a box, reset, or q.", TOTAL_BOXES);
    println!("{}", render_grid(session.grid()));
    while let Some(line) = lines.recv().await {
        match parse_pick(&line, TOTAL_BOXES) {
            Some(PickCommand::Pick(index)) => match session.open(index).await {
                Ok(response) => {
                    println!("{}", render_box(&response));
                    println!("{}", render_grid(session.grid()));
                }
                Err(e) => println!("Box ignored: {}", e),
            },
            Some(PickCommand::Reset) => {
                session.reset();
                println!("{}", render_grid(session.grid()));
            }
            Some(PickCommand::Quit) => break,
            None => println!("Not a box: {}", line.trim()),
        }
    }
    info!(status = %session.grid().status(), "Leaving mystery box");
    Ok(())
}

/// Renders an opened box.
pub fn render_box(response: &BoxResponse) -> String {
    let mut out = match response.outcome {
        OpenOutcome::Safe { remaining } => format!("Safe! {} to go.", remaining),
        OpenOutcome::Cleared => "Safe! That was the last one.".to_string(),
        OpenOutcome::Bomb => "Bomb!".to_string(),
    };
    push_reward(&mut out, &response.reward);
    out
}

/// Renders the box grid and status.
pub fn render_grid(grid: &BoxGrid) -> String {
    format!("{}\n{}", grid.display(), grid.status())
}
