//! Tests for game sessions and reward claims.

use arcade_dice::Face;
use arcade_hangman::{HangmanError, HangmanStatus, MAX_MISTAKES};
use arcade_hub::{
    DiceSession, GameKind, HangmanSession, MemorySession, MoveResponse, MysteryBoxSession,
    RewardClaim, RewardError, RewardNotifier, RewardReceipt, RpsSession, Status,
    TicTacToeSession,
};
use arcade_memory::{FlipOutcome, MemoryError, PAIRS};
use arcade_mystery_box::{BoxError, BoxGrid, BoxStatus, OpenOutcome, TOTAL_BOXES};
use arcade_rps::{Choice, RoundResult};
use arcade_tictactoe::{InvalidMove, Mark, Minimax, Outcome, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

/// Notifier that records every claim.
#[derive(Default)]
struct RecordingNotifier {
    claims: Mutex<Vec<RewardClaim>>,
    fail: bool,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn count(&self) -> usize {
        self.claims.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl RewardNotifier for RecordingNotifier {
    async fn notify(&self, claim: RewardClaim) -> Result<RewardReceipt, RewardError> {
        self.claims.lock().unwrap().push(claim);
        if self.fail {
            return Err(RewardError::new("payout service unavailable"));
        }
        Ok(RewardReceipt::new(*claim.game(), "0xabc".to_string(), 1))
    }
}

/// Plays X on `x_moves` and O on `o_moves`, alternating, committing O
/// moves against a fresh snapshot. Returns the last response.
async fn play_out(
    session: &mut TicTacToeSession,
    x_moves: &[usize],
    o_moves: &[usize],
) -> MoveResponse {
    let mut last = MoveResponse::Stale;
    for (i, &x) in x_moves.iter().enumerate() {
        last = session.handle_player_move(x).await;
        if let Some(&o) = o_moves.get(i) {
            let snapshot = session.game().clone();
            last = session.commit_opponent_move(&snapshot, o).await;
        }
    }
    last
}

#[tokio::test]
async fn test_player_win_claims_reward_once() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = TicTacToeSession::new(Minimax::default(), notifier.clone());

    // X takes the top row while O wanders.
    let last = play_out(&mut session, &[0, 1, 2], &[3, 4]).await;
    match last {
        MoveResponse::Accepted {
            outcome, reward, ..
        } => {
            assert_eq!(outcome, Outcome::PlayerWin);
            assert!(matches!(reward, Some(Ok(_))));
        }
        other => panic!("expected accepted move, got {:?}", other),
    }
    assert_eq!(session.status(), Status::Finished(Outcome::PlayerWin));
    assert_eq!(notifier.count(), 1);

    // Further input is ignored and does not claim again.
    let again = session.handle_player_move(8).await;
    assert_eq!(
        again,
        MoveResponse::Ignored(InvalidMove::GameOver(Outcome::PlayerWin))
    );
    assert_eq!(notifier.count(), 1);

    // A new game can earn a new reward.
    session.reset();
    play_out(&mut session, &[0, 1, 2], &[3, 4]).await;
    assert_eq!(notifier.count(), 2);
}

#[tokio::test]
async fn test_failed_payout_keeps_the_win() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let mut session = TicTacToeSession::new(Minimax::default(), notifier.clone());

    let last = play_out(&mut session, &[0, 1, 2], &[3, 4]).await;
    let MoveResponse::Accepted { reward, .. } = last else {
        panic!("expected accepted move");
    };
    let err = reward.unwrap().unwrap_err();
    assert!(err.message.contains("unavailable"));
    assert_eq!(session.game().outcome(), Outcome::PlayerWin);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn test_engine_games_never_reward() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = TicTacToeSession::new(Minimax::default(), notifier.clone());

    // X always takes the lowest free square; O answers with the engine.
    while !session.game().is_over() {
        let x = session.game().valid_moves()[0].to_index();
        session.handle_player_move(x).await;
        if let Some(position) = session.plan_opponent_move() {
            let snapshot = session.game().clone();
            let response = session
                .commit_opponent_move(&snapshot, position.to_index())
                .await;
            assert!(matches!(response, MoveResponse::Accepted { .. }));
        }
    }

    assert_ne!(session.game().outcome(), Outcome::PlayerWin);
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_invalid_moves_leave_state_unchanged() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = TicTacToeSession::new(Minimax::default(), notifier);

    assert_eq!(
        session.handle_player_move(9).await,
        MoveResponse::Ignored(InvalidMove::OutOfBounds(9))
    );
    assert!(session.game().board().is_blank());

    session.handle_player_move(4).await;
    let before = session.game().clone();

    // Out of turn: O is to move.
    assert_eq!(
        session.handle_player_move(0).await,
        MoveResponse::Ignored(InvalidMove::WrongTurn(Mark::X))
    );
    // Occupied square.
    assert_eq!(
        session.commit_opponent_move(&before, 4).await,
        MoveResponse::Ignored(InvalidMove::SquareOccupied(Position::Center))
    );
    assert_eq!(session.game(), &before);
    assert_eq!(session.status(), Status::OpponentTurn);
}

#[tokio::test]
async fn test_stale_opponent_move_dropped_after_restart() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = TicTacToeSession::new(Minimax::default(), notifier);

    session.handle_player_move(0).await;
    let snapshot = session.game().clone();
    let planned = session.plan_opponent_move().unwrap();
    assert_eq!(planned, Position::Center);

    session.reset();
    let response = session
        .commit_opponent_move(&snapshot, planned.to_index())
        .await;
    assert_eq!(response, MoveResponse::Stale);
    assert!(session.game().board().is_blank());
    assert_eq!(session.status(), Status::PlayerTurn);
}

#[test]
fn test_status_text() {
    assert_eq!(Status::PlayerTurn.to_string(), "Next player: You (X)");
    assert_eq!(Status::OpponentTurn.to_string(), "Next player: Computer (O)");
    assert_eq!(
        Status::Finished(Outcome::PlayerWin).to_string(),
        "Winner: You!"
    );
    assert_eq!(
        Status::Finished(Outcome::OpponentWin).to_string(),
        "Winner: Computer!"
    );
    assert_eq!(Status::Finished(Outcome::Draw).to_string(), "It's a Draw!");
}

#[tokio::test]
async fn test_rps_claims_every_winning_round() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = RpsSession::with_rng(notifier.clone(), StdRng::seed_from_u64(7));

    let mut wins = 0;
    for _ in 0..30 {
        let response = session.play(Choice::Rock).await;
        assert_eq!(response.reward.is_some(), response.round.result == RoundResult::Win);
        if response.round.result == RoundResult::Win {
            wins += 1;
        }
    }

    assert_eq!(*session.scoreboard().win(), wins);
    assert_eq!(session.scoreboard().rounds(), 30);
    assert_eq!(notifier.count() as u32, wins);
    assert!(
        notifier
            .claims
            .lock()
            .unwrap()
            .iter()
            .all(|c| *c.game() == GameKind::Rps)
    );

    session.reset();
    assert_eq!(session.scoreboard().rounds(), 0);
}

#[tokio::test]
async fn test_dice_hit_rewards_miss_does_not() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = DiceSession::with_rng(100, notifier.clone(), StdRng::seed_from_u64(1));
    let three = Face::new(3).unwrap();

    session.set_guess(Some(three));
    let hit = session.settle(three).await;
    assert!(hit.roll.outcome.is_hit());
    assert!(matches!(hit.reward, Some(Ok(_))));
    assert_eq!(*session.table().coins(), 150);

    let miss = session.settle(Face::new(6).unwrap()).await;
    assert!(miss.reward.is_none());
    assert_eq!(*session.table().coins(), 140);
    assert_eq!(notifier.count(), 1);

    session.reset();
    assert_eq!(*session.table().coins(), 100);
    assert!(session.table().history().is_empty());
}

#[tokio::test]
async fn test_hangman_solve_claims_once() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = HangmanSession::with_rng(notifier.clone(), StdRng::seed_from_u64(21));
    let mut letters: Vec<char> = session.puzzle().word().chars().collect();
    letters.sort_unstable();
    letters.dedup();

    let (last, rest) = letters.split_last().unwrap();
    for &c in rest {
        let response = session.guess(c).await.unwrap();
        assert_eq!(response.status, HangmanStatus::Playing);
        assert!(response.reward.is_none());
    }
    let response = session.guess(*last).await.unwrap();
    assert_eq!(response.status, HangmanStatus::Won);
    assert!(matches!(response.reward, Some(Ok(_))));
    assert_eq!(notifier.count(), 1);

    assert_eq!(
        session.guess('Q').await,
        Err(HangmanError::GameOver(HangmanStatus::Won))
    );
    assert_eq!(notifier.count(), 1);
    assert_eq!(
        *notifier.claims.lock().unwrap()[0].game(),
        GameKind::Hangman
    );
}

#[tokio::test]
async fn test_hangman_loss_claims_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = HangmanSession::with_rng(notifier.clone(), StdRng::seed_from_u64(8));
    let word = session.puzzle().word().to_string();
    let misses: Vec<char> = ('A'..='Z')
        .filter(|c| !word.contains(*c))
        .take(MAX_MISTAKES)
        .collect();

    for c in misses {
        let response = session.guess(c).await.unwrap();
        assert!(response.reward.is_none());
    }
    assert_eq!(session.puzzle().status(), HangmanStatus::Lost);
    assert_eq!(notifier.count(), 0);

    session.reset();
    assert_eq!(session.puzzle().status(), HangmanStatus::Playing);
    assert!(session.puzzle().guessed().is_empty());
}

#[tokio::test]
async fn test_memory_clear_claims_once() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = MemorySession::with_rng(notifier.clone(), StdRng::seed_from_u64(13));
    let icons: Vec<_> = session.board().cards().iter().map(|c| c.icon).collect();

    for pair in 0..PAIRS {
        let first = icons.iter().position(|i| i.index() == pair).unwrap();
        let second = icons.iter().rposition(|i| i.index() == pair).unwrap();
        session.flip(first).await.unwrap();
        let response = session.flip(second).await.unwrap();
        assert!(matches!(response.flip, FlipOutcome::Match { .. }));
        assert_eq!(response.cleared, pair + 1 == PAIRS);
        assert_eq!(response.reward.is_some(), pair + 1 == PAIRS);
    }
    assert_eq!(notifier.count(), 1);
    assert_eq!(session.flip(0).await, Err(MemoryError::Cleared));
    assert_eq!(notifier.count(), 1);

    session.reset();
    assert_eq!(session.board().matched_pairs(), 0);
    assert_eq!(session.board().moves(), 0);
}

#[tokio::test]
async fn test_memory_rejected_flip_claims_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = MemorySession::with_rng(notifier.clone(), StdRng::seed_from_u64(2));
    session.flip(3).await.unwrap();
    assert_eq!(session.flip(3).await, Err(MemoryError::AlreadyFaceUp(3)));
    assert_eq!(session.flip(99).await, Err(MemoryError::OutOfBounds(99)));
    assert_eq!(session.board().pending(), Some(3));
    assert_eq!(notifier.count(), 0);
}

/// Finds the bomb by opening boxes on a copy of the grid.
fn bomb_of(grid: &BoxGrid) -> usize {
    let mut scout = grid.clone();
    (0..TOTAL_BOXES)
        .find(|&i| scout.open(i) == Ok(OpenOutcome::Bomb))
        .unwrap_or(TOTAL_BOXES - 1)
}

#[tokio::test]
async fn test_mystery_box_clear_claims_once() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = MysteryBoxSession::with_rng(notifier.clone(), StdRng::seed_from_u64(17));
    let bomb = bomb_of(session.grid());

    let safe: Vec<usize> = (0..TOTAL_BOXES).filter(|&i| i != bomb).collect();
    let (last, rest) = safe.split_last().unwrap();
    for &i in rest {
        let response = session.open(i).await.unwrap();
        assert!(matches!(response.outcome, OpenOutcome::Safe { .. }));
        assert!(response.reward.is_none());
    }
    let response = session.open(*last).await.unwrap();
    assert_eq!(response.outcome, OpenOutcome::Cleared);
    assert!(matches!(response.reward, Some(Ok(_))));
    assert_eq!(notifier.count(), 1);

    assert_eq!(
        session.open(bomb).await,
        Err(BoxError::GameOver(BoxStatus::Won))
    );
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn test_mystery_box_bomb_claims_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = MysteryBoxSession::with_rng(notifier.clone(), StdRng::seed_from_u64(17));
    let bomb = bomb_of(session.grid());

    let response = session.open(bomb).await.unwrap();
    assert_eq!(response.outcome, OpenOutcome::Bomb);
    assert!(response.reward.is_none());
    assert_eq!(session.grid().status(), BoxStatus::Lost);
    assert_eq!(notifier.count(), 0);

    session.reset();
    assert_eq!(session.grid().status(), BoxStatus::Playing);
}
