//! Hands and round resolution.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A hand in rock-paper-scissors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Choice {
    /// Blunts scissors.
    Rock,
    /// Covers rock.
    Paper,
    /// Cuts paper.
    Scissors,
}

impl Choice {
    /// All hands in display order.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The hand this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// Picks a hand uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Choice {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Result of a round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RoundResult {
    /// Player's hand defeats the computer's.
    Win,
    /// Computer's hand defeats the player's.
    Lose,
    /// Same hand.
    Draw,
}

/// Judges the player's hand against the computer's.
pub fn judge(player: Choice, computer: Choice) -> RoundResult {
    if player == computer {
        RoundResult::Draw
    } else if player.beats() == computer {
        RoundResult::Win
    } else {
        RoundResult::Lose
    }
}

/// One resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// The player's hand.
    pub player: Choice,
    /// The computer's hand.
    pub computer: Choice,
    /// Result for the player.
    pub result: RoundResult,
}

/// Plays `player` against a random computer hand.
#[instrument(level = "debug", skip(rng))]
pub fn play_round(player: Choice, rng: &mut impl Rng) -> Round {
    let computer = Choice::random(rng);
    let result = judge(player, computer);
    debug!(%computer, %result, "Round resolved");
    Round {
        player,
        computer,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_judge_table() {
        use Choice::*;
        assert_eq!(judge(Rock, Scissors), RoundResult::Win);
        assert_eq!(judge(Paper, Rock), RoundResult::Win);
        assert_eq!(judge(Scissors, Paper), RoundResult::Win);
        assert_eq!(judge(Scissors, Rock), RoundResult::Lose);
        assert_eq!(judge(Rock, Paper), RoundResult::Lose);
        assert_eq!(judge(Paper, Scissors), RoundResult::Lose);
        for c in Choice::ALL {
            assert_eq!(judge(c, c), RoundResult::Draw);
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("rock".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!("SCISSORS".parse::<Choice>(), Ok(Choice::Scissors));
        assert!("lizard".parse::<Choice>().is_err());
    }

    #[test]
    fn test_round_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let round = play_round(Choice::Paper, &mut rng);
            assert_eq!(round.player, Choice::Paper);
            assert_eq!(round.result, judge(round.player, round.computer));
        }
    }

    #[test]
    fn test_random_covers_every_hand() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: std::collections::HashSet<_> =
            (0..200).map(|_| Choice::random(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }
}
