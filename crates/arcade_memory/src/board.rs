//! Cards, flips and matching.

use derive_more::Display;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Icons on the card faces; each appears on exactly two cards.
pub const ICONS: [&str; 8] = ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"];
/// Pairs on the board.
pub const PAIRS: usize = ICONS.len();
/// Cards on the board.
pub const CARD_COUNT: usize = PAIRS * 2;

/// A card face, one of [`ICONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Icon(u8);

impl Icon {
    /// The icon at `index` in [`ICONS`].
    pub fn new(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < PAIRS)
            .map(Self)
    }

    /// Position in [`ICONS`].
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The printed glyph.
    pub fn glyph(self) -> &'static str {
        ICONS[self.index()]
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl TryFrom<u8> for Icon {
    type Error = MemoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value)).ok_or(MemoryError::UnknownIcon(value))
    }
}

impl From<Icon> for u8 {
    fn from(icon: Icon) -> Self {
        icon.0
    }
}

/// Which way up a card lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down.
    Hidden,
    /// Turned this move, waiting for its partner.
    FaceUp,
    /// Paired; stays face up.
    Matched,
}

/// One card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// The face.
    pub icon: Icon,
    /// Which way up.
    pub state: CardState,
}

/// Result of an accepted flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// First card of a move.
    First {
        /// Card turned.
        index: usize,
        /// Its face.
        icon: Icon,
    },
    /// Second card matched the first; both stay up.
    Match {
        /// First card of the move.
        first: usize,
        /// Second card of the move.
        second: usize,
        /// The shared face.
        icon: Icon,
    },
    /// Second card differs; both are turned back down.
    Mismatch {
        /// First card of the move.
        first: usize,
        /// Second card of the move.
        second: usize,
        /// Face of the first card.
        first_icon: Icon,
        /// Face of the second card.
        second_icon: Icon,
    },
}

/// A rejected flip or layout. Rejection never changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MemoryError {
    /// Index outside the board.
    #[display("Card {} does not exist", _0)]
    OutOfBounds(usize),
    /// Card is already face up or matched.
    #[display("Card {} is already face up", _0)]
    AlreadyFaceUp(usize),
    /// Every pair is matched.
    #[display("All pairs are already matched")]
    Cleared,
    /// A layout must hold every icon exactly twice.
    #[display("Layout must hold each icon exactly twice")]
    InvalidLayout,
    /// Not an icon index.
    #[display("{} is not an icon", _0)]
    UnknownIcon(u8),
}

impl std::error::Error for MemoryError {}

/// The memory-match table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBoard {
    cards: Vec<Card>,
    pending: Option<usize>,
    moves: u32,
}

impl MemoryBoard {
    /// Deals every pair face down in random order.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut icons: Vec<Icon> = (0..PAIRS)
            .filter_map(Icon::new)
            .flat_map(|icon| [icon, icon])
            .collect();
        icons.shuffle(rng);
        Self::dealt(&icons)
    }

    /// Deals a fixed layout, rejecting anything but two of each icon.
    pub fn with_layout(icons: &[Icon]) -> Result<Self, MemoryError> {
        let mut counts = [0usize; PAIRS];
        for icon in icons {
            counts[icon.index()] += 1;
        }
        if icons.len() != CARD_COUNT || counts.iter().any(|&n| n != 2) {
            return Err(MemoryError::InvalidLayout);
        }
        Ok(Self::dealt(icons))
    }

    fn dealt(icons: &[Icon]) -> Self {
        Self {
            cards: icons
                .iter()
                .map(|&icon| Card {
                    icon,
                    state: CardState::Hidden,
                })
                .collect(),
            pending: None,
            moves: 0,
        }
    }

    /// All cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Moves started (each move turns up to two cards).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The first card of an unfinished move.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Pairs found so far.
    pub fn matched_pairs(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.state == CardState::Matched)
            .count()
            / 2
    }

    /// True when every pair is matched.
    pub fn is_cleared(&self) -> bool {
        self.cards.iter().all(|c| c.state == CardState::Matched)
    }

    /// Turns the card at `index` (0-based).
    #[instrument(
        level = "debug",
        skip(self),
        fields(pending = ?self.pending, moves = self.moves)
    )]
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, MemoryError> {
        if self.is_cleared() {
            return Err(MemoryError::Cleared);
        }
        let card = *self
            .cards
            .get(index)
            .ok_or(MemoryError::OutOfBounds(index))?;
        if card.state != CardState::Hidden {
            return Err(MemoryError::AlreadyFaceUp(index));
        }

        let outcome = match self.pending.take() {
            None => {
                self.cards[index].state = CardState::FaceUp;
                self.pending = Some(index);
                self.moves += 1;
                FlipOutcome::First {
                    index,
                    icon: card.icon,
                }
            }
            Some(first) if self.cards[first].icon == card.icon => {
                self.cards[first].state = CardState::Matched;
                self.cards[index].state = CardState::Matched;
                FlipOutcome::Match {
                    first,
                    second: index,
                    icon: card.icon,
                }
            }
            Some(first) => {
                self.cards[first].state = CardState::Hidden;
                FlipOutcome::Mismatch {
                    first,
                    second: index,
                    first_icon: self.cards[first].icon,
                    second_icon: card.icon,
                }
            }
        };
        debug!(?outcome, "Card flipped");
        Ok(outcome)
    }

    /// Four rows of four; hidden cards show their 1-based number.
    pub fn display(&self) -> String {
        self.cards
            .chunks(4)
            .enumerate()
            .map(|(row, cards)| {
                cards
                    .iter()
                    .enumerate()
                    .map(|(col, card)| match card.state {
                        CardState::Hidden => format!("{:>2}", row * 4 + col + 1),
                        CardState::FaceUp | CardState::Matched => card.icon.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Deals a fresh shuffled board.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::shuffled(rng);
    }
}
