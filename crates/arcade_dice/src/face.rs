//! A single die face.

use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A face of a six-sided die (1-6).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Face(u8);

/// A number that is not a die face.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{} is not a die face (expected 1-6)", value)]
pub struct FaceError {
    /// The rejected input.
    pub value: String,
}

impl Face {
    /// Creates a face, rejecting values outside 1-6.
    pub fn new(value: u8) -> Result<Self, FaceError> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FaceError {
                value: value.to_string(),
            })
        }
    }

    /// The face's pip count.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Rolls a fair die.
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(1..=6))
    }
}

impl TryFrom<u8> for Face {
    type Error = FaceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> Self {
        face.0
    }
}

impl FromStr for Face {
    type Err = FaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| FaceError {
                value: s.trim().to_string(),
            })
            .and_then(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_face_bounds() {
        assert!(Face::new(0).is_err());
        assert!(Face::new(7).is_err());
        assert_eq!(Face::new(6).map(Face::value), Ok(6));
        assert_eq!("3".parse::<Face>().map(Face::value), Ok(3));
        assert!("three".parse::<Face>().is_err());
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let face = Face::roll(&mut rng);
            assert!((1..=6).contains(&face.value()));
        }
    }
}
