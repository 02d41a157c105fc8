//! Review grades. Only four grades exist: Again, Hard, Good and Easy.
use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Fail = 0,
    Hard = 2,
    Good = 4,
    Easy = 5,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Fail, Rating::Hard, Rating::Good, Rating::Easy];

    /// SM-2 response quality, 0-5.
    pub fn quality(self) -> u8 {
        self as u8
    }

    /// Only "Again" fails; Hard, Good and Easy are passing grades.
    pub fn is_fail(self) -> bool {
        self == Rating::Fail
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Fail => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = StudyError;

    fn try_from(grade: u8) -> Result<Self> {
        match grade {
            0 => Ok(Rating::Fail),
            2 => Ok(Rating::Hard),
            4 => Ok(Rating::Good),
            5 => Ok(Rating::Easy),
            other => Err(StudyError::InvalidRating(other)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.quality()
    }
}
