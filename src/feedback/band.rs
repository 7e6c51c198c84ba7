use serde::{Deserialize, Serialize};
use std::fmt;

/// IELTS band: 0.0 to 9.0 in steps of 0.5.
///
/// Stored as a count of half bands so every value is exact. Out-of-range or
/// off-grid numbers are rejected, never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BandScore(u8);

impl BandScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(18);

    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn half_bands(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BandScoreError {
    #[error("band score {0} is not a finite number")]
    NotFinite(f64),
    #[error("band score {0} is outside 0-9")]
    OutOfRange(f64),
    #[error("band score {0} is not a multiple of 0.5")]
    OffGrid(f64),
}

impl TryFrom<f64> for BandScore {
    type Error = BandScoreError;

    fn try_from(raw: f64) -> Result<Self, Self::Error> {
        if !raw.is_finite() {
            return Err(BandScoreError::NotFinite(raw));
        }
        if !(Self::MIN.value()..=Self::MAX.value()).contains(&raw) {
            return Err(BandScoreError::OutOfRange(raw));
        }
        let doubled = raw * 2.0;
        if doubled.fract() != 0.0 {
            return Err(BandScoreError::OffGrid(raw));
        }
        // In range and integral, so the cast is exact.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let halves = doubled as u8;
        Ok(Self(halves))
    }
}

impl From<BandScore> for f64 {
    fn from(score: BandScore) -> Self {
        score.value()
    }
}

impl fmt::Display for BandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}
