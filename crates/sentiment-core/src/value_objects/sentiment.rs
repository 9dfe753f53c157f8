//! Sentiment polarity score

use std::fmt;

use serde::{Deserialize, Serialize};

/// Polarity in `[-1.0, 1.0]`; negative is unfavourable, positive favourable.
///
/// Construction rejects NaN, so every value is comparable and storable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Sentiment(f64);

impl Sentiment {
    pub const MIN: f64 = -1.0;
    pub const MAX: f64 = 1.0;
    pub const NEUTRAL: Sentiment = Sentiment(0.0);

    /// Accept a value already inside the range
    pub fn new(value: f64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Clamp any finite value into range; NaN yields `None`
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(Self(value.clamp(Self::MIN, Self::MAX)))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl TryFrom<f64> for Sentiment {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("sentiment {value} outside [-1, 1]"))
    }
}

impl From<Sentiment> for f64 {
    fn from(s: Sentiment) -> Self {
        s.0
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
