use serde::{Deserialize, Serialize};

use crate::core::Candle;
use crate::error::{TempoError, TempoResult};

/// Vertical price domain of the plot, bottom (`min`) to top (`max`).
///
/// Deserialization goes through [`PriceRange::new`], so invalid input is
/// rejected instead of producing a degenerate range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = TempoError;

    fn try_from(raw: RawPriceRange) -> TempoResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> TempoResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(TempoError::InvalidData(
                "price range must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    /// Fits the range around the lowest low and highest high of `candles`,
    /// widened proportionally by `padding_ratio` on both ends.
    ///
    /// The padding is relative to the prices themselves: the bottom becomes
    /// `min_low * (1 - padding)` and the top `max_high * (1 + padding)`.
    pub fn from_candles(candles: &[Candle], padding_ratio: f64) -> TempoResult<Self> {
        if !padding_ratio.is_finite() || !(0.0..1.0).contains(&padding_ratio) {
            return Err(TempoError::InvalidData(
                "price padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        if candles.is_empty() {
            return Err(TempoError::InvalidData(
                "cannot fit a price range to an empty candle set".to_owned(),
            ));
        }

        let (low, high) = candles
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), candle| {
                (low.min(candle.low), high.max(candle.high))
            });

        Self::new(low * (1.0 - padding_ratio), high * (1.0 + padding_ratio))
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}
