use serde::{Deserialize, Serialize};

use crate::error::{TempoError, TempoResult};

/// Pixel size of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// One trading day of price history as delivered by the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> TempoResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(TempoError::InvalidData(
                "candle values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(TempoError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(TempoError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Returns `true` when the close is strictly above the open.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close > self.open
    }

    /// Top and bottom prices of the candle body.
    #[must_use]
    pub fn body_range(self) -> (f64, f64) {
        (self.open.max(self.close), self.open.min(self.close))
    }
}

#[cfg(test)]
mod tests {
    use super::{Candle, Viewport};

    #[test]
    fn candle_rejects_inconsistent_ohlc() {
        assert!(Candle::new(10.0, 12.0, 9.0, 11.0).is_ok());
        assert!(Candle::new(10.0, 9.0, 12.0, 11.0).is_err());
        assert!(Candle::new(13.0, 12.0, 9.0, 11.0).is_err());
        assert!(Candle::new(f64::NAN, 12.0, 9.0, 11.0).is_err());
    }

    #[test]
    fn flat_candle_is_not_bullish() {
        let flat = Candle::new(10.0, 10.0, 10.0, 10.0).expect("flat candle");
        assert!(!flat.is_bullish());
        let up = Candle::new(10.0, 12.0, 9.0, 11.0).expect("up candle");
        assert!(up.is_bullish());
        assert_eq!(up.body_range(), (11.0, 10.0));
    }

    #[test]
    fn zero_sized_viewport_is_invalid() {
        assert!(!Viewport::new(0, 600).is_valid());
        assert!(Viewport::default().is_valid());
    }
}
