use serde::{Deserialize, Serialize};

use crate::core::{Candle, PriceRange, Viewport, coordinates};
use crate::error::{TempoError, TempoResult};

/// Host-facing chart layout configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutConfig {
    #[serde(default)]
    pub viewport: Viewport,
    /// Empty day columns reserved right of the history for the prediction.
    #[serde(default = "default_future_days")]
    pub future_days: u32,
    /// Relative padding applied below the lowest low and above the highest high.
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
}

impl Default for ChartLayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            future_days: default_future_days(),
            price_padding_ratio: default_price_padding_ratio(),
        }
    }
}

impl ChartLayoutConfig {
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_future_days(mut self, future_days: u32) -> Self {
        self.future_days = future_days;
        self
    }

    #[must_use]
    pub fn with_price_padding_ratio(mut self, ratio: f64) -> Self {
        self.price_padding_ratio = ratio;
        self
    }

    pub fn validate(self) -> TempoResult<Self> {
        if !self.viewport.is_valid() {
            return Err(TempoError::InvalidConfig(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.price_padding_ratio.is_finite() || !(0.0..1.0).contains(&self.price_padding_ratio)
        {
            return Err(TempoError::InvalidConfig(
                "price padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_future_days() -> u32 {
    10
}

fn default_price_padding_ratio() -> f64 {
    0.15
}

/// Resolved geometry of a prediction chart: plot size, day columns and
/// price domain.
///
/// Every method is a thin wrapper over [`coordinates`] with the layout's
/// dimensions filled in. Deserialized layouts are checked by
/// [`ChartLayout::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChartLayout")]
pub struct ChartLayout {
    viewport: Viewport,
    history_days: u32,
    future_days: u32,
    price_range: PriceRange,
}

#[derive(Deserialize)]
struct RawChartLayout {
    viewport: Viewport,
    history_days: u32,
    future_days: u32,
    price_range: PriceRange,
}

impl TryFrom<RawChartLayout> for ChartLayout {
    type Error = TempoError;

    fn try_from(raw: RawChartLayout) -> TempoResult<Self> {
        Self::new(raw.viewport, raw.history_days, raw.future_days, raw.price_range)
    }
}

impl ChartLayout {
    pub fn new(
        viewport: Viewport,
        history_days: u32,
        future_days: u32,
        price_range: PriceRange,
    ) -> TempoResult<Self> {
        if !viewport.is_valid() {
            return Err(TempoError::InvalidConfig(format!(
                "invalid viewport size: width={}, height={}",
                viewport.width, viewport.height
            )));
        }
        if history_days.checked_add(future_days).is_none_or(|total| total == 0) {
            return Err(TempoError::InvalidConfig(
                "layout needs at least one day column".to_owned(),
            ));
        }
        Ok(Self {
            viewport,
            history_days,
            future_days,
            price_range,
        })
    }

    /// Lays out `candles` as history followed by `config.future_days` empty columns.
    pub fn from_candles(config: ChartLayoutConfig, candles: &[Candle]) -> TempoResult<Self> {
        let config = config.validate()?;
        let history_days = u32::try_from(candles.len())
            .map_err(|_| TempoError::InvalidData("too many candles for one chart".to_owned()))?;
        let price_range = PriceRange::from_candles(candles, config.price_padding_ratio)?;
        Self::new(config.viewport, history_days, config.future_days, price_range)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    #[must_use]
    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    #[must_use]
    pub fn future_days(&self) -> u32 {
        self.future_days
    }

    #[must_use]
    pub fn total_days(&self) -> u32 {
        self.history_days + self.future_days
    }

    #[must_use]
    pub fn day_width_px(&self) -> f64 {
        coordinates::day_width_px(self.viewport.width_px(), self.total_days())
    }

    /// Left edge of the column for `day_index`.
    #[must_use]
    pub fn day_left_x(&self, day_index: u32) -> f64 {
        f64::from(day_index) * self.day_width_px()
    }

    #[must_use]
    pub fn day_center_x(&self, day_index: u32) -> f64 {
        self.day_left_x(day_index) + self.day_width_px() / 2.0
    }

    #[must_use]
    pub fn x_to_day(&self, x: f64) -> i64 {
        coordinates::pixel_x_to_day_index(x, self.viewport.width_px(), self.total_days())
    }

    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        coordinates::price_to_pixel_y(
            price,
            self.viewport.height_px(),
            self.price_range.min(),
            self.price_range.max(),
        )
    }

    #[must_use]
    pub fn y_to_price(&self, y: f64) -> f64 {
        coordinates::pixel_y_to_price(
            y,
            self.viewport.height_px(),
            self.price_range.min(),
            self.price_range.max(),
        )
    }

    /// Start x and width of the shaded region where the user draws a prediction.
    #[must_use]
    pub fn prediction_zone_x(&self) -> (f64, f64) {
        let day_width = self.day_width_px();
        (
            f64::from(self.history_days) * day_width,
            f64::from(self.future_days) * day_width,
        )
    }

    /// Returns `true` when `x` falls inside the prediction zone.
    #[must_use]
    pub fn is_in_prediction_zone(&self, x: f64) -> bool {
        let (start, width) = self.prediction_zone_x();
        x >= start && x < start + width
    }
}
