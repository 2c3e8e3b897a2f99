mod sketch;

pub use sketch::{DayPrice, PredictionSketch, SketchPoint};

use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;
use crate::error::{TempoError, TempoResult};

/// Prediction submitted to the scoring service.
///
/// Field names follow the service's camelCase JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub symbol: String,
    /// Date of the last history candle the prediction continues from.
    pub after_date: String,
    pub estimated_day_prices: Vec<DayPrice>,
}

impl PredictionRequest {
    /// Builds a request from the user's sketch. Fails on an empty sketch.
    pub fn from_sketch(
        symbol: impl Into<String>,
        after_date: impl Into<String>,
        sketch: &PredictionSketch,
        layout: &ChartLayout,
    ) -> TempoResult<Self> {
        let estimated_day_prices = sketch.day_prices(layout);
        if estimated_day_prices.is_empty() {
            return Err(TempoError::InvalidData(
                "prediction sketch is empty".to_owned(),
            ));
        }
        Ok(Self {
            symbol: symbol.into(),
            after_date: after_date.into(),
            estimated_day_prices,
        })
    }

    pub fn to_json(&self) -> TempoResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TempoError::Serialization(format!("failed to serialize prediction: {e}")))
    }
}
