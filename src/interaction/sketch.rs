use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;

/// One pixel sample of the user's freehand prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPoint {
    pub x: f64,
    pub y: f64,
}

/// Predicted price for one day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayPrice {
    pub day: i64,
    pub price: f64,
}

/// Freehand prediction drawn left to right over the chart.
///
/// Points must move strictly rightward; anything at or left of the last
/// accepted point is dropped so the sketch stays a function of x.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionSketch {
    points: Vec<SketchPoint>,
}

impl PredictionSketch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point. Returns `false` when it was dropped.
    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        if self.points.last().is_some_and(|last| x <= last.x) {
            return false;
        }
        self.points.push(SketchPoint { x, y });
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn points(&self) -> &[SketchPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Collapses the sketch to one averaged price per run of points that
    /// fall in the same day column.
    #[must_use]
    pub fn day_prices(&self, layout: &ChartLayout) -> Vec<DayPrice> {
        let mut day_prices = Vec::new();
        let mut run: Option<(i64, f64, u32)> = None;

        for point in &self.points {
            let day = layout.x_to_day(point.x);
            let price = layout.y_to_price(point.y);
            run = match run {
                Some((run_day, sum, count)) if run_day == day => Some((day, sum + price, count + 1)),
                Some((run_day, sum, count)) => {
                    day_prices.push(DayPrice {
                        day: run_day,
                        price: sum / f64::from(count),
                    });
                    Some((day, price, 1))
                }
                None => Some((day, price, 1)),
            };
        }

        if let Some((day, sum, count)) = run {
            day_prices.push(DayPrice {
                day,
                price: sum / f64::from(count),
            });
        }
        day_prices
    }
}
