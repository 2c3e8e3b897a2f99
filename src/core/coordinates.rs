//! Pure pixel <-> domain conversions used by chart render callbacks.
//!
//! Pixel offsets are measured from the top-left corner of the plot area.
//! Day indices grow to the right; prices grow upward, so the Y axis is
//! inverted relative to pixel space.
//!
//! None of these functions validate their ranges. A zero-width day axis or
//! a flat price range (`min_price == max_price`) yields IEEE-754 infinities
//! or NaN instead of panicking; callers are expected to avoid degenerate
//! layouts (see [`crate::core::ChartLayout`], which rejects them up front).

/// Maps a horizontal pixel offset to the index of the day column under it.
///
/// Non-finite intermediate results saturate (`NaN` maps to `0`).
#[must_use]
pub fn pixel_x_to_day_index(x: f64, total_width_px: f64, total_days: u32) -> i64 {
    ((x / total_width_px) * f64::from(total_days)).floor() as i64
}

/// Maps a vertical pixel offset to the price drawn at that height.
#[must_use]
pub fn pixel_y_to_price(y: f64, total_height_px: f64, min_price: f64, max_price: f64) -> f64 {
    max_price - (y / total_height_px) * (max_price - min_price)
}

/// Maps a price to its vertical pixel offset. Inverse of [`pixel_y_to_price`]
/// up to floating-point rounding.
#[must_use]
pub fn price_to_pixel_y(price: f64, total_height_px: f64, min_price: f64, max_price: f64) -> f64 {
    total_height_px - ((price - min_price) / (max_price - min_price)) * total_height_px
}

/// Width in pixels of a single day column.
#[must_use]
pub fn day_width_px(total_width_px: f64, total_days: u32) -> f64 {
    total_width_px / f64::from(total_days)
}
