pub mod coordinates;
pub mod layout;
pub mod price_range;
pub mod types;

pub use coordinates::{day_width_px, pixel_x_to_day_index, pixel_y_to_price, price_to_pixel_y};
pub use layout::{ChartLayout, ChartLayoutConfig};
pub use price_range::PriceRange;
pub use types::{Candle, Viewport};
