//! API endpoint implementations

pub mod order_fill;
pub mod perps;

pub use order_fill::{OrderFillEndpoints, SpotEndpoints};
pub use perps::PerpsEndpoints;
