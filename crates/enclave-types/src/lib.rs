//! Shared data models for the Enclave REST API
//!
//! This crate holds the request and response shapes used by `enclave-rest`.
//! It has no networking dependencies and can be used on its own to decode
//! payloads captured elsewhere.
//!
//! # Key Types
//!
//! - [`Order`], [`Fill`], [`OrderBook`] - Spot and perps order flow
//! - [`Position`], [`Balance`], [`Transfer`] - Perps margin account
//! - [`FundingRate`], [`FundingFee`], [`MarkPrice`] - Perps funding data
//! - [`StopOrder`], [`OpenInterest`], [`Volume`] - Perps risk and market stats
//! - [`OrderSide`], [`OrderType`], [`OrderStatus`], [`TimeInForce`] - Order enums

pub mod enums;
pub mod hello;
pub mod order;
pub mod perps;

pub use enums::*;
pub use hello::*;
pub use order::*;
pub use perps::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;

/// Build a spot trading pair name such as `AVAX-USDC`
pub fn trading_pair(base: &str, quote: &str) -> String {
    format!("{}-{}", base, quote)
}
