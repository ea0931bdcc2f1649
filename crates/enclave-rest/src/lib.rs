//! Signed REST API client for the Enclave exchange
//!
//! Every request carries three headers: the API key ID, a millisecond
//! timestamp, and a lowercase hex HMAC-SHA256 over
//! `timestamp + METHOD + path[?query] + body`. The [`Dispatcher`] builds the
//! query string once and signs exactly the bytes it sends.
//!
//! # Features
//!
//! - **Dispatcher**: URL composition, signing, default JSON content type,
//!   per-request timeout and optional cancellation
//! - **Errors**: transport, API, undecodable and envelope failures are
//!   distinct [`RestError`] variants
//! - **Spot**: orders, fills, depth and CSV exports under `/v1`
//! - **Perps**: the same order routes under `/v1/perps`, plus positions,
//!   margin transfers, funding and stop orders
//!
//! # Example
//!
//! ```no_run
//! use enclave_rest::{AddOrderRequest, Credentials, EnclaveClient, Endpoint, OrderLookup};
//! use enclave_types::OrderSide;
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EnclaveClient::new(Credentials::from_env()?, Endpoint::Sandbox)?;
//!
//!     let order = AddOrderRequest::limit("AVAX-USDC", OrderSide::Buy, dec!(10), dec!(1))
//!         .with_client_order_id("my-order-1");
//!     let placed = client.spot().add_order(&order).await?;
//!
//!     client.spot().cancel_order(&OrderLookup::by_id(placed.order_id)).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod params;
pub mod request;
pub mod response;
pub mod types;
pub mod validate;

// Re-export main types
pub use client::EnclaveClient;
pub use dispatcher::{Dispatcher, DispatcherConfig, Endpoint};
pub use endpoints::{OrderFillEndpoints, PerpsEndpoints, SpotEndpoints};
pub use envelope::{Envelope, Page, PageInfo, PaginatedEnvelope};
pub use error::{RestError, RestResult, TransportError, TransportErrorKind};
pub use params::{Paging, PagingAndTimeRange, QueryParams, TimeRange};
pub use request::{HttpMethod, OutboundRequest, Query};
pub use types::{
    AddOrderRequest, GetFillsCsvRequest, GetFillsRequest, GetOrdersCsvRequest, GetOrdersRequest,
    OrderLookup, OrderRef, SetStopOrderRequest,
};
pub use validate::{exactly_one, required, OneOf, ValidationError};

pub use enclave_auth::Credentials;
