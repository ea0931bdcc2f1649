//! Request parameters for the order, fill and perps endpoints

use enclave_types::{
    AccountWalletKey, OrderSide, OrderStatus, OrderType, PositionDirection, StopOrderType,
    TimeInForce, Wallet,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::RestResult;
use crate::params::{PagingAndTimeRange, QueryParams, TimeRange};
use crate::request::Query;
use crate::validate::{exactly_one, OneOf};

// ============================================================================
// Orders
// ============================================================================

/// Body of a new order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    pub market: String,
    /// Limit price, omitted for market orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Size in quote currency, for market buys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_size: Option<Decimal>,
    pub side: OrderSide,
    /// Size in base currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub post_only: bool,
}

impl AddOrderRequest {
    /// Limit order for `size` at `price`
    pub fn limit(market: impl Into<String>, side: OrderSide, price: Decimal, size: Decimal) -> Self {
        Self {
            client_order_id: None,
            market: market.into(),
            price: Some(price),
            quote_size: None,
            side,
            size: Some(size),
            order_type: OrderType::Limit,
            time_in_force: None,
            post_only: false,
        }
    }

    /// Market order for `size` in base currency
    pub fn market(market: impl Into<String>, side: OrderSide, size: Decimal) -> Self {
        Self {
            client_order_id: None,
            market: market.into(),
            price: None,
            quote_size: None,
            side,
            size: Some(size),
            order_type: OrderType::Market,
            time_in_force: None,
            post_only: false,
        }
    }

    /// Market order sized in quote currency
    pub fn market_quote(market: impl Into<String>, side: OrderSide, quote_size: Decimal) -> Self {
        Self {
            size: None,
            quote_size: Some(quote_size),
            ..Self::market(market, side, Decimal::ZERO)
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Only rest on the book, never take
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }
}

/// Filters for listing orders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrdersRequest {
    pub page: PagingAndTimeRange,
    pub market: Option<String>,
    pub status: Option<OrderStatus>,
}

impl GetOrdersRequest {
    pub fn market(market: impl Into<String>) -> Self {
        Self {
            market: Some(market.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page(mut self, page: PagingAndTimeRange) -> Self {
        self.page = page;
        self
    }
}

impl QueryParams for GetOrdersRequest {
    fn append_to(&self, query: &mut Query) {
        self.page.append_to(query);
        insert_market(query, self.market.as_deref());
        query.insert_opt("status", self.status.map(|s| s.as_str()));
    }
}

/// Filters for the orders CSV export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrdersCsvRequest {
    pub time_range: TimeRange,
    pub market: Option<String>,
    pub status: Option<OrderStatus>,
}

impl QueryParams for GetOrdersCsvRequest {
    fn append_to(&self, query: &mut Query) {
        self.time_range.append_to(query);
        insert_market(query, self.market.as_deref());
        query.insert_opt("status", self.status.map(|s| s.as_str()));
    }
}

/// Identifies one order, either by exchange ID or by client order ID
///
/// Exactly one of the two must be set; this is checked when the request is
/// made, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLookup {
    pub order_id: Option<String>,
    pub client_order_id: Option<String>,
}

impl OrderLookup {
    pub fn by_id(order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            client_order_id: None,
        }
    }

    pub fn by_client_id(client_order_id: impl Into<String>) -> Self {
        Self {
            order_id: None,
            client_order_id: Some(client_order_id.into()),
        }
    }

    /// Resolve to the single identifier that was given
    pub fn resolve(&self) -> RestResult<OrderRef<'_>> {
        let which = exactly_one(
            "orderId",
            self.order_id.as_deref(),
            "clientOrderId",
            self.client_order_id.as_deref(),
        )?;
        Ok(match which {
            OneOf::First(id) => OrderRef::Id(id),
            OneOf::Second(id) => OrderRef::ClientId(id),
        })
    }
}

/// A validated [`OrderLookup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRef<'a> {
    Id(&'a str),
    ClientId(&'a str),
}

// ============================================================================
// Fills
// ============================================================================

/// Filters for listing fills
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFillsRequest {
    pub page: PagingAndTimeRange,
    pub market: Option<String>,
}

impl GetFillsRequest {
    pub fn market(market: impl Into<String>) -> Self {
        Self {
            market: Some(market.into()),
            ..Default::default()
        }
    }
}

impl QueryParams for GetFillsRequest {
    fn append_to(&self, query: &mut Query) {
        self.page.append_to(query);
        insert_market(query, self.market.as_deref());
    }
}

/// Filters for the fills CSV export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFillsCsvRequest {
    pub time_range: TimeRange,
    pub market: Option<String>,
}

impl QueryParams for GetFillsCsvRequest {
    fn append_to(&self, query: &mut Query) {
        self.time_range.append_to(query);
        insert_market(query, self.market.as_deref());
    }
}

// ============================================================================
// Perps
// ============================================================================

/// Body of a transfer between the main and margin wallets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TransferBody<'a> {
    pub symbol: &'a str,
    pub amount: Decimal,
    pub from: AccountWalletKey,
    pub to: AccountWalletKey,
}

impl<'a> TransferBody<'a> {
    /// Positive amounts move main -> margin, negative margin -> main
    pub fn new(symbol: &'a str, amount: Decimal) -> Self {
        let (from, to) = if amount.is_sign_negative() && !amount.is_zero() {
            (Wallet::Margin, Wallet::Main)
        } else {
            (Wallet::Main, Wallet::Margin)
        };
        Self {
            symbol,
            amount,
            from: AccountWalletKey::wallet(from),
            to: AccountWalletKey::wallet(to),
        }
    }
}

/// Body of a stop loss or take profit order on a position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStopOrderRequest {
    pub market: String,
    pub position_direction: PositionDirection,
    #[serde(rename = "type")]
    pub stop_type: StopOrderType,
    pub trigger_price: Decimal,
}

impl SetStopOrderRequest {
    pub fn new(
        market: impl Into<String>,
        position_direction: PositionDirection,
        stop_type: StopOrderType,
        trigger_price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            position_direction,
            stop_type,
            trigger_price,
        }
    }
}

fn insert_market(query: &mut Query, market: Option<&str>) {
    if let Some(market) = market.filter(|m| !m.is_empty()) {
        query.insert("market", market);
    }
}
