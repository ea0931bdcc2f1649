//! Orders, fills and order book snapshots shared by spot and perps

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{OrderSide, OrderStatus, OrderType, TimeInForce};

/// An order as reported by the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Exchange-assigned order ID
    pub order_id: String,
    /// Caller-assigned order ID, if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// Market, e.g. "AVAX-USDC" or "BTC-USD.P"
    pub market: String,
    pub side: OrderSide,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    pub status: OrderStatus,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub size: Decimal,
    #[serde(default)]
    pub filled_size: Decimal,
    #[serde(default)]
    pub filled_cost: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl Order {
    /// Size still resting on the book
    pub fn remaining_size(&self) -> Decimal {
        (self.size - self.filled_size).max(Decimal::ZERO)
    }

    /// Average fill price, if anything has filled
    pub fn average_fill_price(&self) -> Option<Decimal> {
        if self.filled_size.is_zero() {
            None
        } else {
            Some(self.filled_cost / self.filled_size)
        }
    }
}

/// A single execution against an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    /// Fill ID
    pub id: String,
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    pub market: String,
    pub side: OrderSide,
    pub price: Decimal,
    pub size: Decimal,
    pub filled_cost: Decimal,
    pub fee: Decimal,
    pub time: DateTime<Utc>,
}

/// One price level: `[price, size]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel(pub Decimal, pub Decimal);

impl BookLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn size(&self) -> Decimal {
        self.1
    }
}

/// Order book snapshot returned by the depth endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBook {
    /// Ask levels, best first
    #[serde(default)]
    pub asks: Vec<BookLevel>,
    /// Bid levels, best first
    #[serde(default)]
    pub bids: Vec<BookLevel>,
}

impl OrderBook {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(BookLevel::price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(BookLevel::price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()? + self.best_bid()?) / Decimal::TWO)
    }
}
