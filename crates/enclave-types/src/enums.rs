//! Order, position, stop-order and wallet enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order, rests at the given price
    #[default]
    Limit,
    /// Market order, executes immediately
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Resting on the book
    Open,
    /// Completely filled
    #[serde(rename = "fullyfilled")]
    FullyFilled,
    /// Canceled by the user or the exchange
    Canceled,
}

impl OrderStatus {
    /// Returns the status as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::FullyFilled => "fullyfilled",
            Self::Canceled => "canceled",
        }
    }

    /// Returns true if the order can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyFilled | Self::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTillCancelled => write!(f, "GTC"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
        }
    }
}

/// Direction of a perps position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionDirection {
    Long,
    Short,
}

impl PositionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for PositionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of perps stop order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopOrderType {
    /// Closes the position when price moves against it
    #[serde(rename = "stopLoss")]
    StopLoss,
    /// Closes the position when price reaches the target
    #[serde(rename = "takeProfit")]
    TakeProfit,
}

impl StopOrderType {
    /// Returns the type as used in payloads and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StopLoss => "stopLoss",
            Self::TakeProfit => "takeProfit",
        }
    }
}

impl fmt::Display for StopOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wallet a transfer moves funds between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wallet {
    /// Main spot wallet
    Main,
    /// Perps margin wallet
    Margin,
}

/// Transfer kind, encoded as an integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransferType {
    /// Between main and margin wallets
    #[default]
    Margin,
    /// Between sub-accounts
    SubAccount,
}

impl TryFrom<u8> for TransferType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Margin),
            1 => Ok(Self::SubAccount),
            other => Err(format!("unknown transfer type {}", other)),
        }
    }
}

impl From<TransferType> for u8 {
    fn from(value: TransferType) -> Self {
        match value {
            TransferType::Margin => 0,
            TransferType::SubAccount => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"fullyfilled\"").unwrap();
        assert_eq!(status, OrderStatus::FullyFilled);
        assert!(status.is_terminal());
        assert!(!OrderStatus::Open.is_terminal());
        assert_eq!(OrderStatus::Canceled.to_string(), "canceled");
    }

    #[test]
    fn test_time_in_force_serialization() {
        assert_eq!(
            serde_json::to_string(&TimeInForce::ImmediateOrCancel).unwrap(),
            "\"IOC\""
        );
        assert_eq!(TimeInForce::GoodTillCancelled.to_string(), "GTC");
    }

    #[test]
    fn test_stop_order_type_camel_case() {
        let kind: StopOrderType = serde_json::from_str("\"takeProfit\"").unwrap();
        assert_eq!(kind, StopOrderType::TakeProfit);
        assert_eq!(StopOrderType::StopLoss.as_str(), "stopLoss");
    }

    #[test]
    fn test_transfer_type_is_integer() {
        assert_eq!(serde_json::to_string(&TransferType::SubAccount).unwrap(), "1");
        let kind: TransferType = serde_json::from_str("0").unwrap();
        assert_eq!(kind, TransferType::Margin);
        assert!(serde_json::from_str::<TransferType>("7").is_err());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.to_string(), "sell");
    }
}
