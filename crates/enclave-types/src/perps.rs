//! Perpetual futures account and market models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{PositionDirection, TransferType, Wallet};

/// A single open position in a perps market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Perps market, e.g. "BTC-USD.P"
    pub market: String,
    pub direction: PositionDirection,
    pub net_quantity: Decimal,
    pub average_entry_price: Decimal,
    pub used_margin: Decimal,
    /// Positive is profit, negative is loss
    pub unrealized_pnl: Decimal,
    pub mark_price: Decimal,
    pub liquidation_price: Decimal,
    pub bankruptcy_price: Decimal,
    pub maintenance_margin: Decimal,
    /// Stop loss trigger price, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    /// Take profit trigger price, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
}

/// Margin account summary, all amounts in USDC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub wallet_balance: Decimal,
    pub withdrawable_margin: Decimal,
    pub realized_pnl: Decimal,
    /// Unrealized PnL at mark price for open positions
    pub unrealized_pnl: Decimal,
    pub used_margin: Decimal,
    pub available_margin: Decimal,
    pub margin_balance: Decimal,
    /// Margin ratio as a percentage
    pub margin_ratio: Decimal,
    /// Effective leverage for the account
    pub leverage: Decimal,
    pub under_liquidation: bool,
}

/// Account and wallet on one side of a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWalletKey {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub wallet: Wallet,
}

impl AccountWalletKey {
    /// Own account, given wallet
    pub fn wallet(wallet: Wallet) -> Self {
        Self {
            id: String::new(),
            wallet,
        }
    }
}

/// A transfer between wallets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub from: AccountWalletKey,
    pub to: AccountWalletKey,
    pub amount: Decimal,
    /// Symbol transferred, e.g. "USDC"
    pub symbol: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub transfer_type: TransferType,
}

/// Current mark price for a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPrice {
    pub pair: String,
    pub price: Decimal,
    pub time: DateTime<Utc>,
}

/// Estimated or historical funding rate for a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    pub market: String,
    pub rate: Decimal,
    /// When the funding interval ends
    pub interval_ends: DateTime<Utc>,
}

/// A funding payment made or received in a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingFee {
    pub market: String,
    pub rate: Decimal,
    pub time: DateTime<Utc>,
    /// USDC moved: positive if earned, negative if paid
    pub amount: Decimal,
    /// Side that paid the fee
    pub payer: PositionDirection,
    pub mark_price: Decimal,
    pub position_size: Decimal,
    pub position_direction: PositionDirection,
}

impl FundingFee {
    /// True when this account received the payment
    pub fn is_earned(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

/// Stop loss / take profit configuration for a position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOrder {
    pub market: String,
    pub position_direction: PositionDirection,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,
}

/// Open interest in a perps market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterest {
    pub market: String,
    /// Base size
    pub open_interest: Decimal,
    /// Value at the current mark price
    pub notional_value: Decimal,
}

/// 24 hour traded volume in base size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub market: String,
    pub volume: Decimal,
}
