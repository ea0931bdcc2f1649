//! Perpetual futures endpoints
//!
//! Positions, the margin wallet, funding and stop orders. Order and fill
//! routes are shared with spot, see [`PerpsEndpoints::orders`].

use enclave_types::{
    Balance, FundingFee, FundingRate, MarkPrice, OpenInterest, Position, StopOrder, StopOrderType,
    Transfer, Volume,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::dispatcher::Dispatcher;
use crate::endpoints::OrderFillEndpoints;
use crate::envelope::Page;
use crate::error::RestResult;
use crate::params::{PagingAndTimeRange, QueryParams};
use crate::request::Query;
use crate::response;
use crate::types::{SetStopOrderRequest, TransferBody};
use crate::validate::required;

const POSITIONS: &str = "/v1/perps/positions";
const BALANCE: &str = "/v1/perps/balance";
const TRANSFERS: &str = "/v1/perps/transfers";
const MARK_PRICES: &str = "/v1/perps/mark_prices";
const FUNDING_RATES: &str = "/v1/perps/funding_rates";
const FUNDING_RATE_HISTORY: &str = "/v1/perps/funding_rate_history";
const FUNDING_FEES: &str = "/v1/perps/funding_fees";
const STOP_ORDER: &str = "/v1/perps/stop_order";
const OPEN_INTEREST: &str = "/v1/perps/open_interest";
const VOLUME: &str = "/v1/perps/volume";

/// Perpetual futures endpoints
#[derive(Debug, Clone, Copy)]
pub struct PerpsEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> PerpsEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Order and fill endpoints under `/v1/perps`
    pub fn orders(&self) -> OrderFillEndpoints<'a> {
        OrderFillEndpoints::perps(self.dispatcher)
    }

    /// Open positions
    #[instrument(skip(self))]
    pub async fn get_positions(&self) -> RestResult<Vec<Position>> {
        let response = self.dispatcher.get(POSITIONS, Query::new()).await?;
        response::decode_or_default(response).await
    }

    /// Margin account summary
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Balance> {
        let response = self.dispatcher.get(BALANCE, Query::new()).await?;
        response::decode(response).await
    }

    /// Move funds between the main and margin wallets
    ///
    /// # Arguments
    /// * `symbol` - Asset to move, e.g. "USDC"
    /// * `amount` - Positive moves main to margin, negative margin to main
    #[instrument(skip(self))]
    pub async fn transfer(&self, symbol: &str, amount: Decimal) -> RestResult<Transfer> {
        let symbol = required("symbol", Some(symbol))?;
        let body = TransferBody::new(symbol, amount);
        debug!(from = ?body.from.wallet, to = ?body.to.wallet, "Transferring between wallets");

        let response = self.dispatcher.post_json(TRANSFERS, &body).await?;
        response::decode(response).await
    }

    /// Past transfers
    #[instrument(skip(self))]
    pub async fn get_transfers(&self, page: &PagingAndTimeRange) -> RestResult<Vec<Transfer>> {
        let response = self.dispatcher.get(TRANSFERS, page.to_query()).await?;
        response::decode_or_default(response).await
    }

    /// Mark prices keyed by market
    #[instrument(skip(self))]
    pub async fn get_mark_prices(&self) -> RestResult<HashMap<String, MarkPrice>> {
        let response = self.dispatcher.get(MARK_PRICES, Query::new()).await?;
        response::decode_or_default(response).await
    }

    /// Current funding rate for `market`
    #[instrument(skip(self))]
    pub async fn get_funding_rates(&self, market: &str) -> RestResult<FundingRate> {
        let market = required("market", Some(market))?;
        let query = Query::new().with("market", market);
        let response = self.dispatcher.get(FUNDING_RATES, query).await?;
        response::decode(response).await
    }

    /// Past funding rates, optionally for one market
    #[instrument(skip(self))]
    pub async fn get_funding_rate_history(
        &self,
        market: Option<&str>,
        page: &PagingAndTimeRange,
    ) -> RestResult<Vec<FundingRate>> {
        let query = page
            .to_query()
            .with_opt("market", market.filter(|m| !m.is_empty()));
        let response = self.dispatcher.get(FUNDING_RATE_HISTORY, query).await?;
        response::decode_or_default(response).await
    }

    /// Funding payments for `market`, one page at a time
    #[instrument(skip(self))]
    pub async fn get_funding_fees(
        &self,
        market: &str,
        page: &PagingAndTimeRange,
    ) -> RestResult<Page<FundingFee>> {
        let market = required("market", Some(market))?;
        let query = page.to_query().with("market", market);
        let response = self.dispatcher.get(FUNDING_FEES, query).await?;
        response::decode_page(response).await
    }

    /// Stop loss and take profit orders on open positions
    #[instrument(skip(self))]
    pub async fn get_stop_orders(&self) -> RestResult<Vec<StopOrder>> {
        let response = self.dispatcher.get(STOP_ORDER, Query::new()).await?;
        response::decode_or_default(response).await
    }

    /// Set a stop loss or take profit on a position
    #[instrument(skip(self))]
    pub async fn set_stop_order(&self, request: &SetStopOrderRequest) -> RestResult<Vec<StopOrder>> {
        required("market", Some(request.market.as_str()))?;
        let response = self.dispatcher.post_json(STOP_ORDER, request).await?;
        response::decode_or_default(response).await
    }

    /// Remove stop orders in `market`, optionally only one kind
    #[instrument(skip(self))]
    pub async fn remove_stop_order(
        &self,
        market: &str,
        stop_type: Option<StopOrderType>,
    ) -> RestResult<Vec<StopOrder>> {
        let market = required("market", Some(market))?;
        let query = Query::new()
            .with("market", market)
            .with_opt("type", stop_type.map(|t| t.as_str()));
        let response = self.dispatcher.delete(STOP_ORDER, query).await?;
        response::decode_or_default(response).await
    }

    /// Open interest per market
    #[instrument(skip(self))]
    pub async fn get_open_interest(&self) -> RestResult<Vec<OpenInterest>> {
        let response = self.dispatcher.get(OPEN_INTEREST, Query::new()).await?;
        response::decode_or_default(response).await
    }

    /// 24 hour volume per market
    #[instrument(skip(self))]
    pub async fn get_volume(&self) -> RestResult<Vec<Volume>> {
        let response = self.dispatcher.get(VOLUME, Query::new()).await?;
        response::decode_or_default(response).await
    }
}
