//! Order and fill endpoints shared by spot and perps
//!
//! Spot routes live under `/v1`, perps routes under `/v1/perps`; the
//! shapes are otherwise identical.

use enclave_types::{Fill, Order, OrderBook};
use tracing::{debug, instrument};

use crate::dispatcher::Dispatcher;
use crate::envelope::Page;
use crate::error::RestResult;
use crate::params::QueryParams;
use crate::request::Query;
use crate::response;
use crate::types::{
    AddOrderRequest, GetFillsCsvRequest, GetFillsRequest, GetOrdersCsvRequest, GetOrdersRequest,
    OrderLookup, OrderRef,
};
use crate::validate::required;

const SPOT_PREFIX: &str = "/v1";
const PERPS_PREFIX: &str = "/v1/perps";

/// Order and fill endpoints under one route prefix
#[derive(Debug, Clone, Copy)]
pub struct OrderFillEndpoints<'a> {
    dispatcher: &'a Dispatcher,
    prefix: &'static str,
}

/// Spot order and fill endpoints
pub type SpotEndpoints<'a> = OrderFillEndpoints<'a>;

impl<'a> OrderFillEndpoints<'a> {
    /// Spot routes (`/v1/...`)
    pub fn spot(dispatcher: &'a Dispatcher) -> Self {
        Self {
            dispatcher,
            prefix: SPOT_PREFIX,
        }
    }

    /// Perps routes (`/v1/perps/...`)
    pub fn perps(dispatcher: &'a Dispatcher) -> Self {
        Self {
            dispatcher,
            prefix: PERPS_PREFIX,
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    fn order_path(&self, lookup: &OrderLookup) -> RestResult<String> {
        Ok(match lookup.resolve()? {
            OrderRef::Id(id) => self.path(&format!("/orders/{}", id)),
            OrderRef::ClientId(id) => self.path(&format!("/orders/client:{}", id)),
        })
    }

    /// Place a new order
    ///
    /// # Returns
    /// The order as accepted by the exchange
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side, order_type = %order.order_type))]
    pub async fn add_order(&self, order: &AddOrderRequest) -> RestResult<Order> {
        let response = self.dispatcher.post_json(&self.path("/orders"), order).await?;
        let order: Order = response::decode(response).await?;
        debug!(order_id = %order.order_id, "Order placed");
        Ok(order)
    }

    /// List orders matching the filters, one page at a time
    #[instrument(skip(self))]
    pub async fn get_orders(&self, request: &GetOrdersRequest) -> RestResult<Page<Order>> {
        let response = self
            .dispatcher
            .get(&self.path("/orders"), request.to_query())
            .await?;
        response::decode_page(response).await
    }

    /// Get one order by exchange ID or client order ID
    #[instrument(skip(self))]
    pub async fn get_order(&self, lookup: &OrderLookup) -> RestResult<Order> {
        let path = self.order_path(lookup)?;
        let response = self.dispatcher.get(&path, Query::new()).await?;
        response::decode(response).await
    }

    /// Export orders as CSV
    #[instrument(skip(self))]
    pub async fn get_orders_csv(&self, request: &GetOrdersCsvRequest) -> RestResult<String> {
        let response = self
            .dispatcher
            .get(&self.path("/orders/csv"), request.to_query())
            .await?;
        response::read_text(response).await
    }

    /// Cancel one order by exchange ID or client order ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, lookup: &OrderLookup) -> RestResult<Order> {
        let path = self.order_path(lookup)?;
        let response = self.dispatcher.delete(&path, Query::new()).await?;
        response::decode(response).await
    }

    /// Cancel all open orders, optionally only in `market`
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self, market: Option<&str>) -> RestResult<()> {
        let query = Query::new().with_opt("market", market.filter(|m| !m.is_empty()));
        let response = self.dispatcher.delete(&self.path("/orders"), query).await?;
        response::decode_unit(response).await
    }

    /// Order book for `market`, optionally limited to `depth` levels
    #[instrument(skip(self))]
    pub async fn get_depth(&self, market: &str, depth: Option<u32>) -> RestResult<OrderBook> {
        let market = required("market", Some(market))?;
        let query = Query::new()
            .with("market", market)
            .with_opt("depth", depth.filter(|d| *d != 0));
        let response = self.dispatcher.get(&self.path("/depth"), query).await?;
        response::decode(response).await
    }

    /// List fills matching the filters
    #[instrument(skip(self))]
    pub async fn get_fills(&self, request: &GetFillsRequest) -> RestResult<Vec<Fill>> {
        let response = self
            .dispatcher
            .get(&self.path("/fills"), request.to_query())
            .await?;
        response::decode_or_default(response).await
    }

    /// Fills for one order by exchange ID or client order ID
    #[instrument(skip(self))]
    pub async fn get_fills_by_id(&self, lookup: &OrderLookup) -> RestResult<Vec<Fill>> {
        let path = match lookup.resolve()? {
            OrderRef::Id(id) => self.path(&format!("/orders/{}/fills", id)),
            OrderRef::ClientId(id) => self.path(&format!("/fills/client:{}", id)),
        };
        let response = self.dispatcher.get(&path, Query::new()).await?;
        response::decode_or_default(response).await
    }

    /// Export fills as CSV
    #[instrument(skip(self))]
    pub async fn get_fills_csv(&self, request: &GetFillsCsvRequest) -> RestResult<String> {
        let response = self
            .dispatcher
            .get(&self.path("/fills/csv"), request.to_query())
            .await?;
        response::read_text(response).await
    }
}
