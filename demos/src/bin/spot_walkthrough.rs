//! Spot walkthrough
//!
//! Places a limit order, reads it back and cancels it, then trades three
//! market orders and prints the resulting fills and the order book.
//!
//! Run: enclave_key=... enclave_secret=... cargo run --bin spot_walkthrough

use enclave_demos::{sandbox_client, show};
use enclave_rest::{AddOrderRequest, GetFillsRequest, OrderLookup};
use enclave_types::{trading_pair, OrderSide};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = sandbox_client("SPOT WALKTHROUGH")?;
    let spot = client.spot();
    let market = trading_pair("AVAX", "USDC");

    let order = spot
        .add_order(&AddOrderRequest::limit(&market, OrderSide::Buy, dec!(1), dec!(1)))
        .await?;
    show("Order Created", &order);

    let lookup = OrderLookup::by_id(order.order_id.clone());
    show("Order Retrieved", &spot.get_order(&lookup).await?);
    show("Order Canceled", &spot.cancel_order(&lookup).await?);

    for side in [OrderSide::Sell, OrderSide::Buy, OrderSide::Sell] {
        let order = spot
            .add_order(&AddOrderRequest::market(&market, side, dec!(1)))
            .await?;
        show("Order Created", &order);
    }

    let fills = spot.get_fills(&GetFillsRequest::market(&market)).await?;
    show("Fills Retrieved", &fills);

    let depth = spot.get_depth(&market, None).await?;
    show("Depth Retrieved", &depth);

    Ok(())
}
