//! Perps walkthrough
//!
//! Reads positions and the margin balance, then moves 1 USDC into the
//! margin wallet and back out.
//!
//! Run: enclave_key=... enclave_secret=... cargo run --bin perps_walkthrough

use enclave_demos::{sandbox_client, show};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = sandbox_client("PERPS WALKTHROUGH")?;
    let perps = client.perps();

    show("Positions Retrieved", &perps.get_positions().await?);
    show("Balance Retrieved", &perps.get_balance().await?);

    show("Transfer Created", &perps.transfer("usdc", dec!(1)).await?);
    show("Transfer Created", &perps.transfer("usdc", dec!(-1)).await?);

    let balance = perps.get_balance().await?;
    println!(
        "Available margin {} (leverage {})",
        balance.available_margin, balance.leverage
    );

    Ok(())
}
