//! Order placement example.
//!
//! This example prices a market buy and a market sell. The quotes are
//! printed but not submitted unless `SHARESIES_SUBMIT=1` is set.
//!
//! Run with: cargo run --example place_order -- <fund id>
//!
//! Reads `SHARESIES_USERNAME` and `SHARESIES_PASSWORD` from the environment.

use std::time::Duration;

use rust_decimal_macros::dec;
use sharesies::{with_deadline, Credentials, FundId, SharesiesClient};
use tokio::time::Instant;

#[tokio::main]
async fn main() -> sharesies::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let fund = FundId::new(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "b8b7ef58-b270-4762-a256-9d68aebc3e23".to_string()),
    );
    let submit = std::env::var("SHARESIES_SUBMIT").as_deref() == Ok("1");

    let client = SharesiesClient::login(Credentials::from_env()?).await?;

    println!("Pricing a $10.00 buy of {}...", fund);
    let deadline = Instant::now() + Duration::from_secs(15);
    let buy = with_deadline(deadline, client.orders().price_buy(&fund, dec!(10))).await?;

    println!("Buy quote:");
    println!("  Order: {:?}", buy.request);
    println!("  Expected fee: {}", buy.expected_fee);
    println!("  Total cost: {}", buy.total_cost.as_deref().unwrap_or("-"));
    for part in &buy.payment_breakdown {
        println!("  Paid from {} ({}): {}", part.kind, part.currency, part.target_amount);
    }

    println!("\nPricing a sell of 0.5 shares of {}...", fund);
    let sell = client.orders().price_sell(&fund, dec!(0.5)).await?;
    println!("Sell quote:");
    println!("  Order: {:?}", sell.request);
    println!("  Expected fee: {}", sell.expected_fee.as_deref().unwrap_or("-"));

    if !submit {
        println!("\n(Quotes not submitted - set SHARESIES_SUBMIT=1 to place the buy)");
        return Ok(());
    }

    println!("\nSubmitting buy...");
    let profile = client.orders().submit_buy(&buy).await?;
    println!("Order placed! Pending orders: {}", profile.orders.len());

    println!("Done!");
    Ok(())
}
