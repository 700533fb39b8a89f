//! Instrument search example.
//!
//! This example searches the catalogue, first one page at a time and then
//! as a stream across every page.
//!
//! Run with: cargo run --example search_instruments -- apple
//!
//! Reads `SHARESIES_USERNAME` and `SHARESIES_PASSWORD` from the environment.

use futures_util::StreamExt;
use sharesies::models::InstrumentsRequest;
use sharesies::{Credentials, SharesiesClient};

#[tokio::main]
async fn main() -> sharesies::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "apple".to_string());

    let client = SharesiesClient::login(Credentials::from_env()?).await?;

    // First page only
    let request = InstrumentsRequest::builder()
        .query(&query)
        .sort("relevance")
        .price_change_time("1y")
        .build();
    let page = client.instruments().list(&request).await?;

    println!(
        "\"{}\": {} matches over {} page(s)",
        query, page.total, page.number_of_pages
    );
    for instrument in &page.instruments {
        println!(
            "  {:<8} {:<40} {}",
            instrument.symbol,
            instrument.name,
            instrument.market_price.as_deref().unwrap_or("-")
        );
    }

    // Every page, fetched lazily
    let smaller = InstrumentsRequest::builder().query(&query).per_page(10).build();
    let mut stream = client.instruments().stream(smaller);
    let mut count = 0;
    while let Some(instrument) = stream.next().await {
        let instrument = instrument?;
        count += 1;
        tracing::debug!(symbol = %instrument.symbol, id = %instrument.id, "streamed");
    }
    println!("\nStreamed {} instruments", count);

    Ok(())
}
