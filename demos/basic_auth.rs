//! Basic authentication example.
//!
//! This example logs in to Sharesies and prints the account snapshot that
//! comes back with the session.
//!
//! Run with: cargo run --example basic_auth
//!
//! Reads `SHARESIES_USERNAME` and `SHARESIES_PASSWORD` from the environment.

use sharesies::{Credentials, SharesiesClient};

#[tokio::main]
async fn main() -> sharesies::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = Credentials::from_env()?;

    println!("Logging in as {}...", credentials.username());
    let client = SharesiesClient::login(credentials).await?;
    println!("Successfully authenticated!");

    if let Some(session) = client.session().await {
        println!("Acting as: {}", session.acting_as()?);
        match session.expires_at() {
            Some(at) => println!("Token expires at: {}", at),
            None => println!("Token carries no expiry"),
        }
    }

    // The session check goes through the cookie jar
    let profile = client.identity().profile().await?;

    println!("\nIdentities:");
    for user in &profile.user_list {
        println!(
            "  - {} ({})",
            user.id,
            user.preferred_name.as_deref().unwrap_or("no name")
        );
    }

    if let Some(balances) = profile.user.as_ref().and_then(|u| u.wallet_balances.as_ref()) {
        println!("\nWallet:");
        println!("  NZD: {}", balances.nzd.as_deref().unwrap_or("-"));
        println!("  AUD: {}", balances.aud.as_deref().unwrap_or("-"));
        println!("  USD: {}", balances.usd.as_deref().unwrap_or("-"));
    }

    println!("\nHoldings: {}", profile.portfolio.len());
    for holding in &profile.portfolio {
        println!(
            "  - {}: {} shares, value {}",
            holding.fund_id,
            holding.shares.as_deref().unwrap_or("?"),
            holding.value.as_deref().unwrap_or("?")
        );
    }

    println!("\nDone!");
    Ok(())
}
