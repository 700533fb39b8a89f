//! # sharesies-rs
//!
//! An async Rust client for the Sharesies share-trading API.
//!
//! The client logs in, keeps the session alive and exposes the instrument
//! catalogue and the two-step buy/sell order flow.
//!
//! ## Features
//!
//! - **Authentication**: Password login with cookie-backed sessions and
//!   bearer-token refresh driven by a configurable [`RefreshPolicy`]
//! - **Instruments**: Catalogue search, one page at a time or as a stream
//! - **Orders**: Server-priced quotes for market buys and sells, submitted
//!   with a fresh idempotency key
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sharesies::{Credentials, SharesiesClient};
//! use sharesies::models::InstrumentsRequest;
//!
//! #[tokio::main]
//! async fn main() -> sharesies::Result<()> {
//!     let client = SharesiesClient::login(Credentials::new("me@example.com", "password")).await?;
//!
//!     let page = client
//!         .instruments()
//!         .list(&InstrumentsRequest::search("apple"))
//!         .await?;
//!     println!("Found {} instruments", page.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use sharesies::{Credentials, FundId, SharesiesClient};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> sharesies::Result<()> {
//!     let client = SharesiesClient::login(Credentials::from_env()?).await?;
//!     let fund = FundId::new("b8b7ef58-b270-4762-a256-9d68aebc3e23");
//!
//!     // Price the order first
//!     let quote = client.orders().price_buy(&fund, Decimal::new(10, 0)).await?;
//!     println!("Expected fee: {}", quote.expected_fee);
//!
//!     // Then submit the quote as received
//!     let profile = client.orders().submit_buy(&quote).await?;
//!     println!("Holdings: {}", profile.portfolio.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{Endpoints, FundId, UserId};
pub use client::{
    with_deadline, AuthScope, ClientConfig, ReauthFailurePolicy, RefreshPolicy, SharesiesClient,
};
pub use auth::{Credentials, Session};

/// Prelude module for convenient imports.
///
/// ```rust
/// use sharesies::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        Endpoints, FundId, UserId,
        // Identity
        Profile, UserSummary,
        // Instruments
        Instrument, InstrumentsRequest, InstrumentsResponse,
        // Orders
        BuyOrder, BuyQuote, PaymentBreakdown, SellOrder, SellQuote,
    };
    pub use crate::client::{
        with_deadline, ClientConfig, PaginatedStream, ReauthFailurePolicy, RefreshPolicy,
        SharesiesClient,
    };
    pub use crate::auth::{Credentials, Session};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_id_creation() {
        let fund = FundId::new("b8b7ef58-b270-4762-a256-9d68aebc3e23");
        assert_eq!(fund.as_str(), "b8b7ef58-b270-4762-a256-9d68aebc3e23");
    }

    #[test]
    fn test_default_endpoint_hosts() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.cost_buy().unwrap().as_str(),
            "https://app.sharesies.nz/api/order/cost-buy"
        );
        assert_eq!(
            endpoints.instruments().unwrap().as_str(),
            "https://data.sharesies.nz/api/v1/instruments"
        );
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.cookie_store);
        assert_eq!(config.reauth_failure, ReauthFailurePolicy::ClearSession);
        assert!(config.request_timeout.is_none());
    }
}
