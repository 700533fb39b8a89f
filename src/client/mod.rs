//! HTTP client and service layer for the Sharesies API.
//!
//! This module provides the main entry point [`SharesiesClient`] for
//! interacting with the Sharesies API.
//!
//! # Example
//!
//! ```no_run
//! use sharesies::{Credentials, SharesiesClient};
//!
//! # async fn example() -> sharesies::Result<()> {
//! let client = SharesiesClient::login(Credentials::from_env()?).await?;
//!
//! let profile = client.identity().profile().await?;
//! println!("authenticated: {}", profile.authenticated);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{AuthScope, ClientConfig, ReauthFailurePolicy, RefreshPolicy, DEFAULT_USER_AGENT};
pub use http::{with_deadline, SharesiesClient};
pub use paginated::{Page, PaginatedStream};
pub(crate) use http::ClientInner;
