//! Authentication and session management for the Sharesies API.
//!
//! Sharesies issues short-lived bearer tokens. The client logs in once with
//! [`Credentials`], keeps the password, and re-authenticates on its own before
//! privileged calls according to the configured
//! [`RefreshPolicy`](crate::client::RefreshPolicy).
//!
//! ```no_run
//! use sharesies::{Credentials, SharesiesClient};
//!
//! # async fn example() -> sharesies::Result<()> {
//! let client = SharesiesClient::new()?;
//! let profile = client
//!     .identity()
//!     .authenticate(Credentials::new("me@example.com", "password"))
//!     .await?;
//! println!("Logged in, {} identities", profile.user_list.len());
//! # Ok(())
//! # }
//! ```

mod session;
mod token;

pub use session::{Credentials, Session};
pub use token::TokenClaims;

