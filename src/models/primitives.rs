//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around string identifiers
//! to prevent mixing up fund ids and user ids at compile time, plus the
//! [`Endpoints`] the client talks to.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A strongly-typed fund (instrument) identifier.
///
/// # Example
///
/// ```
/// use sharesies::FundId;
///
/// let fund = FundId::new("b8b7ef58-b270-4762-a256-9d68aebc3e23");
/// println!("Fund: {}", fund);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(String);

impl FundId {
    /// Create a new fund id from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the fund id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for FundId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FundId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed user (account identity) id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the user id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Client-generated token that stops a retried order submission from
/// executing twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Generate a fresh random (UUIDv4) key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const DEFAULT_APP_BASE_URL: &str = "https://app.sharesies.nz/";
const DEFAULT_DATA_BASE_URL: &str = "https://data.sharesies.nz/";

/// Hosts the client sends requests to.
///
/// Account, identity and order calls go to the app host; the instrument
/// catalogue lives on the data host.
///
/// # Example
///
/// ```
/// use sharesies::Endpoints;
///
/// let endpoints = Endpoints::default();
/// assert_eq!(
///     endpoints.login().unwrap().as_str(),
///     "https://app.sharesies.nz/api/identity/login"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// App host base URL, always ending in '/'
    app: String,
    /// Data host base URL, always ending in '/'
    data: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP_BASE_URL.to_string(),
            data: DEFAULT_DATA_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Build endpoints from custom app and data base URLs.
    ///
    /// Useful for pointing the client at a stub server.
    pub fn new(app_base_url: &str, data_base_url: &str) -> crate::Result<Self> {
        Ok(Self {
            app: parse_base(app_base_url)?,
            data: parse_base(data_base_url)?,
        })
    }

    /// Use a single host for both app and data calls.
    pub fn single_host(base_url: &str) -> crate::Result<Self> {
        Self::new(base_url, base_url)
    }

    /// Base URL of the app host.
    pub fn app_base_url(&self) -> &str {
        &self.app
    }

    /// Base URL of the data host.
    pub fn data_base_url(&self) -> &str {
        &self.data
    }

    /// `POST` login.
    pub fn login(&self) -> crate::Result<Url> {
        join(&self.app, "api/identity/login")
    }

    /// `GET` session check.
    pub fn identity_check(&self) -> crate::Result<Url> {
        join(&self.app, "api/identity/check")
    }

    /// `POST` re-authenticate.
    pub fn reauthenticate(&self) -> crate::Result<Url> {
        join(&self.app, "api/identity/reauthenticate")
    }

    /// `POST` instrument search.
    pub fn instruments(&self) -> crate::Result<Url> {
        join(&self.data, "api/v1/instruments")
    }

    /// `POST` price a buy order.
    pub fn cost_buy(&self) -> crate::Result<Url> {
        join(&self.app, "api/order/cost-buy")
    }

    /// `POST` execute a priced buy order.
    pub fn create_buy(&self) -> crate::Result<Url> {
        join(&self.app, "api/order/create-buy")
    }

    /// `POST` price a sell order.
    pub fn cost_sell(&self) -> crate::Result<Url> {
        join(&self.app, "api/order/cost-sell")
    }

    /// `POST` execute a priced sell order.
    pub fn create_sell(&self) -> crate::Result<Url> {
        join(&self.app, "api/order/create-sell")
    }
}

fn parse_base(raw: &str) -> crate::Result<String> {
    // Url::join drops the last path segment unless the base ends in '/'
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(crate::Error::Config(format!("not a base URL: {}", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.into())
}

fn join(base: &str, path: &str) -> crate::Result<Url> {
    Ok(Url::parse(base)?.join(path)?)
}
