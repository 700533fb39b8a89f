//! Instrument catalogue models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::primitives::FundId;
use super::profile::null_as_default;

/// Default page size used by the Sharesies web app.
pub const DEFAULT_PER_PAGE: u32 = 60;

/// Filter criteria for the instrument search.
///
/// # Example
///
/// ```
/// use sharesies::models::InstrumentsRequest;
///
/// let request = InstrumentsRequest::builder()
///     .query("apple")
///     .per_page(20)
///     .build();
/// assert_eq!(request.page, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsRequest {
    /// 1-based page number
    pub page: u32,
    /// Results per page
    pub per_page: u32,
    /// Sort key (e.g. "relevance", "marketCap")
    pub sort: String,
    /// Window for the reported price change (e.g. "1d", "1y")
    pub price_change_time: String,
    /// Free-text search
    #[serde(default)]
    pub query: String,
    /// Restrict results to these instrument ids
    #[serde(default, deserialize_with = "null_as_default")]
    pub instruments: Vec<FundId>,
}

impl Default for InstrumentsRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: "relevance".to_string(),
            price_change_time: "1y".to_string(),
            query: String::new(),
            instruments: Vec::new(),
        }
    }
}

impl InstrumentsRequest {
    /// Start building a request from the defaults.
    pub fn builder() -> InstrumentsRequestBuilder {
        InstrumentsRequestBuilder::default()
    }

    /// A free-text search with default paging.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// The same filter for a different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Builder for [`InstrumentsRequest`].
#[derive(Debug, Default)]
pub struct InstrumentsRequestBuilder {
    request: InstrumentsRequest,
}

impl InstrumentsRequestBuilder {
    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.request.page = page;
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.request.per_page = per_page;
        self
    }

    /// Set the sort key.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.request.sort = sort.into();
        self
    }

    /// Set the price change window.
    pub fn price_change_time(mut self, window: impl Into<String>) -> Self {
        self.request.price_change_time = window.into();
        self
    }

    /// Set the free-text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = query.into();
        self
    }

    /// Restrict results to an instrument id.
    pub fn instrument(mut self, id: impl Into<FundId>) -> Self {
        self.request.instruments.push(id.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> InstrumentsRequest {
        self.request
    }
}

/// One page of instrument search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsResponse {
    /// Total matching instruments
    pub total: u32,
    /// Page returned (1-based)
    pub current_page: u32,
    /// Page size used
    pub results_per_page: u32,
    /// Number of pages available
    pub number_of_pages: u32,
    /// Instruments on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub instruments: Vec<Instrument>,
}

impl InstrumentsResponse {
    /// Whether a later page exists.
    pub fn has_more(&self) -> bool {
        self.current_page < self.number_of_pages
    }

    /// The next page number, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then(|| self.current_page + 1)
    }
}

/// A listed company, ETF or managed fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Fund id used for orders
    pub id: FundId,
    /// Ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Instrument type (e.g. "equity", "etf", "mf")
    #[serde(default)]
    pub instrument_type: Option<String>,
    /// URL slug on the web app
    #[serde(default)]
    pub url_slug: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Categories
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Last market price, as a decimal string
    #[serde(default)]
    pub market_price: Option<String>,
    /// When the market price was last checked
    #[serde(default)]
    pub market_last_check: Option<DateTime<Utc>>,
    /// Trading status (e.g. "active", "halt")
    #[serde(default)]
    pub trading_status: Option<String>,
    /// Exchange code
    #[serde(default)]
    pub exchange: Option<String>,
    /// Exchange country
    #[serde(default)]
    pub exchange_country: Option<String>,
    /// Risk rating, 1 to 7
    #[serde(default)]
    pub risk_rating: Option<i32>,
    /// Whether the instrument is flagged as volatile
    #[serde(default)]
    pub is_volatile: Option<bool>,
    /// Whether the instrument is recommended for kids accounts
    #[serde(default)]
    pub kids_recommended: Option<bool>,
    /// Market capitalisation
    #[serde(default)]
    pub market_cap: Option<i64>,
    /// Price/earnings ratio
    #[serde(default)]
    pub pe_ratio: Option<String>,
    /// Gross dividend yield
    #[serde(default)]
    pub gross_dividend_yield_percent: Option<String>,
    /// Annualised return
    #[serde(default)]
    pub annualised_return_percent: Option<String>,
    /// Company website
    #[serde(default)]
    pub website_url: Option<String>,
    /// CEO name
    #[serde(default)]
    pub ceo: Option<String>,
    /// Employee count
    #[serde(default)]
    pub employees: Option<i64>,
    /// Logo identifier
    #[serde(default)]
    pub logo_identifier: Option<String>,
    /// Logo URLs
    #[serde(default)]
    pub logos: Option<Logos>,
    /// Brand colour
    #[serde(default)]
    pub dominant_colour: Option<String>,
    /// Fund manager (managed funds only)
    #[serde(default)]
    pub asset_manager: Option<Value>,
    /// Fixed fee spread (managed funds only)
    #[serde(default)]
    pub fixed_fee_spread: Option<Value>,
    /// Management fee (managed funds only)
    #[serde(default)]
    pub management_fee_percent: Option<Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub legacy_image_url: Option<Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub pds_drive_id: Option<Value>,
}

/// Logo image URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Logos {
    pub wide: Option<String>,
    pub thumb: Option<String>,
    pub micro: Option<String>,
}
