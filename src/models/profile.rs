//! Account profile models.
//!
//! The profile is the server's snapshot of the logged-in account. It comes
//! back from login, re-authentication, the session check and every order
//! submission. Apart from `authenticated`, `distill_token` and `user_list`
//! the client treats it as opaque data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::primitives::{FundId, UserId};

/// Deserialize `null` (or a missing field) as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Account snapshot returned by identity and order endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Whether the server considers this session authenticated
    #[serde(default, deserialize_with = "null_as_default")]
    pub authenticated: bool,
    /// Bearer token for the data host
    #[serde(default)]
    pub distill_token: Option<String>,
    /// Account identities reachable from this login; the first is the primary one
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_list: Vec<UserSummary>,
    /// Full record of the current user
    #[serde(default)]
    pub user: Option<User>,
    /// Current holdings
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio: Vec<Holding>,
    /// Recurring investment plan
    #[serde(default)]
    pub autoinvest_order: Option<AutoinvestOrder>,
    /// Feature flags enabled for the account
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Vec<String>,
    /// Live market data subscription status
    #[serde(default)]
    pub live_data: Option<LiveData>,
    /// Whether the NZX is currently open
    #[serde(default)]
    pub nzx_is_open: Option<bool>,
    /// When the NZX next opens
    #[serde(default)]
    pub nzx_next_open: Option<Quantum>,
    /// Session write deadline
    #[serde(default)]
    pub can_write_until: Option<Quantum>,
    /// Whether an address token may be entered
    #[serde(default)]
    pub can_enter_address_token: Option<bool>,
    /// Analytics id
    #[serde(default)]
    pub ga_id: Option<String>,
    /// Referral code
    #[serde(default)]
    pub referral_code: Option<String>,
    /// Profile type (e.g. "identity")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Participant ids
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<String>,
    /// Pending orders
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<Value>,
    /// Upcoming dividend payments
    #[serde(default, deserialize_with = "null_as_default")]
    pub upcoming_dividends: Vec<Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub outstanding_subscription: Option<Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub rakaia_token: Option<Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub rakaia_token_expiry: Option<Value>,
}

impl Profile {
    /// The identity orders are placed on behalf of.
    pub fn primary_identity(&self) -> Option<&UserSummary> {
        self.user_list.first()
    }
}

/// One account identity under a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: UserId,
    /// Preferred name
    #[serde(default)]
    pub preferred_name: Option<String>,
    /// Whether this is the login's own account
    #[serde(default)]
    pub primary: Option<bool>,
    /// Account state
    #[serde(default)]
    pub state: Option<String>,
}

/// A server timestamp wrapped as `{"$quantum": <millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantum {
    /// Raw value
    #[serde(rename = "$quantum")]
    pub quantum: i64,
}

/// Detailed user record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct User {
    pub id: Option<UserId>,
    pub email: Option<String>,
    pub preferred_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub account_frozen: Option<bool>,
    pub account_reference: Option<String>,
    pub account_restricted: Option<bool>,
    pub account_restricted_date: Option<Value>,
    pub address: Option<Address>,
    pub address_reject_reason: Option<Value>,
    pub address_state: Option<String>,
    pub checks: Option<Checks>,
    pub first_tax_year: Option<i32>,
    pub has_seen: Option<HasSeen>,
    pub holding_balance: Option<String>,
    pub home_currency: Option<String>,
    pub intercom: Option<String>,
    pub ird_number: Option<String>,
    pub is_dependent: Option<bool>,
    pub is_owner_prescribed: Option<bool>,
    pub jurisdiction: Option<String>,
    pub maximum_withdrawal_amount: Option<String>,
    pub minimum_wallet_balance: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_emails: Vec<Value>,
    pub pir: Option<String>,
    pub portfolio_id: Option<String>,
    pub prescribed_approved: Option<bool>,
    pub prescribed_participant: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub recent_searches: Vec<String>,
    pub seen_first_time_autoinvest: Option<bool>,
    pub seen_first_time_investor: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_residencies: Vec<TaxResidency>,
    pub tax_year: Option<i32>,
    pub tfn_number: Option<Value>,
    pub transfer_age: Option<Value>,
    pub transfer_age_passed: Option<bool>,
    pub us_equities_enabled: Option<bool>,
    pub us_tax_treaty_status: Option<String>,
    pub wallet_balances: Option<WalletBalances>,
}

/// Postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Address {
    pub components: Option<AddressComponents>,
    pub formatted: Option<String>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
}

/// Parsed address components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AddressComponents {
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub route: Option<String>,
    pub street_number: Option<String>,
    pub sublocality: Option<String>,
}

/// Onboarding checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Checks {
    pub address_entered: Option<bool>,
    pub address_verified: Option<bool>,
    pub dependent_declaration: Option<bool>,
    pub id_verified: Option<bool>,
    pub made_deposit: Option<bool>,
    pub prescribed_answered: Option<bool>,
    pub tax_questions: Option<bool>,
    pub tc_accepted: Option<bool>,
}

/// Which intro screens the user has dismissed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct HasSeen {
    pub au_shares_intro: Option<bool>,
    pub autoinvest: Option<bool>,
    pub companies: Option<bool>,
    pub exchange_investor: Option<bool>,
    pub funds: Option<bool>,
    pub investor: Option<bool>,
    pub limit_orders: Option<bool>,
    pub managed_funds_investor: Option<bool>,
    pub show_au_currency: Option<bool>,
}

/// A declared tax residency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TaxResidency {
    pub country: Option<String>,
    pub country_name: Option<String>,
    pub tin: Option<String>,
}

/// Cash wallet balances per currency, as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct WalletBalances {
    pub aud: Option<String>,
    pub nzd: Option<String>,
    pub usd: Option<String>,
}

/// A holding in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    /// Fund held
    pub fund_id: FundId,
    /// Number of shares, as a decimal string
    #[serde(default)]
    pub shares: Option<String>,
    /// Current value
    #[serde(default)]
    pub value: Option<String>,
    /// Value before tax
    #[serde(default)]
    pub gross_value: Option<String>,
    /// Amount contributed
    #[serde(default)]
    pub contribution: Option<String>,
    /// Currency of the holding
    #[serde(default)]
    pub currency: Option<String>,
    /// Tax owed on the holding
    #[serde(default)]
    pub current_tax_liability: Option<String>,
    /// Dividends received
    #[serde(default)]
    pub dividends: Option<String>,
    /// Holding type
    #[serde(default)]
    pub holding_type: Option<String>,
    /// Return in currency
    #[serde(default)]
    pub return_dollars: Option<String>,
    /// Return in percent
    #[serde(default)]
    pub return_percent: Option<String>,
    /// Risk rating, 1 to 7
    #[serde(default)]
    pub risk_rating: Option<i32>,
    /// Trading statistics
    #[serde(default)]
    pub stats: Option<HoldingStats>,
}

/// Lifetime trading statistics for a holding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct HoldingStats {
    pub capital_return: Option<String>,
    pub shares_bought: Option<String>,
    pub shares_sold: Option<String>,
    pub shares_transferred_in: Option<String>,
    pub shares_transferred_out: Option<String>,
    pub value_bought: Option<String>,
    pub value_sold: Option<String>,
    pub value_transferred_in: Option<String>,
    pub value_transferred_out: Option<String>,
}

/// Recurring investment plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AutoinvestOrder {
    #[serde(deserialize_with = "null_as_default")]
    pub allocations: Vec<Allocation>,
    pub amount: Option<String>,
    pub interval: Option<String>,
    pub last_failed_date: Option<Value>,
    pub next_date: Option<String>,
    pub premade_order_id: Option<Value>,
    pub state: Option<String>,
}

/// One fund's share of an autoinvest plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Allocation {
    pub allocation: String,
    pub fund_id: FundId,
}

/// Live data subscription state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct LiveData {
    pub eligible_for_free_month: Option<bool>,
    pub is_active: Option<bool>,
}
