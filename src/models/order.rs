//! Order models: intents, quotes and execution requests.
//!
//! Trading is two-phase. A quote call prices an order intent and returns a
//! [`BuyQuote`] or [`SellQuote`]; the execution call echoes that quote back
//! with a fresh [`IdempotencyKey`]. Amounts travel as decimal strings.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::primitives::{FundId, IdempotencyKey, UserId};
use super::profile::null_as_default;
use crate::{Error, Result};

/// Buy a currency amount's worth at market price.
pub const ORDER_TYPE_DOLLAR_MARKET: &str = "dollar_market";
/// Sell a number of shares at market price.
pub const ORDER_TYPE_SHARE_MARKET: &str = "share_market";

/// Decimal places of a currency amount on the wire.
pub const CURRENCY_DECIMALS: u32 = 2;
/// Decimal places of a share quantity on the wire.
pub const SHARE_DECIMALS: u32 = 6;

/// Format a positive currency amount with exactly two decimal places.
///
/// ```
/// use rust_decimal::Decimal;
/// use sharesies::models::format_currency_amount;
///
/// assert_eq!(format_currency_amount(Decimal::from(10)).unwrap(), "10.00");
/// ```
pub fn format_currency_amount(amount: Decimal) -> Result<String> {
    format_fixed(amount, CURRENCY_DECIMALS, "currency amount")
}

/// Format a positive share quantity with exactly six decimal places.
///
/// ```
/// use rust_decimal::Decimal;
/// use sharesies::models::format_share_amount;
///
/// assert_eq!(format_share_amount(Decimal::new(25, 1)).unwrap(), "2.500000");
/// ```
pub fn format_share_amount(shares: Decimal) -> Result<String> {
    format_fixed(shares, SHARE_DECIMALS, "share amount")
}

fn format_fixed(value: Decimal, places: u32, what: &str) -> Result<String> {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "{} must be positive after rounding to {} places, got {}",
            what, places, value
        )));
    }
    rounded.rescale(places);
    // rescale keeps a smaller scale when the value has too many integer digits
    if rounded.scale() != places {
        return Err(Error::InvalidInput(format!(
            "{} {} is too large to carry {} decimal places",
            what, value, places
        )));
    }
    Ok(rounded.to_string())
}

/// The order part of a buy intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyOrder {
    /// Order type, e.g. [`ORDER_TYPE_DOLLAR_MARKET`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount to spend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_amount: Option<String>,
    /// Number of shares to buy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_amount: Option<String>,
    /// Fields added by the server, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuyOrder {
    /// Buy `amount` worth of a fund at market price.
    pub fn dollar_market(amount: Decimal) -> Result<Self> {
        Ok(Self {
            kind: ORDER_TYPE_DOLLAR_MARKET.to_string(),
            currency_amount: Some(format_currency_amount(amount)?),
            share_amount: None,
            extra: Map::new(),
        })
    }
}

/// The order part of a sell intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrder {
    /// Order type, e.g. [`ORDER_TYPE_SHARE_MARKET`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Number of shares to sell
    pub share_amount: String,
    /// Fields added by the server, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SellOrder {
    /// Sell `shares` of a fund at market price.
    pub fn share_market(shares: Decimal) -> Result<Self> {
        Ok(Self {
            kind: ORDER_TYPE_SHARE_MARKET.to_string(),
            share_amount: format_share_amount(shares)?,
            extra: Map::new(),
        })
    }
}

/// How an order will be paid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Payment currency (e.g. "nzd")
    pub currency: String,
    /// Amount drawn, as a decimal string
    pub target_amount: String,
    /// Payment source (e.g. "direct")
    #[serde(rename = "type")]
    pub kind: String,
    /// Fields added by the server, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A priced buy order.
///
/// Pass it unchanged to [`OrdersService::submit_buy`](crate::api::OrdersService::submit_buy).
/// The server decides whether a stale quote is still honoured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyQuote {
    /// Fund being bought
    pub fund_id: FundId,
    /// Fee the server expects to charge
    pub expected_fee: String,
    /// How the order is funded
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_breakdown: Vec<PaymentBreakdown>,
    /// The order as the server priced it
    pub request: BuyOrder,
    /// Total cost including fee
    #[serde(default)]
    pub total_cost: Option<String>,
    /// Response type tag
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl BuyQuote {
    /// Total cost as a decimal, when present and well-formed.
    pub fn total_cost_decimal(&self) -> Option<Decimal> {
        self.total_cost.as_deref().and_then(|s| s.parse().ok())
    }
}

/// A priced sell order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellQuote {
    /// Fund being sold
    pub fund_id: FundId,
    /// The order as the server priced it
    pub request: SellOrder,
    /// Fee the server expects to charge
    #[serde(default)]
    pub expected_fee: Option<String>,
    /// How the proceeds are paid out
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_breakdown: Vec<PaymentBreakdown>,
    /// Expected proceeds
    #[serde(default)]
    pub total_cost: Option<String>,
    /// Response type tag
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

#[derive(Debug, Serialize)]
pub(crate) struct CostBuyRequest<'a> {
    pub fund_id: &'a FundId,
    pub acting_as_id: &'a UserId,
    pub order: &'a BuyOrder,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBuyRequest<'a> {
    pub fund_id: &'a FundId,
    pub acting_as_id: &'a UserId,
    pub order: &'a BuyOrder,
    pub idempotency_key: IdempotencyKey,
    pub payment_breakdown: &'a [PaymentBreakdown],
    pub expected_fee: &'a str,
}

impl<'a> CreateBuyRequest<'a> {
    pub(crate) fn from_quote(quote: &'a BuyQuote, acting_as_id: &'a UserId) -> Self {
        Self {
            fund_id: &quote.fund_id,
            acting_as_id,
            order: &quote.request,
            idempotency_key: IdempotencyKey::generate(),
            payment_breakdown: &quote.payment_breakdown,
            expected_fee: &quote.expected_fee,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CostSellRequest<'a> {
    pub fund_id: &'a FundId,
    pub acting_as_id: &'a UserId,
    pub order: &'a SellOrder,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSellRequest<'a> {
    pub fund_id: &'a FundId,
    pub acting_as_id: &'a UserId,
    pub order: &'a SellOrder,
    pub idempotency_key: IdempotencyKey,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub payment_breakdown: &'a [PaymentBreakdown],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_fee: Option<&'a str>,
}

impl<'a> CreateSellRequest<'a> {
    pub(crate) fn from_quote(quote: &'a SellQuote, acting_as_id: &'a UserId) -> Self {
        Self {
            fund_id: &quote.fund_id,
            acting_as_id,
            order: &quote.request,
            idempotency_key: IdempotencyKey::generate(),
            payment_breakdown: &quote.payment_breakdown,
            expected_fee: quote.expected_fee.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_currency_amount_two_places() {
        assert_eq!(format_currency_amount(dec!(10)).unwrap(), "10.00");
        assert_eq!(format_currency_amount(dec!(10.5)).unwrap(), "10.50");
        assert_eq!(format_currency_amount(dec!(0.125)).unwrap(), "0.13");
        assert_eq!(format_currency_amount(dec!(1234.5678)).unwrap(), "1234.57");
    }

    #[test]
    fn test_share_amount_six_places() {
        assert_eq!(format_share_amount(dec!(2.5)).unwrap(), "2.500000");
        assert_eq!(format_share_amount(dec!(3)).unwrap(), "3.000000");
        assert_eq!(format_share_amount(dec!(0.1234565)).unwrap(), "0.123457");
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        assert!(matches!(format_currency_amount(dec!(0)), Err(Error::InvalidInput(_))));
        assert!(matches!(format_currency_amount(dec!(-5)), Err(Error::InvalidInput(_))));
        assert!(matches!(format_currency_amount(dec!(0.001)), Err(Error::InvalidInput(_))));
        assert!(matches!(format_share_amount(dec!(0.0000001)), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_amounts_too_large_for_fixed_scale_rejected() {
        let huge_shares = Decimal::from_i128_with_scale(10_i128.pow(23), 0);
        assert!(matches!(format_share_amount(huge_shares), Err(Error::InvalidInput(_))));
        assert!(matches!(format_currency_amount(Decimal::MAX), Err(Error::InvalidInput(_))));
        assert!(matches!(BuyOrder::dollar_market(Decimal::MAX), Err(Error::InvalidInput(_))));

        let largest_shares = Decimal::from_i128_with_scale(10_i128.pow(22), 0);
        assert_eq!(
            format_share_amount(largest_shares).unwrap(),
            "10000000000000000000000.000000"
        );
    }

    #[test]
    fn test_buy_intent_wire_shape() {
        let order = BuyOrder::dollar_market(dec!(10)).unwrap();
        let body = CostBuyRequest {
            fund_id: &FundId::new("FUND_1"),
            acting_as_id: &UserId::new("USER_ID"),
            order: &order,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "fund_id": "FUND_1",
                "acting_as_id": "USER_ID",
                "order": {"type": "dollar_market", "currency_amount": "10.00"}
            })
        );
    }

    #[test]
    fn test_create_buy_echoes_quote() {
        let quote: BuyQuote = serde_json::from_value(json!({
            "expected_fee": "0.05",
            "fund_id": "FUND_1",
            "payment_breakdown": [
                {"currency": "nzd", "target_amount": "10.05", "type": "direct", "fx_rate": "1"}
            ],
            "request": {"type": "dollar_market", "currency_amount": "10.00", "limit": null},
            "total_cost": "10.05",
            "type": "cost_buy"
        }))
        .unwrap();
        let actor = UserId::new("USER_ID");

        let first = serde_json::to_value(CreateBuyRequest::from_quote(&quote, &actor)).unwrap();
        let second = serde_json::to_value(CreateBuyRequest::from_quote(&quote, &actor)).unwrap();

        assert_eq!(first["fund_id"], "FUND_1");
        assert_eq!(first["expected_fee"], "0.05");
        assert_eq!(
            first["payment_breakdown"],
            json!([{"currency": "nzd", "target_amount": "10.05", "type": "direct", "fx_rate": "1"}])
        );
        assert_eq!(
            first["order"],
            json!({"type": "dollar_market", "currency_amount": "10.00", "limit": null})
        );
        assert_ne!(first["idempotency_key"], second["idempotency_key"]);
        assert_eq!(quote.total_cost_decimal(), Some(dec!(10.05)));
    }

    #[test]
    fn test_create_sell_skips_absent_pricing() {
        let quote: SellQuote = serde_json::from_value(json!({
            "fund_id": "FUND_1",
            "request": {"type": "share_market", "share_amount": "2.500000"},
            "type": "cost_sell"
        }))
        .unwrap();
        let actor = UserId::new("USER_ID");

        let body = serde_json::to_value(CreateSellRequest::from_quote(&quote, &actor)).unwrap();
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("payment_breakdown"));
        assert!(!object.contains_key("expected_fee"));
        assert_eq!(body["order"]["share_amount"], "2.500000");
        assert!(body["idempotency_key"].is_string());
    }
}
