//! Orders service for pricing and placing market orders.
//!
//! Trading is a two-step flow. A `price_*` call asks the server to quote
//! the order; the returned quote is then passed unchanged to the matching
//! `submit_*` call, which adds a fresh idempotency key and places the trade.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::{AuthScope, ClientInner};
use crate::models::order::{CostBuyRequest, CostSellRequest, CreateBuyRequest, CreateSellRequest};
use crate::models::{BuyOrder, BuyQuote, FundId, Profile, SellOrder, SellQuote};
use crate::Result;

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use rust_decimal::Decimal;
/// use sharesies::FundId;
///
/// # async fn example(client: sharesies::SharesiesClient) -> sharesies::Result<()> {
/// let fund = FundId::new("b8b7ef58-b270-4762-a256-9d68aebc3e23");
///
/// let quote = client.orders().price_buy(&fund, Decimal::new(10, 0)).await?;
/// println!("fee {} total {:?}", quote.expected_fee, quote.total_cost);
///
/// let profile = client.orders().submit_buy(&quote).await?;
/// println!("{} holdings", profile.portfolio.len());
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Quote a market buy of `amount` dollars of `fund_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `amount` is not positive
    /// - [`Error::NotAuthenticated`](crate::Error::NotAuthenticated) without a session
    /// - [`Error::NoIdentity`](crate::Error::NoIdentity) if the profile lists no identity
    pub async fn price_buy(&self, fund_id: &FundId, amount: Decimal) -> Result<BuyQuote> {
        let order = BuyOrder::dollar_market(amount)?;
        let session = self.inner.authorize(AuthScope::Trade).await?;
        let acting_as_id = session.acting_as()?;

        let body = CostBuyRequest {
            fund_id,
            acting_as_id,
            order: &order,
        };

        tracing::debug!(fund_id = %fund_id, amount = %amount, "pricing buy");
        self.inner
            .post(self.inner.config.endpoints.cost_buy()?, None, &body)
            .await
    }

    /// Quote a market sell of `shares` units of `fund_id`.
    pub async fn price_sell(&self, fund_id: &FundId, shares: Decimal) -> Result<SellQuote> {
        let order = SellOrder::share_market(shares)?;
        let session = self.inner.authorize(AuthScope::Trade).await?;
        let acting_as_id = session.acting_as()?;

        let body = CostSellRequest {
            fund_id,
            acting_as_id,
            order: &order,
        };

        tracing::debug!(fund_id = %fund_id, shares = %shares, "pricing sell");
        self.inner
            .post(self.inner.config.endpoints.cost_sell()?, None, &body)
            .await
    }

    /// Place the buy described by `quote`.
    ///
    /// The quote's order, payment breakdown and expected fee are sent back
    /// as received. Every call carries a new idempotency key, so submitting
    /// the same quote twice places two orders unless the server rejects the
    /// second.
    ///
    /// The returned profile replaces the one held by the session when it
    /// still lists the account's identities.
    pub async fn submit_buy(&self, quote: &BuyQuote) -> Result<Profile> {
        let session = self.inner.authorize(AuthScope::Trade).await?;
        let acting_as_id = session.acting_as()?;
        let body = CreateBuyRequest::from_quote(quote, acting_as_id);

        tracing::info!(
            fund_id = %quote.fund_id,
            idempotency_key = %body.idempotency_key,
            "submitting buy"
        );
        let profile: Profile = self
            .inner
            .post(self.inner.config.endpoints.create_buy()?, None, &body)
            .await?;

        self.inner.refresh_profile(&session, &profile).await;
        Ok(profile)
    }

    /// Place the sell described by `quote`.
    pub async fn submit_sell(&self, quote: &SellQuote) -> Result<Profile> {
        let session = self.inner.authorize(AuthScope::Trade).await?;
        let acting_as_id = session.acting_as()?;
        let body = CreateSellRequest::from_quote(quote, acting_as_id);

        tracing::info!(
            fund_id = %quote.fund_id,
            idempotency_key = %body.idempotency_key,
            "submitting sell"
        );
        let profile: Profile = self
            .inner
            .post(self.inner.config.endpoints.create_sell()?, None, &body)
            .await?;

        self.inner.refresh_profile(&session, &profile).await;
        Ok(profile)
    }
}
