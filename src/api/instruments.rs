//! Instruments service for searching the tradable catalogue.

use std::sync::Arc;

use crate::client::{AuthScope, ClientInner, Page, PaginatedStream};
use crate::models::{Instrument, InstrumentsRequest, InstrumentsResponse};
use crate::Result;

/// Service for instrument catalogue operations.
///
/// # Example
///
/// ```no_run
/// use sharesies::models::InstrumentsRequest;
///
/// # async fn example(client: sharesies::SharesiesClient) -> sharesies::Result<()> {
/// let request = InstrumentsRequest::builder()
///     .query("apple")
///     .per_page(60)
///     .build();
///
/// let page = client.instruments().list(&request).await?;
/// for instrument in &page.instruments {
///     println!("{}: {}", instrument.symbol, instrument.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct InstrumentsService {
    inner: Arc<ClientInner>,
}

impl InstrumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch one page of instruments matching `request`.
    ///
    /// Requires a session; without one this fails with
    /// [`Error::NotAuthenticated`](crate::Error::NotAuthenticated) and sends
    /// nothing.
    pub async fn list(&self, request: &InstrumentsRequest) -> Result<InstrumentsResponse> {
        fetch_page(&self.inner, request).await
    }

    /// Stream every instrument matching `request`, starting at its page.
    ///
    /// The stream ends after the last page, or as soon as the server answers
    /// with a page other than the one requested.
    pub fn stream(&self, request: InstrumentsRequest) -> PaginatedStream<Instrument> {
        let inner = self.inner.clone();
        let first_page = request.page;

        PaginatedStream::new(first_page, move |page| {
            let inner = inner.clone();
            let request = request.with_page(page);

            Box::pin(async move {
                let response = fetch_page(&inner, &request).await?;
                if response.current_page != page {
                    // A server that ignores the page field would repeat itself forever
                    tracing::warn!(
                        requested = page,
                        returned = response.current_page,
                        "instrument search returned a different page, ending stream"
                    );
                    return Ok(Page {
                        items: Vec::new(),
                        next_page: None,
                    });
                }
                Ok(Page {
                    next_page: response.next_page(),
                    items: response.instruments,
                })
            })
        })
    }
}

async fn fetch_page(inner: &ClientInner, request: &InstrumentsRequest) -> Result<InstrumentsResponse> {
    let session = inner.authorize(AuthScope::Read).await?;
    inner
        .post(
            inner.config.endpoints.instruments()?,
            Some(session.bearer_token()),
            request,
        )
        .await
}
