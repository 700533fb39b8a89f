//! Paginated stream for lazy iteration over API results.
//!
//! This module provides a [`PaginatedStream`] that implements the `Stream` trait,
//! fetching one page at a time and yielding its items individually.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use crate::Result;

/// One fetched page: its items and the number of the page after it.
#[derive(Debug)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Next page number to fetch, `None` on the last page.
    pub next_page: Option<u32>,
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchPage<T> = Box<dyn Fn(u32) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// A stream that lazily fetches pages from a paginated endpoint.
///
/// Each page request is independent; the stream holds no state beyond the
/// next page number. It stops after the last page or the first error.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use sharesies::models::InstrumentsRequest;
///
/// # async fn example(client: sharesies::SharesiesClient) -> sharesies::Result<()> {
/// let mut stream = client.instruments().stream(InstrumentsRequest::search("bank"));
///
/// while let Some(result) = stream.next().await {
///     let instrument = result?;
///     println!("{} {}", instrument.symbol, instrument.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page by number.
    fetch_page: FetchPage<T>,
    /// Items of the current page not yet yielded.
    current_items: VecDeque<T>,
    /// Next page to fetch, `None` once exhausted.
    next_page: Option<u32>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
}

impl<T: Send + 'static> PaginatedStream<T> {
    /// Create a stream starting at `first_page`.
    pub fn new<F>(first_page: u32, fetch_page: F) -> Self
    where
        F: Fn(u32) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: VecDeque::new(),
            next_page: Some(first_page),
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.current_items = page.items.into();
                        this.next_page = page.next_page;

                        if !this.current_items.is_empty() {
                            continue;
                        }

                        // An empty page ends the stream even if more are advertised
                        this.next_page = None;
                        return Poll::Ready(None);
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_page = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            if let Some(page) = this.next_page.take() {
                this.pending_fetch = Some((this.fetch_page)(page));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
