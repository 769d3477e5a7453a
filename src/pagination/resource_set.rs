//! Lazy cursor-following iteration over every page of a listing

use super::page::{Page, PageMeta};
use crate::error::Result;
use crate::http::Transport;
use crate::list::PagedListOperation;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Records of a list operation across all of its pages
///
/// The next page is requested only once the current one is drained, so
/// fetches for one set never overlap. Consumed pages are dropped.
pub struct ResourceSet<T> {
    operation: PagedListOperation<T>,
    transport: Arc<dyn Transport>,
    records: std::vec::IntoIter<T>,
    meta: PageMeta,
    next_page_uri: Option<String>,
    pages_fetched: usize,
    yielded: usize,
    failed: bool,
}

impl<T: DeserializeOwned> ResourceSet<T> {
    /// Wrap the first page of a listing
    pub fn new(
        operation: PagedListOperation<T>,
        transport: Arc<dyn Transport>,
        page: Page<T>,
    ) -> Self {
        let (records, meta) = page.into_parts();
        Self {
            operation,
            transport,
            next_page_uri: meta.next_page_uri.clone(),
            records: records.into_iter(),
            meta,
            pages_fetched: 1,
            yielded: 0,
            failed: false,
        }
    }

    /// Next record, fetching the following page when needed
    ///
    /// Returns `None` once the listing is exhausted, the limit is
    /// reached, or after an error has been returned.
    pub async fn next(&mut self) -> Option<Result<T>> {
        loop {
            if self.failed || self.limit_reached() {
                return None;
            }

            if let Some(record) = self.records.next() {
                self.yielded += 1;
                return Some(Ok(record));
            }

            let uri = self.next_page_uri.take()?;
            debug!(
                "{} page {} exhausted, following {}",
                self.operation.resource().name,
                self.pages_fetched,
                uri
            );

            match self.operation.next_page(&uri, self.transport.as_ref()).await {
                Ok(page) => self.load(page),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }

    /// Collect every remaining record, failing on the first error
    pub async fn try_collect(mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while let Some(record) = self.next().await {
            out.push(record?);
        }
        Ok(out)
    }

    /// Adapt into a stream of records
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        futures::stream::unfold(self, |mut set| async move {
            let item = set.next().await?;
            Some((item, set))
        })
    }

    fn load(&mut self, page: Page<T>) {
        let (records, meta) = page.into_parts();
        self.records = records.into_iter();
        self.next_page_uri = meta.next_page_uri.clone();
        self.meta = meta;
        self.pages_fetched += 1;
    }
}

impl<T> ResourceSet<T> {
    /// Metadata of the page currently being read
    pub fn current_page_meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Number of pages fetched so far, including the first
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of records yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// The operation this set replays when following cursors
    pub fn operation(&self) -> &PagedListOperation<T> {
        &self.operation
    }

    fn limit_reached(&self) -> bool {
        self.operation
            .limit()
            .is_some_and(|limit| self.yielded >= limit)
    }
}

impl<T> std::fmt::Debug for ResourceSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSet")
            .field("resource", &self.operation.resource().name)
            .field("meta", &self.meta)
            .field("pages_fetched", &self.pages_fetched)
            .field("yielded", &self.yielded)
            .finish_non_exhaustive()
    }
}
