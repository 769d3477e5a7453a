//! The paginated list operation
//!
//! Builds the first request from a descriptor, path parameters and
//! filters; sends it; classifies the outcome; and follows server cursors
//! for later pages.

use super::descriptor::ResourceDescriptor;
use super::filter::ListFilter;
use crate::error::{ApiError, Error, RestError, Result};
use crate::http::{Request, Transport};
use crate::pagination::{Page, ResourceSet};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Page size sent when neither a page size nor a limit is given
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "PageSize";

/// Paging options shared by every list resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Records per page
    pub page_size: Option<u32>,
    /// Stop after this many records in total
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Page size to request
    ///
    /// An explicit page size wins; otherwise a limit below the maximum
    /// page size avoids over-fetching.
    pub fn effective_page_size(&self) -> u32 {
        match (self.page_size, self.limit) {
            (Some(size), _) => size,
            (None, Some(limit)) => u32::try_from(limit)
                .map_or(MAX_PAGE_SIZE, |l| l.min(MAX_PAGE_SIZE))
                .max(1),
            (None, None) => DEFAULT_PAGE_SIZE,
        }
    }
}

/// A configured, immutable list request for records of type `T`
pub struct PagedListOperation<T> {
    resource: &'static ResourceDescriptor,
    path: String,
    filter: ListFilter,
    options: ListOptions,
    _record: PhantomData<fn() -> T>,
}

impl<T> PagedListOperation<T> {
    /// Create an operation for `resource` under the given parent
    /// identifiers
    pub fn new(
        resource: &'static ResourceDescriptor,
        path_params: &[(&str, &str)],
        filter: impl Into<ListFilter>,
        options: ListOptions,
    ) -> Self {
        let filter = filter.into();
        for (name, _) in filter.set_values() {
            if !resource.accepts_filter(name) {
                warn!("{} list ignores unknown filter '{}'", resource.name, name);
            }
        }

        Self {
            resource,
            path: resource.render_path(path_params),
            filter,
            options,
            _record: PhantomData,
        }
    }

    /// A copy of this operation with a different filter
    #[must_use]
    pub fn with_filter(&self, filter: impl Into<ListFilter>) -> Self {
        Self::new_rendered(self.resource, self.path.clone(), filter.into(), self.options)
    }

    /// A copy of this operation with different paging options
    #[must_use]
    pub fn with_options(&self, options: ListOptions) -> Self {
        Self::new_rendered(self.resource, self.path.clone(), self.filter.clone(), options)
    }

    fn new_rendered(
        resource: &'static ResourceDescriptor,
        path: String,
        filter: ListFilter,
        options: ListOptions,
    ) -> Self {
        Self {
            resource,
            path,
            filter,
            options,
            _record: PhantomData,
        }
    }

    /// The resource being listed
    pub fn resource(&self) -> &'static ResourceDescriptor {
        self.resource
    }

    /// The rendered request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The filters
    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// The paging options
    pub fn options(&self) -> ListOptions {
        self.options
    }

    /// Record limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.options.limit
    }

    /// Build the first-page request
    ///
    /// Set filters follow the descriptor's declaration order; the page
    /// size is always last.
    pub fn build_request(&self) -> Request {
        let mut request = Request::get(&self.path);
        for name in self.resource.filters {
            if let Some(value) = self.filter.get(name) {
                request.add_query_param(*name, value.to_string());
            }
        }
        request.add_query_param(
            PAGE_SIZE_PARAM,
            self.options.effective_page_size().to_string(),
        );
        request
    }
}

impl<T: DeserializeOwned> PagedListOperation<T> {
    /// Fetch the first page and wrap it in a [`ResourceSet`]
    pub async fn execute(&self, transport: Arc<dyn Transport>) -> Result<ResourceSet<T>> {
        let request = self.build_request();
        let page = self.page_for_request(transport.as_ref(), &request).await?;
        Ok(ResourceSet::new(self.clone(), transport, page))
    }

    /// Fetch the page at a server-supplied cursor URI
    ///
    /// The URI already carries every filter, so nothing is appended.
    pub async fn next_page(&self, uri: &str, transport: &dyn Transport) -> Result<Page<T>> {
        let request = Request::get_uri(uri);
        self.page_for_request(transport, &request).await
    }

    async fn page_for_request(
        &self,
        transport: &dyn Transport,
        request: &Request,
    ) -> Result<Page<T>> {
        let response = transport.send(request).await.map_err(|e| {
            warn!("{} read failed: {}: {}", self.resource.name, request.target, e);
            Error::connection(e.to_string())
        })?;

        if !response.is_ok() {
            let api_error = match RestError::from_json(&response.body) {
                Some(rest) => ApiError::from(rest),
                None => ApiError::no_content(),
            };
            warn!(
                "{} read failed with HTTP {}: {}",
                self.resource.name, response.status, api_error
            );
            return Err(Error::Api(api_error));
        }

        let page = Page::deserialize(self.resource.envelope_key, &response.body)?;
        debug!(
            "{} page: {} records, next page {}",
            self.resource.name,
            page.len(),
            page.next_page_uri().unwrap_or("none")
        );
        Ok(page)
    }
}

impl<T> Clone for PagedListOperation<T> {
    fn clone(&self) -> Self {
        Self::new_rendered(self.resource, self.path.clone(), self.filter.clone(), self.options)
    }
}

impl<T> fmt::Debug for PagedListOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedListOperation")
            .field("resource", &self.resource.name)
            .field("path", &self.path)
            .field("filter", &self.filter)
            .field("options", &self.options)
            .finish()
    }
}
