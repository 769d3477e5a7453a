//! Pagination module
//!
//! # Overview
//!
//! A list response is decoded into a [`Page`]: the records under the
//! resource's envelope key plus a cursor URI to the next page. A
//! [`ResourceSet`] walks pages lazily by following those cursors.

mod page;
mod resource_set;

pub use page::{Page, PageMeta};
pub use resource_set::ResourceSet;
