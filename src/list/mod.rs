//! Paginated list engine
//!
//! # Overview
//!
//! One generic [`PagedListOperation`] serves every list resource. A
//! resource contributes only a [`ResourceDescriptor`] constant and a
//! record type; filters arrive as a [`ListFilter`] value.
//!
//! ```rust,ignore
//! use restpage::list::{ListOptions, PagedListOperation};
//! use restpage::resources::notification::{Notification, NotificationFilter, NOTIFICATIONS};
//!
//! let op: PagedListOperation<Notification> = PagedListOperation::new(
//!     &NOTIFICATIONS,
//!     &[("AccountSid", "AC123"), ("CallSid", "CA456")],
//!     NotificationFilter { log: Some(1), ..Default::default() },
//!     ListOptions::default(),
//! );
//! let records = op.execute(transport).await?.try_collect().await?;
//! ```

mod descriptor;
mod filter;
mod operation;

pub use descriptor::ResourceDescriptor;
pub use filter::{FilterValue, ListFilter};
pub use operation::{
    ListOptions, PagedListOperation, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_SIZE_PARAM,
};
