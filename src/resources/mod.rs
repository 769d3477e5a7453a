//! Concrete list resources
//!
//! Each resource is a [`crate::list::ResourceDescriptor`] constant plus a
//! record type and a typed filter value.

pub mod notification;

pub use notification::{Notification, NotificationFilter, NOTIFICATIONS};
