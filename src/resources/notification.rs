//! Call notifications
//!
//! Log entries the API recorded while processing a call: warnings and
//! errors raised by webhooks, TwiML parsing and the like.
//!
//! ```text
//! GET /2010-04-01/Accounts/{AccountSid}/Calls/{CallSid}/Notifications.json
//!     ?Log={int}&MessageDate={string}&PageSize={int}
//! ```

use crate::list::{ListFilter, ListOptions, PagedListOperation, ResourceDescriptor};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Descriptor of the call notifications list
pub const NOTIFICATIONS: ResourceDescriptor = ResourceDescriptor {
    name: "Notification",
    path_template: "/2010-04-01/Accounts/{AccountSid}/Calls/{CallSid}/Notifications.json",
    envelope_key: "notifications",
    filters: &["Log", "MessageDate"],
};

/// Log level of an error notification
pub const LOG_ERROR: i32 = 0;

/// Log level of a warning notification
pub const LOG_WARNING: i32 = 1;

/// Filters accepted by the notifications list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    /// Only notifications with this log level
    pub log: Option<i32>,
    /// Only notifications from this date (`YYYY-MM-DD`)
    pub message_date: Option<String>,
}

impl NotificationFilter {
    /// Filter on a calendar date, sent as `YYYY-MM-DD`
    #[must_use]
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            log: None,
            message_date: Some(date.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<NotificationFilter> for ListFilter {
    fn from(filter: NotificationFilter) -> Self {
        ListFilter::new()
            .with("Log", filter.log)
            .with("MessageDate", filter.message_date)
    }
}

/// Build the list operation for one call's notifications
pub fn list(
    account_sid: &str,
    call_sid: &str,
    filter: NotificationFilter,
    options: ListOptions,
) -> PagedListOperation<Notification> {
    PagedListOperation::new(
        &NOTIFICATIONS,
        &[("AccountSid", account_sid), ("CallSid", call_sid)],
        filter,
        options,
    )
}

/// A call notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub call_sid: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub error_code: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub log: Option<String>,
    #[serde(default)]
    pub message_date: Option<String>,
    #[serde(default)]
    pub message_text: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub request_method: Option<String>,
    #[serde(default)]
    pub request_url: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl Notification {
    /// Creation time
    pub fn date_created(&self) -> Option<DateTime<FixedOffset>> {
        parse_rfc2822(self.date_created.as_deref())
    }

    /// Last update time
    pub fn date_updated(&self) -> Option<DateTime<FixedOffset>> {
        parse_rfc2822(self.date_updated.as_deref())
    }

    /// Time the message was logged
    pub fn message_date(&self) -> Option<DateTime<FixedOffset>> {
        parse_rfc2822(self.message_date.as_deref())
    }

    /// Numeric log level
    pub fn log_level(&self) -> Option<i32> {
        self.log.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether this notification is an error
    pub fn is_error(&self) -> bool {
        self.log_level() == Some(LOG_ERROR)
    }
}

fn parse_rfc2822(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|s| DateTime::parse_from_rfc2822(s).ok())
}

/// Some fields arrive as strings on one API version and numbers on another
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
