//! Time helpers shared across the workspace.

use time::OffsetDateTime;

/// Current instant in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formats an instant as RFC 3339 for logging and notification bodies.
pub fn format_rfc3339(datetime: OffsetDateTime) -> String {
    datetime
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| datetime.unix_timestamp().to_string())
}
