use chrono::{DateTime, Utc};

/// Wall clock, pinned by `PHISH_SENTRY_FIXED_TIME` (RFC 3339) when set.
pub fn now_utc() -> DateTime<Utc> {
    if let Ok(value) = std::env::var("PHISH_SENTRY_FIXED_TIME") {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return dt.with_timezone(&Utc);
        }
    }
    Utc::now()
}
