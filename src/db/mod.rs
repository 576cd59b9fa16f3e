pub mod schema;
pub mod identity_repo;
pub mod privacy_repo;
pub mod relationship_repo;
pub mod family_repo;
pub mod post_repo;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{KindredError, KindredResult};

/// Fixed-width RFC 3339 so that TEXT ordering matches time ordering.
pub(crate) fn timestamp_to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn timestamp_from_sql(s: &str) -> KindredResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| KindredError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}
