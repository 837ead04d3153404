//! Ingest server queries.

use crate::query::Query;

/// Lists the regional ingest servers broadcasts can be sent to.
///
/// Public data; no OAuth token is sent.
#[must_use]
pub fn ingests() -> Query {
    Query::v5("ingests").use_token(false)
}
