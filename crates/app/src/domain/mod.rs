//! Stockroom Domain Concerns

use jiff::Timestamp;

pub mod errors;
pub mod products;
pub mod sales;

/// Truncate `now` to the microsecond precision `TIMESTAMPTZ` stores, so a
/// record handed back on create equals the one read back later.
pub(crate) fn storage_precision(now: Timestamp) -> Timestamp {
    Timestamp::from_microsecond(now.as_microsecond()).unwrap_or(now)
}
