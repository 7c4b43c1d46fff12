//! Boxed query builders, one module per table.

pub mod booking;
pub mod event;
pub mod news;

use tidings_core::model::Pagination;

/// `OFFSET` value for a window.
#[must_use]
pub fn offset_of(pagination: Pagination) -> i64 {
    i64::try_from(pagination.offset).unwrap_or(i64::MAX)
}

/// `LIMIT` value for a window, if bounded.
#[must_use]
pub fn limit_of(pagination: Pagination) -> Option<i64> {
    pagination
        .limit
        .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX))
}
