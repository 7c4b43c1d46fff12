//! Query builder functions for news.

use diesel::prelude::*;

use crate::db::schema::news;
use crate::store::NewsFilter;

/// ## Summary
/// Returns a query to select all news.
#[must_use]
pub fn all() -> news::BoxedQuery<'static, diesel::pg::Pg> {
    news::table.into_boxed()
}

/// ## Summary
/// Returns a query to find an article by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> news::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(news::id.eq(id))
}

/// ## Summary
/// Returns a query matching `filter`, unordered.
#[must_use]
pub fn filtered(filter: &NewsFilter) -> news::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = all();
    if filter.published_only {
        query = query.filter(news::is_published.eq(true));
    }
    query
}

/// ## Summary
/// Returns a query matching `filter`, newest first.
///
/// Ids are UUIDv7, so ordering ties by id keeps insertion order.
#[must_use]
pub fn listed(filter: &NewsFilter) -> news::BoxedQuery<'static, diesel::pg::Pg> {
    filtered(filter).order((news::created_at.desc(), news::id.asc()))
}
