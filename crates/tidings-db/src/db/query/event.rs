//! Query builder functions for events.

use diesel::prelude::*;

use crate::db::enums::LifecycleColumn;
use crate::db::schema::event;
use crate::store::EventFilter;

/// ## Summary
/// Returns a query to select all events.
#[must_use]
pub fn all() -> event::BoxedQuery<'static, diesel::pg::Pg> {
    event::table.into_boxed()
}

/// ## Summary
/// Returns a query to find an event by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> event::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(event::id.eq(id))
}

/// ## Summary
/// Returns a query matching `filter`, unordered.
#[must_use]
pub fn filtered(filter: &EventFilter) -> event::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = all();
    if let Some(lifecycle) = filter.lifecycle {
        query = query.filter(event::lifecycle.eq(LifecycleColumn::from(lifecycle)));
    }
    query
}

/// ## Summary
/// Returns a query matching `filter`, newest first.
#[must_use]
pub fn listed(filter: &EventFilter) -> event::BoxedQuery<'static, diesel::pg::Pg> {
    filtered(filter).order((event::created_at.desc(), event::id.asc()))
}
