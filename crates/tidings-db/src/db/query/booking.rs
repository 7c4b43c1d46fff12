//! Query builder functions for bookings.

use diesel::prelude::*;

use tidings_core::types::BookingStatus;

use crate::db::enums::BookingStatusColumn;
use crate::db::schema::booking;
use crate::store::BookingFilter;

/// ## Summary
/// Returns a query to select all bookings.
#[must_use]
pub fn all() -> booking::BoxedQuery<'static, diesel::pg::Pg> {
    booking::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a booking by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> booking::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(booking::id.eq(id))
}

/// ## Summary
/// Returns a query for the non-cancelled bookings of `email` on `event_id`.
///
/// `email` must already be normalized.
#[must_use]
pub fn active_for(event_id: uuid::Uuid, email: &str) -> booking::BoxedQuery<'_, diesel::pg::Pg> {
    all()
        .filter(booking::event_id.eq(event_id))
        .filter(booking::email.eq(email))
        .filter(booking::status.ne(BookingStatusColumn::from(BookingStatus::Cancelled)))
}

/// ## Summary
/// Returns a query matching `filter`, unordered.
#[must_use]
pub fn filtered(filter: &BookingFilter) -> booking::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = all();
    if let Some(event_id) = filter.event_id {
        query = query.filter(booking::event_id.eq(event_id));
    }
    if let Some(email) = &filter.email {
        query = query.filter(booking::email.eq(email.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(booking::status.eq(BookingStatusColumn::from(status)));
    }
    if filter.active_only {
        query = query.filter(booking::status.ne(BookingStatusColumn::from(BookingStatus::Cancelled)));
    }
    query
}

/// ## Summary
/// Returns a query matching `filter`, newest first.
#[must_use]
pub fn listed(filter: &BookingFilter) -> booking::BoxedQuery<'static, diesel::pg::Pg> {
    filtered(filter).order((booking::booking_date.desc(), booking::id.asc()))
}
