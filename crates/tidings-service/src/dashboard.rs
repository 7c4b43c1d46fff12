use serde::Serialize;

use tidings_core::model::Pagination;
use tidings_core::types::{BookingStatus, LifecycleFlag};
use tidings_db::store::{BookingFilter, EventFilter, NewsFilter, Store};

use crate::clock::Moment;
use crate::error::ServiceResult;

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub news_total: u64,
    pub news_published: u64,
    pub events_total: u64,
    pub events_coming_soon: u64,
    pub events_past: u64,
    /// Coming-soon events whose date has not passed.
    pub events_upcoming: u64,
    pub bookings_pending: u64,
    pub bookings_confirmed: u64,
    pub bookings_cancelled: u64,
    /// How often the dashboard client should poll these stats.
    pub refresh_interval_ms: u64,
}

/// Fetches totals only.
const COUNT_ONLY: Pagination = Pagination {
    offset: 0,
    limit: Some(0),
};

fn bookings_with(status: BookingStatus) -> BookingFilter {
    BookingFilter {
        status: Some(status),
        ..BookingFilter::default()
    }
}

/// ## Summary
/// Collects the dashboard counters.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, moment))]
pub async fn dashboard_stats(
    store: &Store,
    moment: &Moment,
    refresh_interval_ms: u64,
) -> ServiceResult<DashboardStats> {
    let (news_total, news_published, coming_soon, events_past, pending, confirmed, cancelled) = futures::try_join!(
        store.news.list(NewsFilter::default(), COUNT_ONLY),
        store.news.list(NewsFilter { published_only: true }, COUNT_ONLY),
        store.events.list(
            EventFilter {
                lifecycle: Some(LifecycleFlag::ComingSoon),
            },
            Pagination::all(),
        ),
        store.events.list(
            EventFilter {
                lifecycle: Some(LifecycleFlag::PastEvent),
            },
            COUNT_ONLY,
        ),
        store.bookings.list(bookings_with(BookingStatus::Pending), COUNT_ONLY),
        store.bookings.list(bookings_with(BookingStatus::Confirmed), COUNT_ONLY),
        store.bookings.list(bookings_with(BookingStatus::Cancelled), COUNT_ONLY),
    )?;

    let events_upcoming = coming_soon
        .items
        .iter()
        .filter(|event| event.is_upcoming(moment.local))
        .count();

    Ok(DashboardStats {
        news_total: news_total.total,
        news_published: news_published.total,
        events_total: coming_soon.total + events_past.total,
        events_coming_soon: coming_soon.total,
        events_past: events_past.total,
        events_upcoming: u64::try_from(events_upcoming).unwrap_or(u64::MAX),
        bookings_pending: pending.total,
        bookings_confirmed: confirmed.total,
        bookings_cancelled: cancelled.total,
        refresh_interval_ms,
    })
}
