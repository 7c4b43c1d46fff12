//! In-process store for development and tests.
//!
//! Each collection is a vector behind a `std::sync::RwLock`, kept in insertion
//! order. No lock is ever held across an await point. Events and bookings live
//! together in a [`MemoryCatalog`] so a booking never outlives its event; the
//! catalog always locks events before bookings.

use std::cmp::Reverse;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use tidings_core::model::{Booking, EventDraft, EventItem, NewBooking, NewsDraft, NewsItem, Page, Pagination};

use super::{BookingFilter, BookingPatch, BookingStore, ContentStore, EventFilter, Record, RecordStore, StoreFuture};
use crate::error::{DbError, DbResult};

/// In-memory behavior of a record type.
pub trait InMemory: Record {
    fn matches(&self, filter: &Self::Filter) -> bool;

    fn materialize(id: uuid::Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, patch: Self::Patch);

    /// Whether `self` and `other` may not both be stored. Plays the part of a
    /// unique index.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

/// Records with a view counter.
pub trait Viewed {
    fn views_mut(&mut self) -> &mut u64;
}

/// One collection held in memory.
#[derive(Debug)]
pub struct MemoryCollection<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

fn not_found<R: Record>(id: uuid::Uuid) -> DbError {
    DbError::NotFound { kind: R::KIND, id }
}

fn conflict<R: Record>(record: &R) -> DbError {
    DbError::Conflict(format!("{} {} conflicts with a stored record", R::KIND, record.id()))
}

/// Appends `record` unless it conflicts with a stored one.
fn insert_checked<R: InMemory>(records: &mut Vec<R>, record: R) -> DbResult<R> {
    if records.iter().any(|existing| record.conflicts_with(existing)) {
        return Err(conflict(&record));
    }
    records.push(record.clone());
    tracing::debug!(kind = R::KIND, id = %record.id(), "Record created");
    Ok(record)
}

/// Applies `patch` to a copy first; the stored record changes only when the
/// result conflicts with no other record.
fn update_checked<R: InMemory>(records: &mut [R], id: uuid::Uuid, patch: R::Patch) -> DbResult<R> {
    let position = records
        .iter()
        .position(|record| record.id() == id)
        .ok_or_else(|| not_found::<R>(id))?;
    let mut updated = records[position].clone();
    updated.apply(patch);
    if records
        .iter()
        .any(|other| other.id() != id && updated.conflicts_with(other))
    {
        return Err(conflict(&updated));
    }
    records[position] = updated.clone();
    Ok(updated)
}

fn remove<R: Record>(records: &mut Vec<R>, id: uuid::Uuid) -> DbResult<()> {
    let position = records
        .iter()
        .position(|record| record.id() == id)
        .ok_or_else(|| not_found::<R>(id))?;
    records.remove(position);
    Ok(())
}

impl<R: InMemory> MemoryCollection<R> {
    /// Locks for reading and recovers from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, Vec<R>> {
        match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.records.clear_poison();
                poisoned.into_inner()
            }
        }
    }

    /// Locks for writing and recovers from poisoning.
    fn write(&self) -> RwLockWriteGuard<'_, Vec<R>> {
        match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.records.clear_poison();
                poisoned.into_inner()
            }
        }
    }

    fn list_now(&self, filter: &R::Filter, pagination: Pagination) -> Page<R> {
        let mut matched: Vec<R> = self
            .read()
            .iter()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect();
        matched.sort_by_key(|record| Reverse(record.created_at()));
        let total = u64::try_from(matched.len()).unwrap_or(u64::MAX);
        Page::new(pagination.slice(&matched).to_vec(), total)
    }

    fn get_now(&self, id: uuid::Uuid) -> DbResult<R> {
        self.read()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<R>(id))
    }

    fn create_now(&self, draft: R::Draft) -> DbResult<R> {
        let record = R::materialize(uuid::Uuid::now_v7(), draft, Utc::now());
        insert_checked(&mut self.write(), record)
    }

    fn update_now(&self, id: uuid::Uuid, patch: R::Patch) -> DbResult<R> {
        update_checked(&mut self.write(), id, patch)
    }

    fn delete_now(&self, id: uuid::Uuid) -> DbResult<()> {
        remove(&mut self.write(), id)
    }
}

impl<R: InMemory> RecordStore<R> for MemoryCollection<R> {
    fn list(&self, filter: R::Filter, pagination: Pagination) -> StoreFuture<'_, Page<R>> {
        let page = self.list_now(&filter, pagination);
        Box::pin(futures::future::ready(Ok(page)))
    }

    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, R> {
        Box::pin(futures::future::ready(self.get_now(id)))
    }

    fn create(&self, draft: R::Draft) -> StoreFuture<'_, R> {
        Box::pin(futures::future::ready(self.create_now(draft)))
    }

    fn update(&self, id: uuid::Uuid, patch: R::Patch) -> StoreFuture<'_, R> {
        Box::pin(futures::future::ready(self.update_now(id, patch)))
    }

    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(futures::future::ready(self.delete_now(id)))
    }
}

impl<R: InMemory + Viewed> ContentStore<R> for MemoryCollection<R> {
    fn increment_views(&self, id: uuid::Uuid) -> StoreFuture<'_, u64> {
        let result = {
            let mut records = self.write();
            records
                .iter_mut()
                .find(|record| record.id() == id)
                .map(|record| {
                    let views = record.views_mut();
                    *views = views.saturating_add(1);
                    *views
                })
                .ok_or_else(|| not_found::<R>(id))
        };
        Box::pin(futures::future::ready(result))
    }
}

/// ## Summary
/// Events and their bookings.
///
/// Registering requires the event to exist and deleting an event removes its
/// bookings, each under one pair of locks, the way the foreign key behaves in
/// PostgreSQL.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    events: MemoryCollection<EventItem>,
    bookings: MemoryCollection<Booking>,
}

impl MemoryCatalog {
    fn register(&self, booking: NewBooking) -> DbResult<Booking> {
        let events = self.events.read();
        if !events.iter().any(|event| event.id == booking.event_id) {
            return Err(not_found::<EventItem>(booking.event_id));
        }
        let record = Booking::materialize(uuid::Uuid::now_v7(), booking, Utc::now());
        insert_checked(&mut self.bookings.write(), record)
    }

    fn delete_event(&self, id: uuid::Uuid) -> DbResult<()> {
        let mut events = self.events.write();
        remove(&mut events, id)?;
        let mut bookings = self.bookings.write();
        let before = bookings.len();
        bookings.retain(|booking| booking.event_id != id);
        tracing::debug!(event_id = %id, bookings_removed = before - bookings.len(), "Event deleted");
        Ok(())
    }
}

impl RecordStore<EventItem> for MemoryCatalog {
    fn list(&self, filter: EventFilter, pagination: Pagination) -> StoreFuture<'_, Page<EventItem>> {
        self.events.list(filter, pagination)
    }

    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, EventItem> {
        self.events.get_by_id(id)
    }

    fn create(&self, draft: EventDraft) -> StoreFuture<'_, EventItem> {
        self.events.create(draft)
    }

    fn update(&self, id: uuid::Uuid, patch: EventDraft) -> StoreFuture<'_, EventItem> {
        self.events.update(id, patch)
    }

    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(futures::future::ready(self.delete_event(id)))
    }
}

impl ContentStore<EventItem> for MemoryCatalog {
    fn increment_views(&self, id: uuid::Uuid) -> StoreFuture<'_, u64> {
        self.events.increment_views(id)
    }
}

impl RecordStore<Booking> for MemoryCatalog {
    fn list(&self, filter: BookingFilter, pagination: Pagination) -> StoreFuture<'_, Page<Booking>> {
        self.bookings.list(filter, pagination)
    }

    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, Booking> {
        self.bookings.get_by_id(id)
    }

    fn create(&self, draft: NewBooking) -> StoreFuture<'_, Booking> {
        Box::pin(futures::future::ready(self.register(draft)))
    }

    fn update(&self, id: uuid::Uuid, patch: BookingPatch) -> StoreFuture<'_, Booking> {
        self.bookings.update(id, patch)
    }

    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        self.bookings.delete(id)
    }
}

impl BookingStore for MemoryCatalog {
    fn create_unless_active(&self, booking: NewBooking) -> StoreFuture<'_, Booking> {
        Box::pin(futures::future::ready(self.register(booking)))
    }
}

impl InMemory for NewsItem {
    fn matches(&self, filter: &Self::Filter) -> bool {
        !filter.published_only || self.is_published
    }

    fn materialize(id: uuid::Uuid, draft: NewsDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            short_description: draft.short_description,
            full_description: draft.full_description,
            image: draft.image,
            author: draft.author,
            published_at: draft.published_at,
            created_at: now,
            views: 0,
            is_published: draft.is_published,
        }
    }

    fn apply(&mut self, patch: NewsDraft) {
        self.title = patch.title;
        self.short_description = patch.short_description;
        self.full_description = patch.full_description;
        self.image = patch.image;
        self.author = patch.author;
        self.published_at = patch.published_at;
        self.is_published = patch.is_published;
    }
}

impl Viewed for NewsItem {
    fn views_mut(&mut self) -> &mut u64 {
        &mut self.views
    }
}

impl InMemory for EventItem {
    fn matches(&self, filter: &Self::Filter) -> bool {
        filter.lifecycle.is_none_or(|lifecycle| self.lifecycle == lifecycle)
    }

    fn materialize(id: uuid::Uuid, draft: EventDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            short_description: draft.short_description,
            full_description: draft.full_description,
            image: draft.image,
            author: draft.author,
            lifecycle: draft.lifecycle,
            event_date: draft.event_date,
            event_time: draft.event_time,
            location: draft.location,
            speakers: draft.speakers,
            speaker_name: draft.speaker_name,
            presenter: draft.presenter,
            youtube_link: draft.youtube_link,
            created_at: now,
            views: 0,
        }
    }

    fn apply(&mut self, patch: EventDraft) {
        self.title = patch.title;
        self.short_description = patch.short_description;
        self.full_description = patch.full_description;
        self.image = patch.image;
        self.author = patch.author;
        self.lifecycle = patch.lifecycle;
        self.event_date = patch.event_date;
        self.event_time = patch.event_time;
        self.location = patch.location;
        self.speakers = patch.speakers;
        self.speaker_name = patch.speaker_name;
        self.presenter = patch.presenter;
        self.youtube_link = patch.youtube_link;
    }
}

impl Viewed for EventItem {
    fn views_mut(&mut self) -> &mut u64 {
        &mut self.views
    }
}

impl InMemory for Booking {
    fn matches(&self, filter: &Self::Filter) -> bool {
        filter.event_id.is_none_or(|event_id| self.event_id == event_id)
            && filter.email.as_deref().is_none_or(|email| self.email == email)
            && filter.status.is_none_or(|status| self.status == status)
            && (!filter.active_only || self.status.is_active())
    }

    fn materialize(id: uuid::Uuid, draft: NewBooking, _now: DateTime<Utc>) -> Self {
        draft.into_booking(id)
    }

    fn apply(&mut self, patch: BookingPatch) {
        self.status = patch.status;
    }

    /// A second active booking for the same event and email.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.status.is_active()
            && other.status.is_active()
            && self.event_id == other.event_id
            && self.email == other.email
    }
}

#[cfg(test)]
mod tests {
    use tidings_core::model::BookingForm;
    use tidings_core::types::{BookingStatus, EmploymentStatus, Gender, LifecycleFlag};

    use super::*;
    use crate::store::{NewsFilter, Store};

    fn news_draft(title: &str, is_published: bool) -> NewsDraft {
        NewsDraft {
            title: title.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            published_at: None,
            is_published,
        }
    }

    fn event_draft(title: &str, lifecycle: LifecycleFlag) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            lifecycle,
            event_date: None,
            event_time: None,
            location: None,
            speakers: tidings_core::speaker::RawSpeakerField::Absent,
            speaker_name: None,
            presenter: None,
            youtube_link: None,
        }
    }

    fn new_booking(event_id: uuid::Uuid, email: &str) -> NewBooking {
        NewBooking::pending(
            event_id,
            BookingForm {
                full_name: "Tobi Ade".to_string(),
                email: email.to_string(),
                mobile_number: "08035550101".to_string(),
                location: "Ibadan".to_string(),
                gender: Gender::Male,
                education_background: "HND".to_string(),
                employment_status: EmploymentStatus::Employed,
                expectation: String::new(),
            },
            Utc::now(),
        )
    }

    #[test_log::test(tokio::test)]
    async fn test_crud_round_trip() {
        let store = Store::in_memory();
        let created = store.news.create(news_draft("First", false)).await.unwrap();
        assert_eq!(store.news.get_by_id(created.id).await.unwrap(), created);

        let updated = store
            .news
            .update(created.id, news_draft("Renamed", true))
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert!(updated.is_published);
        assert_eq!(updated.created_at, created.created_at);

        store.news.delete(created.id).await.unwrap();
        assert!(matches!(
            store.news.get_by_id(created.id).await,
            Err(DbError::NotFound { kind: "news", .. })
        ));
        assert!(matches!(
            store.news.delete(created.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.news.update(created.id, news_draft("x", false)).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_list_filters_orders_and_paginates() {
        let store = Store::in_memory();
        for (title, published) in [("a", true), ("b", false), ("c", true), ("d", true)] {
            store.news.create(news_draft(title, published)).await.unwrap();
        }

        let everything = store
            .news
            .list(NewsFilter::default(), Pagination::all())
            .await
            .unwrap();
        assert_eq!(everything.total, 4);

        let published = store
            .news
            .list(
                NewsFilter {
                    published_only: true,
                },
                Pagination::from_page(Some(1), Some(2)),
            )
            .await
            .unwrap();
        assert_eq!(published.total, 3);
        assert_eq!(published.items.len(), 2);
        assert!(published.items.iter().all(|item| item.is_published));
        assert!(
            published
                .items
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_event_lifecycle_filter() {
        let store = Store::in_memory();
        store
            .events
            .create(event_draft("soon", LifecycleFlag::ComingSoon))
            .await
            .unwrap();
        store
            .events
            .create(event_draft("done", LifecycleFlag::PastEvent))
            .await
            .unwrap();

        let past = store
            .events
            .list(
                EventFilter {
                    lifecycle: Some(LifecycleFlag::PastEvent),
                },
                Pagination::all(),
            )
            .await
            .unwrap();
        assert_eq!(past.total, 1);
        assert_eq!(past.items[0].title, "done");
    }

    #[test_log::test(tokio::test)]
    async fn test_increment_views() {
        let store = Store::in_memory();
        let event = store
            .events
            .create(event_draft("talk", LifecycleFlag::ComingSoon))
            .await
            .unwrap();
        assert_eq!(store.events.increment_views(event.id).await.unwrap(), 1);
        assert_eq!(store.events.increment_views(event.id).await.unwrap(), 2);
        assert_eq!(store.events.get_by_id(event.id).await.unwrap().views, 2);
        assert!(
            store
                .events
                .increment_views(uuid::Uuid::now_v7())
                .await
                .is_err()
        );
    }

    async fn open_event(store: &Store) -> uuid::Uuid {
        store
            .events
            .create(event_draft("meetup", LifecycleFlag::ComingSoon))
            .await
            .unwrap()
            .id
    }

    fn active_for(event_id: uuid::Uuid) -> BookingFilter {
        BookingFilter {
            event_id: Some(event_id),
            active_only: true,
            ..BookingFilter::default()
        }
    }

    async fn cancel(store: &Store, id: uuid::Uuid) -> DbResult<Booking> {
        store
            .bookings
            .update(
                id,
                BookingPatch {
                    status: BookingStatus::Cancelled,
                },
            )
            .await
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_active_booking_conflicts_until_cancelled() {
        let store = Store::in_memory();
        let event_id = open_event(&store).await;
        let other_event = open_event(&store).await;

        let first = store
            .bookings
            .create_unless_active(new_booking(event_id, "Tobi@Example.org"))
            .await
            .unwrap();
        assert!(matches!(
            store
                .bookings
                .create_unless_active(new_booking(event_id, " tobi@example.ORG "))
                .await,
            Err(DbError::Conflict(_))
        ));

        // A different event is independent.
        store
            .bookings
            .create_unless_active(new_booking(other_event, "tobi@example.org"))
            .await
            .unwrap();

        cancel(&store, first.id).await.unwrap();
        store
            .bookings
            .create_unless_active(new_booking(event_id, "tobi@example.org"))
            .await
            .unwrap();

        let active = store
            .bookings
            .list(active_for(event_id), Pagination::all())
            .await
            .unwrap();
        assert_eq!(active.total, 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_status_change_cannot_reactivate_a_duplicate() {
        let store = Store::in_memory();
        let event_id = open_event(&store).await;

        let first = store
            .bookings
            .create_unless_active(new_booking(event_id, "ada@example.org"))
            .await
            .unwrap();
        cancel(&store, first.id).await.unwrap();
        let second = store
            .bookings
            .create_unless_active(new_booking(event_id, "ada@example.org"))
            .await
            .unwrap();

        for status in [BookingStatus::Pending, BookingStatus::Confirmed] {
            assert!(matches!(
                store.bookings.update(first.id, BookingPatch { status }).await,
                Err(DbError::Conflict(_))
            ));
        }
        assert_eq!(
            store.bookings.get_by_id(first.id).await.unwrap().status,
            BookingStatus::Cancelled
        );

        // Once the newer booking is cancelled the older one may come back.
        cancel(&store, second.id).await.unwrap();
        let revived = store
            .bookings
            .update(
                first.id,
                BookingPatch {
                    status: BookingStatus::Confirmed,
                },
            )
            .await
            .unwrap();
        assert_eq!(revived.status, BookingStatus::Confirmed);

        let active = store
            .bookings
            .list(active_for(event_id), Pagination::all())
            .await
            .unwrap();
        assert_eq!(active.total, 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_plain_create_enforces_the_active_pair_too() {
        let store = Store::in_memory();
        let event_id = open_event(&store).await;
        store
            .bookings
            .create(new_booking(event_id, "kemi@example.org"))
            .await
            .unwrap();
        assert!(matches!(
            store
                .bookings
                .create(new_booking(event_id, "kemi@example.org"))
                .await,
            Err(DbError::Conflict(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_booking_requires_existing_event() {
        let store = Store::in_memory();
        let missing = uuid::Uuid::now_v7();
        assert!(matches!(
            store
                .bookings
                .create_unless_active(new_booking(missing, "tobi@example.org"))
                .await,
            Err(DbError::NotFound { kind: "event", id }) if id == missing
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_deleting_event_removes_its_bookings() {
        let store = Store::in_memory();
        let doomed = open_event(&store).await;
        let kept = open_event(&store).await;
        for email in ["a@example.org", "b@example.org"] {
            store
                .bookings
                .create_unless_active(new_booking(doomed, email))
                .await
                .unwrap();
        }
        let survivor = store
            .bookings
            .create_unless_active(new_booking(kept, "a@example.org"))
            .await
            .unwrap();

        store.events.delete(doomed).await.unwrap();

        let remaining = store
            .bookings
            .list(BookingFilter::default(), Pagination::all())
            .await
            .unwrap();
        assert_eq!(remaining.items, vec![survivor]);
        assert!(matches!(
            store
                .bookings
                .create_unless_active(new_booking(doomed, "late@example.org"))
                .await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.events.delete(doomed).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn test_concurrent_registrations_admit_one() {
        let store = Store::in_memory();
        let event_id = open_event(&store).await;

        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let bookings = store.bookings.clone();
                tokio::spawn(async move {
                    bookings
                        .create_unless_active(new_booking(event_id, "same@example.org"))
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut admitted = 0;
        for attempt in attempts {
            if attempt.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }
}
