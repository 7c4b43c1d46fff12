//! The storage contract of the three collections.
//!
//! ## Summary
//! Every collection is a [`RecordStore`] over one record type. News and events
//! are [`ContentStore`]s and also count views; bookings are a [`BookingStore`]
//! with an atomic duplicate-aware insert. Futures are boxed and `Send` so the
//! stores can live behind `Arc<dyn ...>` in the request depot.
//!
//! Lists are ordered newest first; records created at the same instant keep
//! their insertion order.
//!
//! Every backend holds at most one non-cancelled booking per event and email.
//! Inserts and status changes that would add a second one fail with
//! `DbError::Conflict`. A booking needs an existing event, and deleting an
//! event deletes its bookings.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use tidings_core::model::{
    Booking, EventDraft, EventItem, NewBooking, NewsDraft, NewsItem, Page, Pagination,
};
use tidings_core::types::{BookingStatus, LifecycleFlag};

use crate::db::connection::DbPool;
use crate::error::DbResult;

pub mod memory;
pub mod pg;

pub use memory::{MemoryCatalog, MemoryCollection};
pub use pg::PgStore;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = DbResult<T>> + Send + 'a>>;

/// A stored record type and the shapes used to query and write it.
pub trait Record: Clone + Send + Sync + 'static {
    type Filter: Clone + Default + Send + Sync + 'static;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> uuid::Uuid;

    fn created_at(&self) -> DateTime<Utc>;
}

/// ## Summary
/// Create, read, update and delete over one collection.
///
/// ## Errors
/// `get_by_id`, `update` and `delete` return `DbError::NotFound` for an
/// unknown id. Backend failures surface as `DatabaseError` or `PoolError`.
pub trait RecordStore<R: Record>: Send + Sync {
    fn list(&self, filter: R::Filter, pagination: Pagination) -> StoreFuture<'_, Page<R>>;

    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, R>;

    fn create(&self, draft: R::Draft) -> StoreFuture<'_, R>;

    fn update(&self, id: uuid::Uuid, patch: R::Patch) -> StoreFuture<'_, R>;

    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()>;
}

/// A collection of public content that counts detail views.
pub trait ContentStore<R: Record>: RecordStore<R> {
    /// Increments the view counter and returns the new count.
    fn increment_views(&self, id: uuid::Uuid) -> StoreFuture<'_, u64>;
}

/// The booking collection.
///
/// `create` and `update` also reject a second active booking for the same
/// event and email with `DbError::Conflict`, and `create` returns
/// `DbError::NotFound` for an unknown event.
pub trait BookingStore: RecordStore<Booking> {
    /// ## Summary
    /// Inserts `booking` unless a non-cancelled booking already exists for the
    /// same event and email.
    ///
    /// The existence check and the insert are one atomic step: two concurrent
    /// calls for the same pair never both succeed.
    ///
    /// ## Errors
    /// Returns `DbError::Conflict` when an active booking exists.
    fn create_unless_active(&self, booking: NewBooking) -> StoreFuture<'_, Booking>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub published_only: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub lifecycle: Option<LifecycleFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub event_id: Option<uuid::Uuid>,
    /// Normalized address.
    pub email: Option<String>,
    pub status: Option<BookingStatus>,
    /// Excludes cancelled bookings.
    pub active_only: bool,
}

/// Admin change to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPatch {
    pub status: BookingStatus,
}

impl Record for NewsItem {
    type Filter = NewsFilter;
    type Draft = NewsDraft;
    type Patch = NewsDraft;

    const KIND: &'static str = "news";

    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for EventItem {
    type Filter = EventFilter;
    type Draft = EventDraft;
    type Patch = EventDraft;

    const KIND: &'static str = "event";

    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Booking {
    type Filter = BookingFilter;
    type Draft = NewBooking;
    type Patch = BookingPatch;

    const KIND: &'static str = "booking";

    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.booking_date
    }
}

/// The three collections, shared across handlers and background tasks.
#[derive(Clone)]
pub struct Store {
    pub news: Arc<dyn ContentStore<NewsItem>>,
    pub events: Arc<dyn ContentStore<EventItem>>,
    pub bookings: Arc<dyn BookingStore>,
}

impl Store {
    /// Collections backed by PostgreSQL through `pool`.
    #[must_use]
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            news: store.clone(),
            events: store.clone(),
            bookings: store,
        }
    }

    /// Empty collections held in process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        let catalog = Arc::new(MemoryCatalog::default());
        Self {
            news: Arc::new(MemoryCollection::<NewsItem>::default()),
            events: catalog.clone(),
            bookings: catalog,
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
