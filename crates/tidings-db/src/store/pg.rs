//! PostgreSQL store over a bb8 pool of `diesel-async` connections.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use tidings_core::model::{Booking, EventDraft, EventItem, NewBooking, NewsDraft, NewsItem, Page, Pagination};

use super::{
    BookingFilter, BookingPatch, BookingStore, ContentStore, EventFilter, NewsFilter, Record,
    RecordStore, StoreFuture,
};
use crate::db::DbProvider;
use crate::db::connection::DbPool;
use crate::db::enums::BookingStatusColumn;
use crate::db::map::{event_changeset, new_booking_row, new_event_row, new_news_row, news_changeset};
use crate::db::query::{self, limit_of, offset_of};
use crate::db::schema::{booking, event, news};
use crate::db::transaction::with_transaction;
use crate::error::{DbError, DbResult};
use crate::model::booking::BookingRow;
use crate::model::event::EventRow;
use crate::model::news::NewsRow;

/// All three collections on one pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn total_of(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

fn found<R: Record, T>(id: uuid::Uuid, row: Option<T>) -> DbResult<T> {
    row.ok_or(DbError::NotFound { kind: R::KIND, id })
}

fn deleted<R: Record>(id: uuid::Uuid, affected: usize) -> DbResult<()> {
    if affected == 0 {
        return Err(DbError::NotFound { kind: R::KIND, id });
    }
    Ok(())
}

impl RecordStore<NewsItem> for PgStore {
    #[tracing::instrument(skip(self))]
    fn list(&self, filter: NewsFilter, pagination: Pagination) -> StoreFuture<'_, Page<NewsItem>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let total: i64 = query::news::filtered(&filter)
                .count()
                .get_result(&mut conn)
                .await?;
            let mut rows = query::news::listed(&filter).offset(offset_of(pagination));
            if let Some(limit) = limit_of(pagination) {
                rows = rows.limit(limit);
            }
            let rows: Vec<NewsRow> = rows.select(NewsRow::as_select()).load(&mut conn).await?;
            Ok(Page::new(rows.into_iter().map(NewsItem::from).collect(), total_of(total)))
        })
    }

    #[tracing::instrument(skip(self))]
    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, NewsItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = query::news::by_id(id)
                .select(NewsRow::as_select())
                .first(&mut conn)
                .await
                .optional()?;
            found::<NewsItem, _>(id, row).map(NewsItem::from)
        })
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    fn create(&self, draft: NewsDraft) -> StoreFuture<'_, NewsItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row: NewsRow = diesel::insert_into(news::table)
                .values(new_news_row(uuid::Uuid::now_v7(), &draft))
                .returning(NewsRow::as_returning())
                .get_result(&mut conn)
                .await?;
            tracing::debug!(id = %row.id, "News created");
            Ok(row.into())
        })
    }

    #[tracing::instrument(skip(self, patch))]
    fn update(&self, id: uuid::Uuid, patch: NewsDraft) -> StoreFuture<'_, NewsItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = diesel::update(news::table.filter(news::id.eq(id)))
                .set(news_changeset(&patch, chrono::Utc::now()))
                .returning(NewsRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?;
            found::<NewsItem, _>(id, row).map(NewsItem::from)
        })
    }

    #[tracing::instrument(skip(self))]
    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let affected = diesel::delete(news::table.filter(news::id.eq(id)))
                .execute(&mut conn)
                .await?;
            deleted::<NewsItem>(id, affected)
        })
    }
}

impl ContentStore<NewsItem> for PgStore {
    #[tracing::instrument(skip(self))]
    fn increment_views(&self, id: uuid::Uuid) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let views = diesel::update(news::table.filter(news::id.eq(id)))
                .set(news::views.eq(news::views + 1))
                .returning(news::views)
                .get_result::<i64>(&mut conn)
                .await
                .optional()?;
            found::<NewsItem, _>(id, views).map(total_of)
        })
    }
}

impl RecordStore<EventItem> for PgStore {
    #[tracing::instrument(skip(self))]
    fn list(&self, filter: EventFilter, pagination: Pagination) -> StoreFuture<'_, Page<EventItem>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let total: i64 = query::event::filtered(&filter)
                .count()
                .get_result(&mut conn)
                .await?;
            let mut rows = query::event::listed(&filter).offset(offset_of(pagination));
            if let Some(limit) = limit_of(pagination) {
                rows = rows.limit(limit);
            }
            let rows: Vec<EventRow> = rows.select(EventRow::as_select()).load(&mut conn).await?;
            Ok(Page::new(rows.into_iter().map(EventItem::from).collect(), total_of(total)))
        })
    }

    #[tracing::instrument(skip(self))]
    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, EventItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = query::event::by_id(id)
                .select(EventRow::as_select())
                .first(&mut conn)
                .await
                .optional()?;
            found::<EventItem, _>(id, row).map(EventItem::from)
        })
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    fn create(&self, draft: EventDraft) -> StoreFuture<'_, EventItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row: EventRow = diesel::insert_into(event::table)
                .values(new_event_row(uuid::Uuid::now_v7(), &draft))
                .returning(EventRow::as_returning())
                .get_result(&mut conn)
                .await?;
            tracing::debug!(id = %row.id, "Event created");
            Ok(row.into())
        })
    }

    #[tracing::instrument(skip(self, patch))]
    fn update(&self, id: uuid::Uuid, patch: EventDraft) -> StoreFuture<'_, EventItem> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = diesel::update(event::table.filter(event::id.eq(id)))
                .set(event_changeset(&patch, chrono::Utc::now()))
                .returning(EventRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?;
            found::<EventItem, _>(id, row).map(EventItem::from)
        })
    }

    #[tracing::instrument(skip(self))]
    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let affected = diesel::delete(event::table.filter(event::id.eq(id)))
                .execute(&mut conn)
                .await?;
            deleted::<EventItem>(id, affected)
        })
    }
}

impl ContentStore<EventItem> for PgStore {
    #[tracing::instrument(skip(self))]
    fn increment_views(&self, id: uuid::Uuid) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let views = diesel::update(event::table.filter(event::id.eq(id)))
                .set(event::views.eq(event::views + 1))
                .returning(event::views)
                .get_result::<i64>(&mut conn)
                .await
                .optional()?;
            found::<EventItem, _>(id, views).map(total_of)
        })
    }
}

impl RecordStore<Booking> for PgStore {
    #[tracing::instrument(skip(self))]
    fn list(&self, filter: BookingFilter, pagination: Pagination) -> StoreFuture<'_, Page<Booking>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let total: i64 = query::booking::filtered(&filter)
                .count()
                .get_result(&mut conn)
                .await?;
            let mut rows = query::booking::listed(&filter).offset(offset_of(pagination));
            if let Some(limit) = limit_of(pagination) {
                rows = rows.limit(limit);
            }
            let rows: Vec<BookingRow> = rows.select(BookingRow::as_select()).load(&mut conn).await?;
            Ok(Page::new(rows.into_iter().map(Booking::from).collect(), total_of(total)))
        })
    }

    #[tracing::instrument(skip(self))]
    fn get_by_id(&self, id: uuid::Uuid) -> StoreFuture<'_, Booking> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = query::booking::by_id(id)
                .select(BookingRow::as_select())
                .first(&mut conn)
                .await
                .optional()?;
            found::<Booking, _>(id, row).map(Booking::from)
        })
    }

    /// Inserts without the duplicate check; the partial unique index still
    /// rejects a second active booking as a conflict and the foreign key a
    /// missing event as not found.
    #[tracing::instrument(skip(self, draft), fields(event_id = %draft.event_id))]
    fn create(&self, draft: NewBooking) -> StoreFuture<'_, Booking> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row: BookingRow = diesel::insert_into(booking::table)
                .values(new_booking_row(uuid::Uuid::now_v7(), &draft))
                .returning(BookingRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|err| DbError::referencing(err, EventItem::KIND, draft.event_id))?;
            Ok(row.into())
        })
    }

    #[tracing::instrument(skip(self), fields(status = %patch.status))]
    fn update(&self, id: uuid::Uuid, patch: BookingPatch) -> StoreFuture<'_, Booking> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = diesel::update(booking::table.filter(booking::id.eq(id)))
                .set(booking::status.eq(BookingStatusColumn::from(patch.status)))
                .returning(BookingRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?;
            found::<Booking, _>(id, row).map(Booking::from)
        })
    }

    #[tracing::instrument(skip(self))]
    fn delete(&self, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let affected = diesel::delete(booking::table.filter(booking::id.eq(id)))
                .execute(&mut conn)
                .await?;
            deleted::<Booking>(id, affected)
        })
    }
}

impl BookingStore for PgStore {
    #[tracing::instrument(skip(self, new_booking), fields(event_id = %new_booking.event_id))]
    fn create_unless_active(&self, new_booking: NewBooking) -> StoreFuture<'_, Booking> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            with_transaction(&mut conn, |tx| {
                async move {
                    let active: i64 = query::booking::active_for(new_booking.event_id, &new_booking.email)
                        .count()
                        .get_result(tx)
                        .await?;
                    if active > 0 {
                        return Err(DbError::Conflict(format!(
                            "active booking exists for event {}",
                            new_booking.event_id
                        )));
                    }
                    let row: BookingRow = diesel::insert_into(booking::table)
                        .values(new_booking_row(uuid::Uuid::now_v7(), &new_booking))
                        .returning(BookingRow::as_returning())
                        .get_result(tx)
                        .await
                        .map_err(|err| DbError::referencing(err, EventItem::KIND, new_booking.event_id))?;
                    Ok(Booking::from(row))
                }
                .scope_boxed()
            })
            .await
        })
    }
}
