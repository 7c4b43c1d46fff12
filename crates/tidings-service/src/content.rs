//! News and event operations for readers and admins.
//!
//! Lifecycle flags are stored as the admin set them. Whether an event is
//! still upcoming is evaluated on every read against the site clock, see
//! [`tidings_core::schedule`].

use std::cmp::Reverse;

use serde::Serialize;

use tidings_core::feed::{FeedItem, aggregate};
use tidings_core::filter::filter_content;
use tidings_core::model::{EventDraft, EventItem, NewsDraft, NewsItem, Page, Pagination};
use tidings_core::schedule::expiry_instant;
use tidings_core::types::{Category, LifecycleFlag};
use tidings_db::store::{EventFilter, NewsFilter, Store};

use crate::clock::Moment;
use crate::error::{ServiceError, ServiceResult};

/// An event with its derived, non-persisted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: EventItem,
    pub speaker_names: Vec<String>,
    pub is_upcoming: bool,
}

impl EventView {
    #[must_use]
    pub fn new(event: EventItem, moment: &Moment) -> Self {
        Self {
            speaker_names: event.speaker_list(),
            is_upcoming: event.is_upcoming(moment.local),
            event,
        }
    }
}

// --- News ---

/// ## Summary
/// Creates a news article, stamping `published_at` when it is published
/// without one.
///
/// ## Errors
/// Returns `ValidationError` for a blank title or author.
#[tracing::instrument(skip(store, draft), fields(title = %draft.title))]
pub async fn create_news(store: &Store, draft: NewsDraft, moment: &Moment) -> ServiceResult<NewsItem> {
    draft.validate()?;
    let created = store.news.create(draft.stamped(moment.utc)).await?;
    tracing::info!(id = %created.id, "News created");
    Ok(created)
}

/// ## Summary
/// Replaces the editable fields of a news article.
///
/// ## Errors
/// Returns `ValidationError` for an invalid draft and `NotFound` for an
/// unknown id.
#[tracing::instrument(skip(store, draft))]
pub async fn update_news(
    store: &Store,
    id: uuid::Uuid,
    draft: NewsDraft,
    moment: &Moment,
) -> ServiceResult<NewsItem> {
    draft.validate()?;
    Ok(store.news.update(id, draft.stamped(moment.utc)).await?)
}

/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(store))]
pub async fn delete_news(store: &Store, id: uuid::Uuid) -> ServiceResult<()> {
    store.news.delete(id).await?;
    tracing::info!("News deleted");
    Ok(())
}

/// Any article, published or not.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn get_news(store: &Store, id: uuid::Uuid) -> ServiceResult<NewsItem> {
    Ok(store.news.get_by_id(id).await?)
}

/// Published articles, newest first.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store))]
pub async fn list_published_news(
    store: &Store,
    pagination: Pagination,
) -> ServiceResult<Page<NewsItem>> {
    Ok(store
        .news
        .list(NewsFilter { published_only: true }, pagination)
        .await?)
}

/// ## Summary
/// Public read of one article. Counts the view.
///
/// ## Errors
/// Returns `NotFound` for an unknown id and for an unpublished article.
#[tracing::instrument(skip(store))]
pub async fn read_news(store: &Store, id: uuid::Uuid) -> ServiceResult<NewsItem> {
    let mut item = store.news.get_by_id(id).await?;
    if !item.is_published {
        return Err(ServiceError::NotFound(format!("news {id}")));
    }
    item.views = store.news.increment_views(id).await?;
    Ok(item)
}

// --- Events ---

/// ## Errors
/// Returns `ValidationError` for a blank title or author or a bad video link.
#[tracing::instrument(skip(store, draft), fields(title = %draft.title, lifecycle = %draft.lifecycle))]
pub async fn create_event(store: &Store, draft: EventDraft, moment: &Moment) -> ServiceResult<EventView> {
    draft.validate()?;
    let created = store.events.create(draft).await?;
    tracing::info!(id = %created.id, "Event created");
    Ok(EventView::new(created, moment))
}

/// ## Errors
/// Returns `ValidationError` for an invalid draft and `NotFound` for an
/// unknown id.
#[tracing::instrument(skip(store, draft), fields(lifecycle = %draft.lifecycle))]
pub async fn update_event(
    store: &Store,
    id: uuid::Uuid,
    draft: EventDraft,
    moment: &Moment,
) -> ServiceResult<EventView> {
    draft.validate()?;
    let updated = store.events.update(id, draft).await?;
    Ok(EventView::new(updated, moment))
}

/// ## Summary
/// Deletes an event. The store removes its bookings with it.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(store))]
pub async fn delete_event(store: &Store, id: uuid::Uuid) -> ServiceResult<()> {
    store.events.delete(id).await?;
    tracing::info!("Event deleted");
    Ok(())
}

/// Admin read of one event. Does not count a view.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn get_event(store: &Store, id: uuid::Uuid, moment: &Moment) -> ServiceResult<EventView> {
    let event = store.events.get_by_id(id).await?;
    Ok(EventView::new(event, moment))
}

/// ## Summary
/// Public read of one event. Counts the view.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(store, moment))]
pub async fn read_event(store: &Store, id: uuid::Uuid, moment: &Moment) -> ServiceResult<EventView> {
    let mut event = store.events.get_by_id(id).await?;
    event.views = store.events.increment_views(id).await?;
    Ok(EventView::new(event, moment))
}

async fn events_flagged(store: &Store, lifecycle: LifecycleFlag) -> ServiceResult<Vec<EventItem>> {
    let page = store
        .events
        .list(
            EventFilter {
                lifecycle: Some(lifecycle),
            },
            Pagination::all(),
        )
        .await?;
    Ok(page.items)
}

/// ## Summary
/// Events that are upcoming at `moment`, soonest expiry first. Dateless
/// events come last in their stored order.
///
/// `ComingSoon` events whose date has passed are on neither this list nor
/// [`past_events`].
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, moment), fields(now = %moment.local))]
pub async fn upcoming_events(store: &Store, moment: &Moment) -> ServiceResult<Vec<EventView>> {
    let mut upcoming: Vec<EventItem> = events_flagged(store, LifecycleFlag::ComingSoon)
        .await?
        .into_iter()
        .filter(|event| event.is_upcoming(moment.local))
        .collect();
    upcoming.sort_by_key(|event| {
        (
            event.event_date.is_none(),
            event
                .event_date
                .map(|date| expiry_instant(date, event.event_time)),
        )
    });
    Ok(upcoming
        .into_iter()
        .map(|event| EventView::new(event, moment))
        .collect())
}

/// ## Summary
/// Events flagged `PastEvent`, most recent date first. Dateless events come
/// last.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, moment))]
pub async fn past_events(store: &Store, moment: &Moment) -> ServiceResult<Vec<EventView>> {
    let mut past = events_flagged(store, LifecycleFlag::PastEvent).await?;
    past.sort_by_key(|event| (event.event_date.is_none(), Reverse(event.event_date)));
    Ok(past
        .into_iter()
        .map(|event| EventView::new(event, moment))
        .collect())
}

// --- Admin content list ---

/// ## Summary
/// Every article and event merged into one feed, then narrowed by `search`
/// and `category`.
///
/// Unpublished articles are included; this is the back-office view.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store), fields(category = %category))]
pub async fn admin_content(
    store: &Store,
    search: &str,
    category: Category,
) -> ServiceResult<Vec<FeedItem>> {
    let (news, events) = futures::try_join!(
        store.news.list(NewsFilter::default(), Pagination::all()),
        store.events.list(EventFilter::default(), Pagination::all()),
    )?;
    let merged = aggregate(news.items, events.items);
    Ok(filter_content(&merged, search, category)
        .into_iter()
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use tidings_core::schedule::SiteClock;
    use tidings_core::speaker::RawSpeakerField;

    use super::*;

    fn moment(text: &str) -> Moment {
        Moment::at(&SiteClock::default(), text.parse::<DateTime<Utc>>().unwrap())
    }

    fn news_draft(title: &str, published: bool) -> NewsDraft {
        NewsDraft {
            title: title.to_string(),
            short_description: format!("About {title}"),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            published_at: None,
            is_published: published,
        }
    }

    fn event_draft(title: &str, lifecycle: LifecycleFlag, date: Option<(u32, u32)>) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            lifecycle,
            event_date: date.and_then(|(m, d)| NaiveDate::from_ymd_opt(2025, m, d)),
            event_time: None,
            location: None,
            speakers: RawSpeakerField::Absent,
            speaker_name: None,
            presenter: None,
            youtube_link: None,
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_published_news_is_stamped_and_readable() {
        let store = Store::in_memory();
        let now = moment("2025-03-01T09:00:00Z");

        let published = create_news(&store, news_draft("Hub opens", true), &now).await.unwrap();
        assert_eq!(published.published_at, Some(now.utc));
        let hidden = create_news(&store, news_draft("Draft", false), &now).await.unwrap();

        let listed = list_published_news(&store, Pagination::all()).await.unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items[0].id, published.id);

        assert_eq!(read_news(&store, published.id).await.unwrap().views, 1);
        assert_eq!(read_news(&store, published.id).await.unwrap().views, 2);
        assert!(matches!(
            read_news(&store, hidden.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(get_news(&store, hidden.id).await.unwrap().views, 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_news_is_rejected() {
        let store = Store::in_memory();
        let now = moment("2025-03-01T09:00:00Z");
        let blank = NewsDraft {
            author: " ".to_string(),
            ..news_draft("t", true)
        };
        assert!(matches!(
            create_news(&store, blank, &now).await,
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            update_news(&store, uuid::Uuid::now_v7(), news_draft("t", true), &now).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_upcoming_orders_by_expiry_and_skips_expired() {
        let store = Store::in_memory();
        let now = moment("2025-03-10T12:00:00Z");

        let later = create_event(&store, event_draft("Later", LifecycleFlag::ComingSoon, Some((4, 2))), &now)
            .await
            .unwrap();
        let dateless = create_event(&store, event_draft("Someday", LifecycleFlag::ComingSoon, None), &now)
            .await
            .unwrap();
        let today = create_event(&store, event_draft("Today", LifecycleFlag::ComingSoon, Some((3, 10))), &now)
            .await
            .unwrap();
        create_event(&store, event_draft("Expired", LifecycleFlag::ComingSoon, Some((3, 9))), &now)
            .await
            .unwrap();
        create_event(&store, event_draft("Done", LifecycleFlag::PastEvent, Some((5, 1))), &now)
            .await
            .unwrap();

        let ids: Vec<_> = upcoming_events(&store, &now)
            .await
            .unwrap()
            .into_iter()
            .map(|view| view.event.id)
            .collect();
        assert_eq!(ids, vec![today.event.id, later.event.id, dateless.event.id]);
    }

    #[test_log::test(tokio::test)]
    async fn test_upcoming_respects_site_timezone() {
        let store = Store::in_memory();
        let lagos = SiteClock::new(chrono_tz::Africa::Lagos);
        let mut draft = event_draft("Evening talk", LifecycleFlag::ComingSoon, Some((3, 10)));
        draft.event_time = NaiveTime::from_hms_opt(18, 0, 0);
        let at = |text: &str| Moment::at(&lagos, text.parse::<DateTime<Utc>>().unwrap());
        create_event(&store, draft, &at("2025-03-10T16:30:00Z")).await.unwrap();

        // 16:30 UTC is 17:30 in Lagos, 17:05 UTC is 18:05.
        assert_eq!(upcoming_events(&store, &at("2025-03-10T16:30:00Z")).await.unwrap().len(), 1);
        assert!(upcoming_events(&store, &at("2025-03-10T17:05:00Z")).await.unwrap().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_past_events_most_recent_first() {
        let store = Store::in_memory();
        let now = moment("2025-06-01T00:00:00Z");
        let dateless = create_event(&store, event_draft("Old", LifecycleFlag::PastEvent, None), &now)
            .await
            .unwrap();
        let january = create_event(&store, event_draft("Jan", LifecycleFlag::PastEvent, Some((1, 5))), &now)
            .await
            .unwrap();
        let may = create_event(&store, event_draft("May", LifecycleFlag::PastEvent, Some((5, 20))), &now)
            .await
            .unwrap();

        let views = past_events(&store, &now).await.unwrap();
        let ids: Vec<_> = views.iter().map(|view| view.event.id).collect();
        assert_eq!(ids, vec![may.event.id, january.event.id, dateless.event.id]);
        assert!(views.iter().all(|view| !view.is_upcoming));
    }

    #[test_log::test(tokio::test)]
    async fn test_event_view_carries_derived_fields() {
        let store = Store::in_memory();
        let now = moment("2025-03-01T00:00:00Z");
        let mut draft = event_draft("Panel", LifecycleFlag::ComingSoon, Some((3, 10)));
        draft.speakers = RawSpeakerField::Text(r#"["Ada", "Kemi"]"#.to_string());
        let created = create_event(&store, draft, &now).await.unwrap();
        assert!(created.is_upcoming);
        assert_eq!(created.speaker_names, vec!["Ada", "Kemi"]);

        let read = read_event(&store, created.event.id, &now).await.unwrap();
        assert_eq!(read.event.views, 1);
        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["title"], "Panel");
        assert_eq!(json["isUpcoming"], true);
        assert_eq!(json["speakerNames"][1], "Kemi");
    }

    #[test_log::test(tokio::test)]
    async fn test_admin_content_filters_merged_feed() {
        let store = Store::in_memory();
        let now = moment("2025-03-01T00:00:00Z");
        create_news(&store, news_draft("Robotics club", false), &now).await.unwrap();
        create_event(&store, event_draft("Robotics fair", LifecycleFlag::ComingSoon, Some((4, 1))), &now)
            .await
            .unwrap();
        create_event(&store, event_draft("Old fair", LifecycleFlag::PastEvent, Some((1, 1))), &now)
            .await
            .unwrap();

        assert_eq!(admin_content(&store, "", Category::All).await.unwrap().len(), 3);
        let robotics = admin_content(&store, "ROBOTICS", Category::All).await.unwrap();
        assert_eq!(robotics.len(), 2);
        let upcoming = admin_content(&store, "", Category::Upcoming).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title(), "Robotics fair");
        assert!(admin_content(&store, "robotics", Category::Past).await.unwrap().is_empty());
    }
}
