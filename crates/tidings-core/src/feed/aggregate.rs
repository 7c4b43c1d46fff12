use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EventItem, NewsItem};
use crate::types::{ContentType, LifecycleFlag};

/// One entry of the merged feed, tagged with the collection it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contentType", rename_all = "lowercase")]
pub enum FeedItem {
    News(NewsItem),
    Event(EventItem),
}

/// Identity of a feed entry. Ids are only unique within their own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedKey {
    pub content_type: ContentType,
    pub id: uuid::Uuid,
}

impl FeedItem {
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::News(_) => ContentType::News,
            Self::Event(_) => ContentType::Event,
        }
    }

    #[must_use]
    pub const fn id(&self) -> uuid::Uuid {
        match self {
            Self::News(news) => news.id,
            Self::Event(event) => event.id,
        }
    }

    #[must_use]
    pub const fn key(&self) -> FeedKey {
        FeedKey {
            content_type: self.content_type(),
            id: self.id(),
        }
    }

    #[must_use]
    pub fn sort_instant(&self) -> DateTime<Utc> {
        match self {
            Self::News(news) => news.sort_instant(),
            Self::Event(event) => event.sort_instant(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::News(news) => &news.title,
            Self::Event(event) => &event.title,
        }
    }

    #[must_use]
    pub fn short_description(&self) -> &str {
        match self {
            Self::News(news) => &news.short_description,
            Self::Event(event) => &event.short_description,
        }
    }

    #[must_use]
    pub fn author(&self) -> &str {
        match self {
            Self::News(news) => &news.author,
            Self::Event(event) => &event.author,
        }
    }

    /// The admin lifecycle flag, for events only.
    #[must_use]
    pub const fn lifecycle(&self) -> Option<LifecycleFlag> {
        match self {
            Self::News(_) => None,
            Self::Event(event) => Some(event.lifecycle),
        }
    }
}

/// ## Summary
/// Merges news and events into one feed, most recent first.
///
/// News is keyed by `published_at`, else `created_at`; events by `event_date`
/// (midnight UTC), else `created_at`. The sort is stable: entries with equal
/// keys keep their input order, news before events.
#[must_use]
pub fn aggregate(news: Vec<NewsItem>, events: Vec<EventItem>) -> Vec<FeedItem> {
    let mut merged: Vec<FeedItem> = news
        .into_iter()
        .map(FeedItem::News)
        .chain(events.into_iter().map(FeedItem::Event))
        .collect();
    merged.sort_by_key(|item| Reverse(item.sort_instant()));
    merged
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::speaker::RawSpeakerField;

    fn instant(text: &str) -> DateTime<Utc> {
        text.parse().unwrap()
    }

    fn news(title: &str, created: &str, published: Option<&str>) -> NewsItem {
        NewsItem {
            id: uuid::Uuid::now_v7(),
            title: title.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            published_at: published.map(instant),
            created_at: instant(created),
            views: 0,
            is_published: true,
        }
    }

    fn event(title: &str, created: &str, date: Option<(i32, u32, u32)>) -> EventItem {
        EventItem {
            id: uuid::Uuid::now_v7(),
            title: title.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "Desk".to_string(),
            lifecycle: LifecycleFlag::ComingSoon,
            event_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            event_time: None,
            location: None,
            speakers: RawSpeakerField::Absent,
            speaker_name: None,
            presenter: None,
            youtube_link: None,
            created_at: instant(created),
            views: 0,
        }
    }

    fn titles(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(FeedItem::title).collect()
    }

    #[test]
    fn test_empty_inputs_give_empty_feed() {
        assert!(aggregate(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_merges_newest_first_by_sort_key() {
        let feed = aggregate(
            vec![
                news("old news", "2025-01-01T10:00:00Z", None),
                news("published later", "2025-01-01T09:00:00Z", Some("2025-03-01T09:00:00Z")),
            ],
            vec![
                event("dated", "2024-12-01T00:00:00Z", Some((2025, 2, 15))),
                event("undated", "2025-01-20T00:00:00Z", None),
            ],
        );
        assert_eq!(
            titles(&feed),
            vec!["published later", "dated", "undated", "old news"]
        );
        assert_eq!(feed[1].content_type(), ContentType::Event);
    }

    #[test]
    fn test_ties_keep_news_before_events() {
        let feed = aggregate(
            vec![
                news("news a", "2025-02-15T00:00:00Z", None),
                news("news b", "2025-02-15T00:00:00Z", None),
            ],
            vec![event("event on the same instant", "2020-01-01T00:00:00Z", Some((2025, 2, 15)))],
        );
        assert_eq!(
            titles(&feed),
            vec!["news a", "news b", "event on the same instant"]
        );
    }

    #[test]
    fn test_resorting_output_is_identity() {
        let feed = aggregate(
            vec![
                news("n1", "2025-01-05T00:00:00Z", None),
                news("n2", "2025-01-05T00:00:00Z", None),
                news("n3", "2024-06-01T00:00:00Z", Some("2025-04-01T00:00:00Z")),
            ],
            vec![
                event("e1", "2025-01-05T00:00:00Z", None),
                event("e2", "2023-01-01T00:00:00Z", Some((2025, 1, 5))),
            ],
        );
        let mut resorted = feed.clone();
        resorted.sort_by_key(|item| Reverse(item.sort_instant()));
        assert_eq!(resorted, feed);
    }

    #[test]
    fn test_keys_distinguish_collections() {
        let shared = uuid::Uuid::now_v7();
        let mut a = news("n", "2025-01-01T00:00:00Z", None);
        a.id = shared;
        let mut b = event("e", "2025-01-01T00:00:00Z", None);
        b.id = shared;
        let feed = aggregate(vec![a], vec![b]);
        assert_ne!(feed[0].key(), feed[1].key());
        assert_eq!(feed[0].id(), feed[1].id());
    }

    #[test]
    fn test_serialized_entries_are_tagged() {
        let feed = aggregate(vec![news("n", "2025-01-01T00:00:00Z", None)], Vec::new());
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json[0]["contentType"], "news");
        assert_eq!(json[0]["title"], "n");
    }
}
