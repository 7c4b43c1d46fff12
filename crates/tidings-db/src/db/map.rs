//! DB <-> domain mapping helpers.

use tidings_core::model::{Booking, EventDraft, EventItem, NewBooking, NewsDraft, NewsItem};
use tidings_core::speaker::RawSpeakerField;

use crate::model::booking::{BookingRow, NewBookingRow};
use crate::model::event::{EventChangeset, EventRow, NewEventRow};
use crate::model::news::{NewNewsRow, NewsChangeset, NewsRow};

/// Negative counters cannot be produced by the schema; read them as zero.
fn views_from_column(views: i64) -> u64 {
    u64::try_from(views).unwrap_or(0)
}

/// ## Summary
/// Encodes the speaker field for the `speakers` JSONB column.
///
/// A list becomes a JSON array and free text a JSON string, so the stored
/// shape round-trips unchanged. An absent field is stored as SQL `NULL`.
#[must_use]
pub fn speakers_column(field: &RawSpeakerField) -> Option<serde_json::Value> {
    if field.is_absent() {
        None
    } else {
        Some(serde_json::Value::from(field.clone()))
    }
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            short_description: row.short_description,
            full_description: row.full_description,
            image: row.image,
            author: row.author,
            published_at: row.published_at,
            created_at: row.created_at,
            views: views_from_column(row.views),
            is_published: row.is_published,
        }
    }
}

impl From<EventRow> for EventItem {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            short_description: row.short_description,
            full_description: row.full_description,
            image: row.image,
            author: row.author,
            lifecycle: row.lifecycle.into(),
            event_date: row.event_date,
            event_time: row.event_time,
            location: row.location,
            speakers: row.speakers.map(RawSpeakerField::from).unwrap_or_default(),
            speaker_name: row.speaker_name,
            presenter: row.presenter,
            youtube_link: row.youtube_link,
            created_at: row.created_at,
            views: views_from_column(row.views),
        }
    }
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            full_name: row.full_name,
            email: row.email,
            mobile_number: row.mobile_number,
            location: row.location,
            gender: row.gender.into(),
            education_background: row.education_background,
            employment_status: row.employment_status.into(),
            expectation: row.expectation,
            status: row.status.into(),
            booking_date: row.booking_date,
        }
    }
}

#[must_use]
pub fn new_news_row(id: uuid::Uuid, draft: &NewsDraft) -> NewNewsRow<'_> {
    NewNewsRow {
        id,
        title: &draft.title,
        short_description: &draft.short_description,
        full_description: &draft.full_description,
        image: draft.image.as_deref(),
        author: &draft.author,
        published_at: draft.published_at,
        is_published: draft.is_published,
    }
}

#[must_use]
pub fn news_changeset(draft: &NewsDraft, now: chrono::DateTime<chrono::Utc>) -> NewsChangeset<'_> {
    NewsChangeset {
        title: &draft.title,
        short_description: &draft.short_description,
        full_description: &draft.full_description,
        image: draft.image.as_deref(),
        author: &draft.author,
        published_at: draft.published_at,
        is_published: draft.is_published,
        updated_at: now,
    }
}

#[must_use]
pub fn new_event_row(id: uuid::Uuid, draft: &EventDraft) -> NewEventRow<'_> {
    NewEventRow {
        id,
        title: &draft.title,
        short_description: &draft.short_description,
        full_description: &draft.full_description,
        image: draft.image.as_deref(),
        author: &draft.author,
        lifecycle: draft.lifecycle.into(),
        event_date: draft.event_date,
        event_time: draft.event_time,
        location: draft.location.as_deref(),
        speakers: speakers_column(&draft.speakers),
        speaker_name: draft.speaker_name.as_deref(),
        presenter: draft.presenter.as_deref(),
        youtube_link: draft.youtube_link.as_deref(),
    }
}

#[must_use]
pub fn event_changeset(
    draft: &EventDraft,
    now: chrono::DateTime<chrono::Utc>,
) -> EventChangeset<'_> {
    EventChangeset {
        title: &draft.title,
        short_description: &draft.short_description,
        full_description: &draft.full_description,
        image: draft.image.as_deref(),
        author: &draft.author,
        lifecycle: draft.lifecycle.into(),
        event_date: draft.event_date,
        event_time: draft.event_time,
        location: draft.location.as_deref(),
        speakers: speakers_column(&draft.speakers),
        speaker_name: draft.speaker_name.as_deref(),
        presenter: draft.presenter.as_deref(),
        youtube_link: draft.youtube_link.as_deref(),
        updated_at: now,
    }
}

#[must_use]
pub fn new_booking_row(id: uuid::Uuid, booking: &NewBooking) -> NewBookingRow<'_> {
    NewBookingRow {
        id,
        event_id: booking.event_id,
        full_name: &booking.full_name,
        email: &booking.email,
        mobile_number: &booking.mobile_number,
        location: &booking.location,
        gender: booking.gender.into(),
        education_background: &booking.education_background,
        employment_status: booking.employment_status.into(),
        expectation: &booking.expectation,
        status: booking.status.into(),
        booking_date: booking.booking_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidings_core::types::LifecycleFlag;

    fn event_row(speakers: Option<serde_json::Value>) -> EventRow {
        let created = chrono::Utc::now();
        EventRow {
            id: uuid::Uuid::now_v7(),
            title: "Demo day".to_string(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            author: "admin".to_string(),
            lifecycle: crate::db::enums::LifecycleColumn::PastEvent,
            event_date: None,
            event_time: None,
            location: None,
            speakers,
            speaker_name: Some("Chidi".to_string()),
            presenter: None,
            youtube_link: None,
            created_at: created,
            updated_at: created,
            views: 12,
        }
    }

    #[test]
    fn test_event_row_maps_speaker_shapes() {
        let listed = EventItem::from(event_row(Some(serde_json::json!(["Ada", 4, "Kemi"]))));
        assert_eq!(
            listed.speakers,
            RawSpeakerField::List(vec!["Ada".to_string(), "Kemi".to_string()])
        );
        assert_eq!(listed.lifecycle, LifecycleFlag::PastEvent);
        assert_eq!(listed.views, 12);

        let missing = EventItem::from(event_row(None));
        assert!(missing.speakers.is_absent());
        assert_eq!(missing.speaker_list(), vec!["Chidi"]);
    }

    #[test]
    fn test_speakers_column_keeps_shape() {
        assert_eq!(speakers_column(&RawSpeakerField::Absent), None);
        assert_eq!(
            speakers_column(&RawSpeakerField::Text("Ada\nKemi".to_string())),
            Some(serde_json::json!("Ada\nKemi"))
        );
        assert_eq!(
            speakers_column(&RawSpeakerField::List(vec!["Ada".to_string()])),
            Some(serde_json::json!(["Ada"]))
        );
    }

    #[test]
    fn test_negative_views_read_as_zero() {
        assert_eq!(views_from_column(-3), 0);
        assert_eq!(views_from_column(7), 7);
    }
}
