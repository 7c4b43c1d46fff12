use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::LifecycleColumn, schema};

/// Stored event announcement
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::event)]
#[diesel(check_for_backend(Pg))]
pub struct EventRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub image: Option<String>,
    pub author: String,
    pub lifecycle: LifecycleColumn,
    pub event_date: Option<chrono::NaiveDate>,
    pub event_time: Option<chrono::NaiveTime>,
    pub location: Option<String>,
    pub speakers: Option<serde_json::Value>,
    pub speaker_name: Option<String>,
    pub presenter: Option<String>,
    pub youtube_link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub views: i64,
}

/// Insert struct for creating events
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::event)]
pub struct NewEventRow<'a> {
    pub id: uuid::Uuid,
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub image: Option<&'a str>,
    pub author: &'a str,
    pub lifecycle: LifecycleColumn,
    pub event_date: Option<chrono::NaiveDate>,
    pub event_time: Option<chrono::NaiveTime>,
    pub location: Option<&'a str>,
    pub speakers: Option<serde_json::Value>,
    pub speaker_name: Option<&'a str>,
    pub presenter: Option<&'a str>,
    pub youtube_link: Option<&'a str>,
}

/// Full replacement of the editable columns
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::event, treat_none_as_null = true)]
pub struct EventChangeset<'a> {
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub image: Option<&'a str>,
    pub author: &'a str,
    pub lifecycle: LifecycleColumn,
    pub event_date: Option<chrono::NaiveDate>,
    pub event_time: Option<chrono::NaiveTime>,
    pub location: Option<&'a str>,
    pub speakers: Option<serde_json::Value>,
    pub speaker_name: Option<&'a str>,
    pub presenter: Option<&'a str>,
    pub youtube_link: Option<&'a str>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
