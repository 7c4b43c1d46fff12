use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Stored news article
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::news)]
#[diesel(check_for_backend(Pg))]
pub struct NewsRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub image: Option<String>,
    pub author: String,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub views: i64,
    pub is_published: bool,
}

/// Insert struct for creating news articles
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::news)]
pub struct NewNewsRow<'a> {
    pub id: uuid::Uuid,
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub image: Option<&'a str>,
    pub author: &'a str,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_published: bool,
}

/// Full replacement of the editable columns
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::news, treat_none_as_null = true)]
pub struct NewsChangeset<'a> {
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub image: Option<&'a str>,
    pub author: &'a str,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_published: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
