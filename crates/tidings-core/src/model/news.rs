use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

use super::require_text;

/// A news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub image: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub is_published: bool,
}

impl NewsItem {
    /// Position of the article in the merged feed: publication time, else creation time.
    #[must_use]
    pub fn sort_instant(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// Admin-editable fields of a news article, used for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub author: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
}

impl NewsDraft {
    /// ## Summary
    /// Checks the required fields.
    ///
    /// ## Errors
    /// Returns `ValidationError` for a blank title or author.
    pub fn validate(&self) -> CoreResult<()> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        Ok(())
    }

    /// Stamps `published_at` when the draft publishes without a publication time.
    #[must_use]
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.is_published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self
    }
}
