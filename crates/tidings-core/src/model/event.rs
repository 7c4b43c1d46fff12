use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SPEAKER_PLACEHOLDER;
use crate::error::{CoreError, CoreResult};
use crate::schedule::{self, EventSchedule};
use crate::speaker::{RawSpeakerField, SpeakerSources, normalize_speakers};
use crate::types::LifecycleFlag;

use super::require_text;

/// An event announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub image: Option<String>,
    pub author: String,
    pub lifecycle: LifecycleFlag,
    pub event_date: Option<NaiveDate>,
    #[serde(default, with = "super::time_of_day")]
    pub event_time: Option<NaiveTime>,
    pub location: Option<String>,
    #[serde(default)]
    pub speakers: RawSpeakerField,
    pub speaker_name: Option<String>,
    pub presenter: Option<String>,
    pub youtube_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub views: u64,
}

impl EventItem {
    /// Position of the event in the merged feed: the event date at midnight UTC,
    /// else the creation time.
    #[must_use]
    pub fn sort_instant(&self) -> DateTime<Utc> {
        self.event_date
            .map_or(self.created_at, |date| date.and_time(NaiveTime::MIN).and_utc())
    }

    #[must_use]
    pub fn schedule(&self) -> EventSchedule {
        EventSchedule {
            lifecycle: self.lifecycle,
            date: self.event_date,
            time: self.event_time,
        }
    }

    #[must_use]
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        schedule::is_upcoming(&self.schedule(), now)
    }

    /// Normalized speaker names with the default placeholder.
    #[must_use]
    pub fn speaker_list(&self) -> Vec<String> {
        normalize_speakers(
            &SpeakerSources {
                raw: &self.speakers,
                speaker_name: self.speaker_name.as_deref(),
                presenter: self.presenter.as_deref(),
                author: Some(&self.author),
            },
            DEFAULT_SPEAKER_PLACEHOLDER,
        )
    }
}

/// Admin-editable fields of an event, used for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub author: String,
    pub lifecycle: LifecycleFlag,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default, with = "super::time_of_day")]
    pub event_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub speakers: RawSpeakerField,
    #[serde(default)]
    pub speaker_name: Option<String>,
    #[serde(default)]
    pub presenter: Option<String>,
    #[serde(default)]
    pub youtube_link: Option<String>,
}

impl EventDraft {
    /// ## Summary
    /// Checks the required fields and the video link.
    ///
    /// ## Errors
    /// Returns `ValidationError` for a blank title or author, or a video link
    /// that is not an http(s) URL.
    pub fn validate(&self) -> CoreResult<()> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        if let Some(link) = self.youtube_link.as_deref().map(str::trim)
            && !link.is_empty()
            && !(link.starts_with("https://") || link.starts_with("http://"))
        {
            return Err(CoreError::ValidationError(
                "youtubeLink must be an http(s) URL".to_string(),
            ));
        }
        Ok(())
    }
}
