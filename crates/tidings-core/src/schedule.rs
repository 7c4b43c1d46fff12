//! Upcoming/expired classification of events.
//!
//! ## Summary
//! An event's lifecycle flag is the admin's stored intent. Whether an event is
//! still ahead is derived on every evaluation from the flag, the optional date,
//! the optional time of day and the current wall-clock time of the site. None
//! of the derived values are persisted.
//!
//! All instants here are naive wall-clock values in the site timezone, see
//! [`SiteClock`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::types::LifecycleFlag;

/// The scheduling fields of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    pub lifecycle: LifecycleFlag,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

/// ## Summary
/// Returns the instant after which an event on `date` is no longer upcoming.
///
/// With a time of day the expiry is that hour and minute (seconds dropped);
/// without one it is the last millisecond of the day, so an event with no
/// start time stays listed for its whole date.
#[must_use]
pub fn expiry_instant(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    let time_of_day = time
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
        .unwrap_or_else(end_of_day);
    date.and_time(time_of_day)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// ## Summary
/// Whether the event is upcoming at `now`.
///
/// Only `ComingSoon` events can be upcoming. A `ComingSoon` event without a
/// date is always upcoming; with a date it is upcoming strictly before its
/// [`expiry_instant`].
#[must_use]
pub fn is_upcoming(schedule: &EventSchedule, now: NaiveDateTime) -> bool {
    if schedule.lifecycle != LifecycleFlag::ComingSoon {
        return false;
    }
    match schedule.date {
        None => true,
        Some(date) => now < expiry_instant(date, schedule.time),
    }
}

/// ## Summary
/// Whether the event is still flagged `ComingSoon` but its date has passed.
///
/// Such an event appears on neither the upcoming nor the past public lists
/// until an admin re-flags it.
#[must_use]
pub fn is_expired(schedule: &EventSchedule, now: NaiveDateTime) -> bool {
    schedule.lifecycle == LifecycleFlag::ComingSoon && !is_upcoming(schedule, now)
}

/// Whether the event belongs on the public past-events list.
#[must_use]
pub fn is_past(schedule: &EventSchedule) -> bool {
    schedule.lifecycle == LifecycleFlag::PastEvent
}

/// Wall clock of the site, in the timezone event dates are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteClock {
    tz: Tz,
}

impl SiteClock {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// Current local wall-clock time of the site.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.local(Utc::now())
    }

    /// Converts a UTC instant to the site's wall-clock time.
    #[must_use]
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }
}

impl Default for SiteClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
