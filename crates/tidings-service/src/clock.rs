use chrono::{DateTime, NaiveDateTime, Utc};

use tidings_core::schedule::SiteClock;

/// One instant seen both as UTC (for stamps) and as site wall time (for
/// schedule checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub utc: DateTime<Utc>,
    pub local: NaiveDateTime,
}

impl Moment {
    #[must_use]
    pub fn now(clock: &SiteClock) -> Self {
        Self::at(clock, Utc::now())
    }

    #[must_use]
    pub fn at(clock: &SiteClock, utc: DateTime<Utc>) -> Self {
        Self {
            utc,
            local: clock.local(utc),
        }
    }
}
