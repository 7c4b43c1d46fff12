//! Records of the three collections and the drafts used to write them.

pub mod booking;
pub mod event;
pub mod news;
pub mod page;
pub mod time_of_day;

pub use booking::{Booking, BookingForm, NewBooking};
pub use event::{EventDraft, EventItem};
pub use news::{NewsDraft, NewsItem};
pub use page::{Page, Pagination};

use crate::error::{CoreError, CoreResult};

/// Rejects a blank required text field.
pub(crate) fn require_text(field: &'static str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}
