//! Event registration and the booking status machine.
//!
//! ## Summary
//! A booking starts `Pending`. Admins may move it to any of the three states
//! at any time; only creation is guarded. A person (by normalized email) holds
//! at most one non-cancelled booking per event, enforced atomically by the
//! store.

use tidings_core::model::{Booking, BookingForm, NewBooking, Page, Pagination};
use tidings_core::types::BookingStatus;
use tidings_db::error::DbError;
use tidings_db::store::{BookingFilter, BookingPatch, Store};

use crate::clock::Moment;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Registers `form` for the event `event_id`.
///
/// The event must be upcoming at `moment`. The target is checked before the
/// form, so a closed event reports as such even for a malformed submission.
///
/// ## Errors
/// - `NotFound` if the event does not exist
/// - `InvalidBookingTarget` if the event is not upcoming
/// - `ValidationError` for a malformed form
/// - `DuplicateRegistration` if the email already holds an active booking
///
/// ## Side Effects
/// Inserts one `Pending` booking dated `moment`.
#[tracing::instrument(skip(store, form, moment), fields(now = %moment.local))]
pub async fn create_booking(
    store: &Store,
    event_id: uuid::Uuid,
    form: BookingForm,
    moment: &Moment,
) -> ServiceResult<Booking> {
    let event = store.events.get_by_id(event_id).await?;
    if !event.is_upcoming(moment.local) {
        tracing::debug!(lifecycle = %event.lifecycle, "Booking target is closed");
        return Err(ServiceError::InvalidBookingTarget { event_id });
    }
    form.validate()?;

    let new_booking = NewBooking::pending(event_id, form, moment.utc);
    match store.bookings.create_unless_active(new_booking).await {
        Ok(booking) => {
            tracing::info!(booking_id = %booking.id, "Booking created");
            Ok(booking)
        }
        Err(DbError::Conflict(message)) => {
            tracing::debug!(%message, "Duplicate registration");
            Err(ServiceError::DuplicateRegistration { event_id })
        }
        Err(err) => Err(err.into()),
    }
}

/// ## Summary
/// Overwrites the status of a booking. Any state may follow any other;
/// repeating the current status succeeds without change. The one exception is
/// reviving a cancelled booking while the same email holds a newer active one
/// for the event.
///
/// ## Errors
/// - `NotFound` for an unknown id
/// - `DuplicateRegistration` if the change would leave two active bookings
#[tracing::instrument(skip(store), fields(status = %status))]
pub async fn set_status(
    store: &Store,
    booking_id: uuid::Uuid,
    status: BookingStatus,
) -> ServiceResult<Booking> {
    match store.bookings.update(booking_id, BookingPatch { status }).await {
        Ok(updated) => {
            tracing::info!("Booking status set");
            Ok(updated)
        }
        Err(DbError::Conflict(message)) => {
            let booking = store.bookings.get_by_id(booking_id).await?;
            tracing::debug!(%message, "Status change would duplicate an active booking");
            Err(ServiceError::DuplicateRegistration {
                event_id: booking.event_id,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store))]
pub async fn list_bookings(
    store: &Store,
    filter: BookingFilter,
    pagination: Pagination,
) -> ServiceResult<Page<Booking>> {
    Ok(store.bookings.list(filter, pagination).await?)
}

/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn get_booking(store: &Store, booking_id: uuid::Uuid) -> ServiceResult<Booking> {
    Ok(store.bookings.get_by_id(booking_id).await?)
}
