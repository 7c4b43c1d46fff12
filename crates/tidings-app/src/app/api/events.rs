use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use super::extract::{json_body, path_id};
use super::respond;
use crate::config::get_clock_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::model::{Booking, BookingForm};
use tidings_service::clock::Moment;
use tidings_service::content::{self, EventView};

fn now(depot: &Depot) -> AppResult<Moment> {
    Ok(Moment::now(&get_clock_from_depot(depot)?))
}

async fn upcoming(depot: &mut Depot) -> AppResult<Vec<EventView>> {
    let store = get_store_from_depot(depot)?;
    Ok(content::upcoming_events(&store, &now(depot)?).await?)
}

async fn past(depot: &mut Depot) -> AppResult<Vec<EventView>> {
    let store = get_store_from_depot(depot)?;
    Ok(content::past_events(&store, &now(depot)?).await?)
}

async fn one(req: &mut Request, depot: &mut Depot) -> AppResult<EventView> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(content::read_event(&store, id, &now(depot)?).await?)
}

async fn book(req: &mut Request, depot: &mut Depot) -> AppResult<Booking> {
    let event_id = path_id(req)?;
    let form: BookingForm = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(tidings_service::booking::create_booking(&store, event_id, form, &now(depot)?).await?)
}

/// ## Summary
/// GET /api/events/upcoming - events still ahead, soonest first.
#[handler]
async fn list_upcoming(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = upcoming(depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// GET /api/events/past - events flagged as past, most recent first.
#[handler]
async fn list_past(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = past(depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// GET /api/events/{id} - one event with its speakers and upcoming state.
///
/// ## Side Effects
/// Increments the event's view count.
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = one(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// POST /api/events/{id}/bookings - public registration.
///
/// ## Side Effects
/// Creates a pending booking.
///
/// ## Errors
/// 409 for a duplicate registration, 422 when the event is not open, 400
/// for an invalid form.
#[handler]
async fn create_booking(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = book(req, depot).await;
    respond::json(req, depot, res, StatusCode::CREATED, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events")
        .push(Router::with_path("upcoming").get(list_upcoming))
        .push(Router::with_path("past").get(list_past))
        .push(
            Router::with_path("{id}")
                .get(get_event)
                .push(Router::with_path("bookings").post(create_booking)),
        )
}
