use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use crate::app::api::extract::{json_body, pagination, path_id, query_value};
use crate::app::api::respond;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::model::{Booking, Page};
use tidings_core::types::BookingStatus;
use tidings_db::store::BookingFilter;
use tidings_service::booking;

/// ## Summary
/// Status change payload
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

async fn listed(req: &mut Request, depot: &mut Depot) -> AppResult<Page<Booking>> {
    let filter = BookingFilter {
        event_id: query_value(req, "event_id")?,
        status: query_value(req, "status")?,
        ..BookingFilter::default()
    };
    let page = pagination(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(booking::list_bookings(&store, filter, page).await?)
}

async fn change_status(req: &mut Request, depot: &mut Depot) -> AppResult<Booking> {
    let id = path_id(req)?;
    let update: StatusUpdate = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(booking::set_status(&store, id, update.status).await?)
}

/// ## Summary
/// GET /api/admin/bookings?event_id&status&page&per_page
#[handler]
async fn list_bookings(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = listed(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// PUT /api/admin/bookings/{id}/status - any status may follow any other.
#[handler]
async fn set_status(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = change_status(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("bookings")
        .get(list_bookings)
        .push(Router::with_path("{id}/status").put(set_status))
}
