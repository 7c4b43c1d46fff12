use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::app::api::respond;
use crate::config::get_clock_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::model::EventDraft;
use tidings_service::clock::Moment;
use tidings_service::content::{self, EventView};

async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<EventView> {
    let draft: EventDraft = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    Ok(content::create_event(&store, draft, &now).await?)
}

async fn fetch(req: &mut Request, depot: &mut Depot) -> AppResult<EventView> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    Ok(content::get_event(&store, id, &now).await?)
}

async fn replace(req: &mut Request, depot: &mut Depot) -> AppResult<EventView> {
    let id = path_id(req)?;
    let draft: EventDraft = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    Ok(content::update_event(&store, id, draft, &now).await?)
}

async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<()> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(content::delete_event(&store, id).await?)
}

/// ## Summary
/// POST /api/admin/events
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = create(req, depot).await;
    respond::json(req, depot, res, StatusCode::CREATED, result).await;
}

/// ## Summary
/// GET /api/admin/events/{id} - one event with its derived fields. Not counted
/// as a view.
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = fetch(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// PUT /api/admin/events/{id}
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = replace(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// DELETE /api/admin/events/{id} - removes the event and its bookings.
#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = remove(req, depot).await;
    respond::no_content(req, depot, res, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events").post(create_event).push(
        Router::with_path("{id}")
            .get(get_event)
            .put(update_event)
            .delete(delete_event),
    )
}
