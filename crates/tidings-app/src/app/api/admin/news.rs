use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::app::api::respond;
use crate::config::get_clock_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::model::{NewsDraft, NewsItem};
use tidings_service::clock::Moment;
use tidings_service::content;

async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<NewsItem> {
    let draft: NewsDraft = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    Ok(content::create_news(&store, draft, &now).await?)
}

async fn fetch(req: &mut Request, depot: &mut Depot) -> AppResult<NewsItem> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(content::get_news(&store, id).await?)
}

async fn replace(req: &mut Request, depot: &mut Depot) -> AppResult<NewsItem> {
    let id = path_id(req)?;
    let draft: NewsDraft = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    Ok(content::update_news(&store, id, draft, &now).await?)
}

async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<()> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(content::delete_news(&store, id).await?)
}

/// ## Summary
/// POST /api/admin/news
#[handler]
async fn create_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = create(req, depot).await;
    respond::json(req, depot, res, StatusCode::CREATED, result).await;
}

/// ## Summary
/// GET /api/admin/news/{id} - any article, published or not. Not counted as
/// a view.
#[handler]
async fn get_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = fetch(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// PUT /api/admin/news/{id}
#[handler]
async fn update_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = replace(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// DELETE /api/admin/news/{id}
#[handler]
async fn delete_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = remove(req, depot).await;
    respond::no_content(req, depot, res, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("news").post(create_news).push(
        Router::with_path("{id}")
            .get(get_news)
            .put(update_news)
            .delete(delete_news),
    )
}
