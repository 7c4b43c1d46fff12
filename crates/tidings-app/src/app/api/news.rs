use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use super::extract::{pagination, path_id};
use super::respond;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::model::{NewsItem, Page};
use tidings_service::content;

async fn published(req: &mut Request, depot: &mut Depot) -> AppResult<Page<NewsItem>> {
    let store = get_store_from_depot(depot)?;
    Ok(content::list_published_news(&store, pagination(req)?).await?)
}

async fn one(req: &mut Request, depot: &mut Depot) -> AppResult<NewsItem> {
    let id = path_id(req)?;
    let store = get_store_from_depot(depot)?;
    Ok(content::read_news(&store, id).await?)
}

/// ## Summary
/// GET /api/news - published articles, newest first, paginated.
#[handler]
async fn list_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = published(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// GET /api/news/{id} - one published article.
///
/// ## Side Effects
/// Increments the article's view count.
#[handler]
async fn get_news(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = one(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("news")
        .get(list_news)
        .push(Router::with_path("{id}").get(get_news))
}
