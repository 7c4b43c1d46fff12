use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::query_value;
use crate::app::api::respond;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_core::feed::FeedItem;
use tidings_core::types::Category;

async fn filtered(req: &mut Request, depot: &mut Depot) -> AppResult<Vec<FeedItem>> {
    let search = req.query::<String>("search").unwrap_or_default();
    let category = query_value::<Category>(req, "category")?.unwrap_or_default();
    let store = get_store_from_depot(depot)?;
    Ok(tidings_service::content::admin_content(&store, &search, category).await?)
}

/// ## Summary
/// GET /api/admin/content?search&category - all news and events in feed
/// order, narrowed by a case-insensitive search and a category.
#[handler]
async fn list_content(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = filtered(req, depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("content").get(list_content)
}
