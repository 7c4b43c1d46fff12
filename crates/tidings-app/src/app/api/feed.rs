use chrono::{DateTime, Utc};
use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;

use super::extract::query_value;
use super::respond;
use crate::error::AppResult;
use crate::store_handler::get_feed_from_depot;
use tidings_core::feed::FeedItem;
use tidings_service::feed::FeedWindow;

/// The whole merged feed as last fetched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullFeed {
    pub items: Vec<FeedItem>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

fn window(req: &Request, depot: &Depot) -> AppResult<FeedWindow> {
    let snapshot = get_feed_from_depot(depot)?.snapshot();
    Ok(match query_value::<usize>(req, "start")? {
        Some(start) => snapshot.window_at(start),
        None => snapshot.window(),
    })
}

/// ## Summary
/// GET /api/feed - the live carousel window, or the window at `?start=N`.
#[handler]
async fn get_window(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = window(req, depot);
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

/// ## Summary
/// GET /api/feed/all - every feed entry in feed order.
#[handler]
async fn get_all(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = get_feed_from_depot(depot).map(|feed| {
        let snapshot = feed.snapshot();
        FullFeed {
            items: snapshot.items.to_vec(),
            refreshed_at: snapshot.refreshed_at,
        }
    });
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("feed")
        .get(get_window)
        .push(Router::with_path("all").get(get_all))
}
