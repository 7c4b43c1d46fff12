use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::respond;
use crate::config::{get_clock_from_depot, get_config_from_depot};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use tidings_service::clock::Moment;
use tidings_service::dashboard::{DashboardStats, dashboard_stats};

async fn stats(depot: &mut Depot) -> AppResult<DashboardStats> {
    let settings = get_config_from_depot(depot)?;
    let now = Moment::now(&get_clock_from_depot(depot)?);
    let store = get_store_from_depot(depot)?;
    Ok(dashboard_stats(&store, &now, settings.dashboard.refresh_interval_ms).await?)
}

/// ## Summary
/// GET /api/admin/dashboard - counters plus the client refresh interval.
#[handler]
async fn get_dashboard(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = stats(depot).await;
    respond::json(req, depot, res, StatusCode::OK, result).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("dashboard").get(get_dashboard)
}
