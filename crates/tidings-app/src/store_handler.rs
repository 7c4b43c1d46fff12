use salvo::async_trait;

use crate::error::AppResult;
use tidings_core::error::CoreError;
use tidings_db::store::Store;
use tidings_service::feed::FeedHandle;

pub struct StoreHandler {
    pub store: Store,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.store.clone());
    }
}

/// ## Summary
/// Retrieves the store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Store> {
    depot
        .obtain::<Store>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Store not found in depot").into())
}

/// Gives requests read access to the home feed session.
pub struct FeedHandler {
    pub feed: FeedHandle,
}

#[async_trait]
impl salvo::Handler for FeedHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.feed.clone());
    }
}

/// ## Errors
/// Returns an error if the feed handle is not found in the depot.
pub fn get_feed_from_depot(depot: &salvo::Depot) -> AppResult<FeedHandle> {
    depot
        .obtain::<FeedHandle>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Feed not found in depot").into())
}
