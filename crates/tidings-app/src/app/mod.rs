pub mod api;

use std::sync::Arc;

use salvo::Router;

use crate::config::{ConfigHandler, Settings};
use crate::store_handler::{FeedHandler, StoreHandler};
use tidings_core::schedule::SiteClock;
use tidings_db::store::Store;
use tidings_service::feed::FeedHandle;

/// Everything the handlers read from the depot.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub clock: SiteClock,
    pub store: Store,
    pub feed: FeedHandle,
}

/// ## Summary
/// Builds the root router with the shared state hoops and every API route.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn router(context: AppContext) -> anyhow::Result<Router> {
    Ok(Router::new()
        .hoop(ConfigHandler {
            settings: context.settings,
            clock: context.clock,
        })
        .hoop(StoreHandler {
            store: context.store,
        })
        .hoop(FeedHandler { feed: context.feed })
        .push(api::routes()?))
}
