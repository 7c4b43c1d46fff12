use std::sync::Arc;

use salvo::async_trait;
pub use tidings_core::config::*;
use tidings_core::schedule::SiteClock;

use crate::error::{AppError, AppResult};

/// Shares the loaded settings and the site clock with every request.
pub struct ConfigHandler {
    pub settings: Arc<Settings>,
    pub clock: SiteClock,
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.settings));
        depot.inject(self.clock);
    }
}

/// ## Summary
/// Retrieves the application configuration from the depot.
///
/// ## Errors
/// Returns an error if the configuration is not found in the depot.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        AppError::from(tidings_core::error::CoreError::InvariantViolation(
            "Configuration not found in depot",
        ))
    })
}

/// ## Errors
/// Returns an error if the clock is not found in the depot.
pub fn get_clock_from_depot(depot: &salvo::Depot) -> AppResult<SiteClock> {
    depot.obtain::<SiteClock>().copied().map_err(|_err| {
        AppError::from(tidings_core::error::CoreError::InvariantViolation(
            "Site clock not found in depot",
        ))
    })
}
