mod admin;
mod app_specific;
mod events;
mod extract;
mod feed;
mod news;
mod respond;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod admin_tests;

use salvo::Router;

// Re-export route constants from core
pub use tidings_core::constants::{
    ADMIN_ROUTE_COMPONENT, ADMIN_ROUTE_PREFIX, API_ROUTE_COMPONENT, API_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: public reads, booking intake and the guarded
/// admin tree.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(feed::routes())
        .push(news::routes())
        .push(events::routes())
        .push(admin::routes()))
}
