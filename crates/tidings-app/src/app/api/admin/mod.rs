//! Back-office API. Every route sits behind [`AdminGuard`].

mod bookings;
mod content;
mod dashboard;
mod events;
mod news;

use salvo::Router;

use super::ADMIN_ROUTE_COMPONENT;
use crate::middleware::auth::AdminGuard;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ADMIN_ROUTE_COMPONENT)
        .hoop(AdminGuard)
        .push(content::routes())
        .push(news::routes())
        .push(events::routes())
        .push(bookings::routes())
        .push(dashboard::routes())
}
