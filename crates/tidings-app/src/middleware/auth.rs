use salvo::http::StatusCode;
use salvo::http::header::WWW_AUTHENTICATE;
use salvo::{Depot, Writer};
use tracing::error;

use crate::config::{AuthMethod, get_config_from_depot};
use crate::error::AppError;
use tidings_service::auth::authenticate;

/// ## Summary
/// Guards the admin routes.
///
/// ## Side Effects
/// Injects the [`AdminIdentity`](tidings_service::auth::AdminIdentity) into
/// the depot for downstream handlers.
///
/// ## Errors
/// Responds 401 when the request carries no valid admin credentials and 500
/// when the configured method cannot be used. Either way the rest of the
/// chain is skipped.
pub struct AdminGuard;

#[salvo::async_trait]
impl salvo::Handler for AdminGuard {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config.auth) {
            Ok(identity) => {
                tracing::debug!(admin = %identity.name, via = identity.method, "Admin authenticated");
                depot.inject(identity);
            }
            Err(err) => {
                if matches!(config.auth.method, AuthMethod::BasicAuth) {
                    res.add_header(WWW_AUTHENTICATE, r#"Basic realm="tidings""#, true)
                        .ok();
                }
                AppError::from(err).write(req, depot, res).await;
                ctrl.skip_rest();
            }
        }
    }
}
