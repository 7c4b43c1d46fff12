use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::http::header::AUTHORIZATION;
use serde::Serialize;

use crate::auth::password::verify_password;
use crate::error::{ServiceError, ServiceResult};
use tidings_core::config::{AuthConfig, AuthMethod};

/// Header read by proxy authentication when none is configured.
pub const DEFAULT_PROXY_HEADER: &str = "X-Remote-User";

/// The administrator behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub name: String,
    /// How the identity was established.
    pub method: &'static str,
}

fn authenticate_single_user(config: &AuthConfig) -> ServiceResult<AdminIdentity> {
    let single_user = config
        .single_user
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Single user config is missing".to_string(),
        ))?;

    Ok(AdminIdentity {
        name: single_user.name.clone(),
        method: "single_user",
    })
}

/// Extracts `(username, password)` from an `Authorization: Basic` header.
fn basic_credentials(req: &salvo::Request) -> Option<(String, String)> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn authenticate_basic(req: &salvo::Request, config: &AuthConfig) -> ServiceResult<AdminIdentity> {
    let basic = config
        .basic_auth
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Basic auth config is missing".to_string(),
        ))?;

    let (username, password) = basic_credentials(req).ok_or(ServiceError::NotAuthenticated)?;
    if username != basic.username {
        tracing::debug!(%username, "Unknown basic auth user");
        return Err(ServiceError::NotAuthenticated);
    }
    verify_password(&password, &basic.password_hash)?;

    Ok(AdminIdentity {
        name: username,
        method: "basic_auth",
    })
}

fn authenticate_proxy(req: &salvo::Request, config: &AuthConfig) -> ServiceResult<AdminIdentity> {
    let header = config
        .proxy
        .as_ref()
        .map_or(DEFAULT_PROXY_HEADER, |proxy| proxy.header.as_str());

    let name = req
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ServiceError::NotAuthenticated)?;

    Ok(AdminIdentity {
        name: name.to_string(),
        method: "proxy",
    })
}

/// ## Summary
/// Resolves the administrator behind `req` using the configured method.
///
/// ## Errors
/// Returns `NotAuthenticated` when the request carries no valid credentials
/// and `InvalidConfiguration` when the selected method is not configured.
#[tracing::instrument(skip(req, config), fields(method = ?config.method))]
pub fn authenticate(req: &salvo::Request, config: &AuthConfig) -> ServiceResult<AdminIdentity> {
    match config.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::BasicAuth => authenticate_basic(req, config),
        AuthMethod::Proxy => authenticate_proxy(req, config),
    }
}
