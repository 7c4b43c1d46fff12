//! Request parsing shared by the handlers.

use std::str::FromStr;

use salvo::Request;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use tidings_core::model::Pagination;

/// ## Errors
/// Returns `BadRequest` when the `id` path segment is not a UUID.
pub fn path_id(req: &Request) -> AppResult<uuid::Uuid> {
    let raw = req.param::<String>("id").unwrap_or_default();
    raw.parse()
        .map_err(|_err| AppError::BadRequest(format!("'{raw}' is not a valid id")))
}

/// ## Summary
/// Parses an optional query parameter. A blank value counts as absent.
///
/// ## Errors
/// Returns `BadRequest` naming the parameter when its value does not parse.
pub fn query_value<T: FromStr>(req: &Request, key: &str) -> AppResult<Option<T>> {
    match req.query::<String>(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_err| AppError::BadRequest(format!("invalid value for '{key}': {raw}"))),
        _ => Ok(None),
    }
}

/// ## Errors
/// Returns `BadRequest` for a non-numeric `page` or `per_page`.
pub fn pagination(req: &Request) -> AppResult<Pagination> {
    Ok(Pagination::from_page(
        query_value(req, "page")?,
        query_value(req, "per_page")?,
    ))
}

/// ## Errors
/// Returns `BadRequest` when the body is not the expected JSON.
pub async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>().await.map_err(|err| {
        tracing::debug!(error = %err, "Failed to parse request body");
        AppError::BadRequest(format!("invalid request body: {err}"))
    })
}
