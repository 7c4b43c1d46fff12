use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer};
use serde::Serialize;

use crate::error::AppResult;

/// Renders `result` as a JSON body with `status`, or as the error response.
pub async fn json<T: Serialize + Send>(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    status: StatusCode,
    result: AppResult<T>,
) {
    match result {
        Ok(body) => {
            res.status_code(status);
            res.render(Json(body));
        }
        Err(err) => err.write(req, depot, res).await,
    }
}

/// Answers 204 on success.
pub async fn no_content(req: &mut Request, depot: &mut Depot, res: &mut Response, result: AppResult<()>) {
    match result {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => err.write(req, depot, res).await,
    }
}
