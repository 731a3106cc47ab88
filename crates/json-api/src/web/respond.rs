//! Response writing.
//!
//! A request gets exactly one response. Once a status has been set, later
//! writes are refused and reported as errors instead.

use salvo::{Response, http::StatusCode, prelude::Json};
use serde::Serialize;

use super::WebError;

/// Write `body` as JSON with `status`.
pub(crate) fn respond<T>(res: &mut Response, status: StatusCode, body: T) -> Result<(), WebError>
where
    T: Serialize + Send,
{
    ensure_unwritten(res)?;

    res.status_code(status);
    res.render(Json(body));

    Ok(())
}

/// Write a status with no body, e.g. `204 No Content`.
pub(crate) fn respond_empty(res: &mut Response, status: StatusCode) -> Result<(), WebError> {
    ensure_unwritten(res)?;

    res.status_code(status);

    Ok(())
}

fn ensure_unwritten(res: &Response) -> Result<(), WebError> {
    match res.status_code {
        Some(written) => Err(WebError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("response already written with status {written}"),
        )),
        None => Ok(()),
    }
}
