//! Result helper extensions for HTTP handlers.

use std::error::Error;

use crate::web::WebError;

/// Map any error to an internal server error that keeps its source for logs.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, WebError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn or_500(self, context: &str) -> Result<T, WebError> {
        self.map_err(|error| WebError::internal(context, error))
    }
}
