//! Depot helper extensions.

use std::any::Any;

use salvo::{Depot, http::StatusCode};

use crate::web::WebError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, WebError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, WebError> {
        self.obtain::<T>().map_err(|_ignored| {
            WebError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} missing from depot", std::any::type_name::<T>()),
            )
        })
    }
}
