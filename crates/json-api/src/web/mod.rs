//! Minimal application shell over the salvo router.
//!
//! Handlers report failure by returning a [`WebError`] rather than writing an
//! error response themselves. Cross-cutting behaviour is layered on with
//! [`Middleware`], each of which turns one [`Handler`] into another.

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response};

mod app;
mod error;
mod respond;

pub(crate) use app::{App, RouteError};
pub(crate) use error::WebError;
pub(crate) use respond::{respond, respond_empty};

/// A single request handler.
#[async_trait]
pub(crate) trait Handler: Send + Sync + 'static {
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError>;
}

pub(crate) type BoxedHandler = Arc<dyn Handler>;

/// Wraps a handler in behaviour that runs before and/or after it.
///
/// A middleware must hand the inner error back to its caller unless it has
/// written a response for it.
pub(crate) trait Middleware: Send + Sync {
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler;
}
