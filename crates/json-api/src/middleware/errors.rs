//! Error translation middleware.

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response};
use tracing::{error, warn};

use crate::web::{BoxedHandler, Handler, Middleware, WebError};

/// Logs handler errors and turns them into the JSON error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Errors;

struct Translated {
    inner: BoxedHandler,
}

impl Middleware for Errors {
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler {
        Arc::new(Translated { inner })
    }
}

#[async_trait]
impl Handler for Translated {
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let Err(web_error) = self.inner.call(req, depot, res).await else {
            return Ok(());
        };

        let status = web_error.status().as_u16();

        if web_error.status().is_server_error() {
            error!(status, error = %web_error.chain(), "request failed");
        } else {
            warn!(status, error = %web_error, "request rejected");
        }

        // Already answered: leave the response alone and let the router log it.
        if res.status_code.is_some() {
            return Err(web_error);
        }

        web_error.render(res);

        Ok(())
    }
}
