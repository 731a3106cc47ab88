//! Route registration.

use std::sync::Arc;

use salvo::{Depot, Request, Response, Router, handler, http::Method};
use thiserror::Error;
use tracing::error;

use super::{BoxedHandler, Handler, Middleware};

/// A route that could not be registered.
#[derive(Debug, Error)]
pub(crate) enum RouteError {
    #[error("cannot register {method} {pattern}: unsupported method")]
    UnsupportedMethod { method: Method, pattern: String },
}

/// Collects routes, wrapping each handler in the full middleware chain as it
/// is registered. [`App::into_router`] hands the finished routes to salvo;
/// nothing can be registered after that.
pub(crate) struct App {
    router: Router,
    middleware: Vec<Arc<dyn Middleware>>,
    error: Option<RouteError>,
}

impl App {
    /// `middleware` is listed outermost first.
    pub(crate) fn new(middleware: Vec<Arc<dyn Middleware>>) -> Self {
        Self {
            router: Router::new(),
            middleware,
            error: None,
        }
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// Patterns use salvo's syntax, e.g. `/products/{id}`. A registration
    /// failure is held until [`App::into_router`], and later routes are
    /// ignored.
    #[must_use]
    pub(crate) fn handle(mut self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        if self.error.is_some() {
            return self;
        }

        let endpoint = Endpoint {
            handler: self.wrap(Arc::new(handler)),
        };

        let route = Router::with_path(pattern);

        let route = match method {
            Method::GET => route.get(endpoint),
            Method::POST => route.post(endpoint),
            Method::PUT => route.put(endpoint),
            Method::PATCH => route.patch(endpoint),
            Method::DELETE => route.delete(endpoint),
            method => {
                self.error = Some(RouteError::UnsupportedMethod {
                    method,
                    pattern: pattern.to_string(),
                });

                return self;
            }
        };

        self.router = self.router.push(route);
        self
    }

    /// The finished route table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteError`] raised while registering routes.
    pub(crate) fn into_router(self) -> Result<Router, RouteError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.router),
        }
    }

    fn wrap(&self, handler: BoxedHandler) -> BoxedHandler {
        self.middleware
            .iter()
            .rev()
            .fold(handler, |inner, layer| layer.wrap(inner))
    }
}

/// Bridges a wrapped handler into salvo. Anything still failing here was not
/// translated by the chain.
struct Endpoint {
    handler: BoxedHandler,
}

#[handler]
impl Endpoint {
    async fn handle(&self, req: &mut Request, depot: &mut Depot, res: &mut Response) {
        let Err(error) = self.handler.call(req, depot, res).await else {
            return;
        };

        error!(
            status = error.status().as_u16(),
            error = %error.chain(),
            "error escaped middleware chain"
        );

        if res.status_code.is_none() {
            error.render(res);
        }
    }
}
