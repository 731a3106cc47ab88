//! Request metrics middleware.

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response};

use crate::{
    observability::Metrics,
    web::{BoxedHandler, Handler, Middleware, WebError},
};

/// Counts requests and handler errors into a shared [`Metrics`].
///
/// Never changes the response and always returns the inner result.
#[derive(Debug, Clone)]
pub(crate) struct RecordMetrics {
    metrics: Arc<Metrics>,
}

impl RecordMetrics {
    pub(crate) fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

struct Measured {
    metrics: Arc<Metrics>,
    inner: BoxedHandler,
}

impl Middleware for RecordMetrics {
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler {
        Arc::new(Measured {
            metrics: self.metrics.clone(),
            inner,
        })
    }
}

#[async_trait]
impl Handler for Measured {
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let _in_flight = self.metrics.track();

        let result = self.inner.call(req, depot, res).await;

        self.metrics.record(result.is_err());

        result
    }
}
