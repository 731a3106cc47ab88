//! Request-level logging and request IDs.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use salvo::{
    Depot, Request, Response,
    http::{StatusCode, header::HeaderValue},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

use crate::web::{BoxedHandler, Handler, Middleware, WebError};

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Opens an `http.request` span per request and logs its outcome.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLog {
    slow_request_threshold: Duration,
}

impl RequestLog {
    pub(crate) fn new(slow_request_threshold: Duration) -> Self {
        Self {
            slow_request_threshold,
        }
    }
}

struct Logged {
    slow_request_threshold: Duration,
    inner: BoxedHandler,
}

impl Middleware for RequestLog {
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler {
        Arc::new(Logged {
            slow_request_threshold: self.slow_request_threshold,
            inner,
        })
    }
}

#[async_trait]
impl Handler for Logged {
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let started = Instant::now();

        let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();

        let span = tracing::info_span!(
            "http.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        let result = self
            .inner
            .call(req, depot, res)
            .instrument(span.clone())
            .await;

        let duration = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = duration.as_millis();
        let threshold_ms = self.slow_request_threshold.as_millis();

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(status = status.as_u16(), "server error response");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), "client error response");
            }

            if duration > self.slow_request_threshold {
                warn!(duration_ms, threshold_ms, "slow request detected");
            }
        });

        result
    }
}

fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}
