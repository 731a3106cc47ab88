//! Prometheus metrics collection and exposition endpoint.

use std::sync::{
    Arc,
    atomic::{AtomicI64, AtomicU64, Ordering},
};

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TEXT_FORMAT, TextEncoder};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

/// Request counters shared between the metrics middleware and `/metrics`.
///
/// Each instance owns its registry, so tests can build as many as they like.
#[derive(Debug)]
pub(crate) struct Metrics {
    registry: Registry,
    requests: IntCounter,
    errors: IntCounter,
    concurrency: IntGauge,
    in_flight: AtomicI64,
    completed: AtomicU64,
    sample_every: u64,
}

impl Metrics {
    /// `sample_every` controls how often (in requests) the concurrency gauge
    /// is refreshed. Zero is treated as one.
    pub(crate) fn new(sample_every: u64) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounter::new(
            "stockroom_json_requests_total",
            "Total HTTP requests handled.",
        )?;

        let errors = IntCounter::new(
            "stockroom_json_errors_total",
            "HTTP requests whose handler returned an error.",
        )?;

        let concurrency = IntGauge::new(
            "stockroom_json_concurrency",
            "In-flight requests, sampled periodically.",
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(errors.clone()))?;
        registry.register(Box::new(concurrency.clone()))?;

        Ok(Self {
            registry,
            requests,
            errors,
            concurrency,
            in_flight: AtomicI64::new(0),
            completed: AtomicU64::new(0),
            sample_every: sample_every.max(1),
        })
    }

    /// Mark a request as started; it stays in flight until the guard drops.
    pub(crate) fn track(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        InFlight { metrics: self }
    }

    /// Count a completed request, sampling the concurrency gauge every
    /// `sample_every` requests. Returns whether this request took the sample.
    pub(crate) fn record(&self, failed: bool) -> bool {
        self.requests.inc();

        if failed {
            self.errors.inc();
        }

        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;

        if completed % self.sample_every != 0 {
            return false;
        }

        self.concurrency
            .set(self.in_flight.load(Ordering::Relaxed));

        true
    }

    #[cfg(test)]
    pub(crate) fn requests(&self) -> u64 {
        self.requests.get()
    }

    #[cfg(test)]
    pub(crate) fn errors(&self) -> u64 {
        self.errors.get()
    }

    #[cfg(test)]
    pub(crate) fn concurrency(&self) -> i64 {
        self.concurrency.get()
    }

    fn encode(&self) -> Result<String, prometheus::Error> {
        let mut encoded = Vec::new();

        TextEncoder::new().encode(&self.registry.gather(), &mut encoded)?;

        Ok(String::from_utf8_lossy(&encoded).into_owned())
    }
}

/// Decrements the in-flight count on drop, including when the request future
/// is cancelled.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    metrics: &'a Metrics,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Serves a [`Metrics`] registry in the Prometheus text format.
#[derive(Debug, Clone)]
pub(crate) struct MetricsEndpoint {
    metrics: Arc<Metrics>,
}

impl MetricsEndpoint {
    pub(crate) fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

#[handler]
impl MetricsEndpoint {
    async fn handle(&self, _req: &mut Request, res: &mut Response) {
        let encoded = match self.metrics.encode() {
            Ok(encoded) => encoded,
            Err(source) => {
                error!("failed to encode metrics response: {source}");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

                return;
            }
        };

        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_FORMAT));
        res.render(encoded);
    }
}
