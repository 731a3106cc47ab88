//! Logging setup and metrics collection.

use thiserror::Error;

mod logging;
mod metrics;

pub(crate) use logging::init_subscriber;
pub(crate) use metrics::{Metrics, MetricsEndpoint};

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    /// Failed to build the metrics registry.
    #[error("failed to build metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
}
