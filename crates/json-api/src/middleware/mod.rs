//! Cross-cutting request behaviour.
//!
//! The server chain is, outermost first: [`RequestLog`], [`Errors`],
//! [`RecordMetrics`]. Errors are translated into responses by [`Errors`], so
//! the metrics layer inside it still sees every failure.

mod errors;
mod metrics;
mod request_log;

pub(crate) use errors::Errors;
pub(crate) use metrics::RecordMetrics;
pub(crate) use request_log::RequestLog;
