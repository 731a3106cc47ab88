//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub(crate) struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Requests running longer than this are aborted.
    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS", default_value_t = 5)]
    pub request_timeout_seconds: u64,

    /// How long graceful shutdown waits for in-flight requests.
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECONDS", default_value_t = 5)]
    pub shutdown_timeout_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub(crate) fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub(crate) fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}
