//! Server configuration module

use clap::Parser;

pub(crate) use crate::config::{
    db::DatabaseConfig,
    observability::{LogFormat, LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Stockroom JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom-json", about = "Stockroom JSON API Server", long_about = None)]
pub(crate) struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "stockroom-json",
            "--port",
            "9000",
            "--request-timeout-seconds",
            "7",
            "--log-format",
            "json",
            "--metrics-sample-every",
            "10",
            "--database-url",
            "postgres://localhost/stockroom",
            "--database-max-connections",
            "4",
        ])?;

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(7));
        assert!(matches!(config.logging.log_format, LogFormat::Json), "expected json logs");
        assert_eq!(config.observability.metrics_sample_every, 10);
        assert_eq!(config.database.database_url, "postgres://localhost/stockroom");
        assert_eq!(config.database.pool_options().max_connections, 4);

        Ok(())
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = ServerConfig::try_parse_from([
            "stockroom-json",
            "--log-format",
            "xml",
            "--database-url",
            "postgres://localhost/stockroom",
        ]);

        assert!(result.is_err(), "expected unknown log format to be rejected");
    }
}
