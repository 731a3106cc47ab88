//! Stockroom JSON API Server

use std::{process::ExitCode, sync::Arc};

use salvo::{affix_state::inject, prelude::*, timeout::Timeout, trailing_slash::remove_slash};
use tracing::{error, info};

use stockroom_app::context::AppContext;

use crate::{config::ServerConfig, observability::Metrics, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config;
mod extensions;
mod healthcheck;
mod middleware;
mod observability;
mod products;
mod router;
mod sales;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod web;

/// Stockroom JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(config_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {config_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing output would be lost"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let metrics = match Metrics::new(config.observability.metrics_sample_every) {
        Ok(metrics) => Arc::new(metrics),
        Err(metrics_error) => {
            error!("failed to build metrics registry: {metrics_error}");

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.pool_options(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let routes = match router::app_router(
        metrics,
        config.observability.slow_request_threshold(),
    ) {
        Ok(routes) => routes,
        Err(route_error) => {
            error!("failed to build route table: {route_error}");

            return ExitCode::FAILURE;
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .hoop(Timeout::new(config.server.request_timeout()))
        .push(routes);

    let addr = config.server.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_timeout();

    tokio::spawn(async move {
        if let Err(signal_error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {signal_error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");

    ExitCode::SUCCESS
}
