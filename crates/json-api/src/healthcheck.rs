//! Stockroom JSON API Healthcheck Handler

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    extensions::*,
    state::State,
    web::{Handler, WebError, respond},
};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HealthResponse {
    /// Service status
    pub status: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// `GET /health`
///
/// Reports whether the database answers a trivial query. A failed check is
/// written here rather than surfaced as an error, so the body stays
/// `{"status": ...}` instead of the error envelope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Health;

#[async_trait]
impl Handler for Health {
    #[tracing::instrument(name = "health.check", skip_all)]
    async fn call(
        &self,
        _req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let state = depot.obtain_or_500::<Arc<State>>()?;

        match state.app.status.status_check().await {
            Ok(()) => respond(res, StatusCode::OK, HealthResponse::new("OK")),
            Err(error) => {
                warn!("database status check failed: {error}");

                respond(
                    res,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HealthResponse::new("db not ready"),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use stockroom_app::database::MockStatusCheck;
    use testresult::TestResult;

    use crate::test_helpers::status_service;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_ok() -> TestResult {
        let mut status = MockStatusCheck::new();

        status.expect_status_check().once().return_once(|| Ok(()));

        let mut res = TestClient::get("http://example.com/health")
            .send(&status_service(status))
            .await;

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "OK");

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_db_not_ready() -> TestResult {
        let mut status = MockStatusCheck::new();

        status
            .expect_status_check()
            .once()
            .return_once(|| Err(sqlx::Error::PoolTimedOut));

        let mut res = TestClient::get("http://example.com/health")
            .send(&status_service(status))
            .await;

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.status, "db not ready");

        Ok(())
    }
}
