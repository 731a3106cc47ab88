//! Database connection management

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions, query_scalar};

const STATUS_CHECK_SQL: &str = "SELECT true";

/// Pool sizing applied when connecting.
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction on the shared pool.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, options: PoolOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(database_url)
        .await
}

/// Liveness probe for the storage collaborator.
#[automock]
#[async_trait]
pub trait StatusCheck: Send + Sync {
    /// Run a trivial read so a cached but dead connection is noticed.
    async fn status_check(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl StatusCheck for Db {
    #[tracing::instrument(name = "database.status_check", skip(self), err)]
    async fn status_check(&self) -> Result<(), sqlx::Error> {
        let _ready: bool = query_scalar(STATUS_CHECK_SQL).fetch_one(&self.pool).await?;

        Ok(())
    }
}
