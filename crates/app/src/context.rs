//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db, PoolOptions, StatusCheck},
    domain::{
        products::{PgProductsService, ProductsService},
        sales::{PgSalesService, SalesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub sales: Arc<dyn SalesService>,
    pub status: Arc<dyn StatusCheck>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, options: PoolOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(url, options)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            sales: Arc::new(PgSalesService::new(db.clone())),
            status: Arc::new(db),
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
