//! Schema migrations and seed data

use sqlx::{PgPool, migrate::MigrateError, raw_sql};
use tracing::info;

const SEED_SQL: &str = include_str!("seed.sql");

/// Apply every pending migration.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;

    info!("migrations complete");

    Ok(())
}

/// Insert the fixed demo products and sales. Running it twice is a no-op.
///
/// # Errors
///
/// Returns an error when the seed transaction fails; nothing is inserted in
/// that case.
pub async fn seed(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    raw_sql(SEED_SQL).execute(&mut *tx).await?;

    tx.commit().await?;

    info!("seed data complete");

    Ok(())
}
