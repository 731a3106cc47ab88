use clap::Args;
use sqlx::PgPool;
use stockroom_app::database::{self, PoolOptions};

pub(crate) mod migrate;
pub(crate) mod seed;

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    async fn connect(&self) -> Result<PgPool, String> {
        database::connect(
            &self.database_url,
            PoolOptions {
                max_connections: 1,
                ..PoolOptions::default()
            },
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
