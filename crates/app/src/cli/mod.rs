use clap::{Parser, Subcommand};

mod db;

#[derive(Debug, Parser)]
#[command(name = "stockroom-admin", about = "Stockroom administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(db::DatabaseArgs),

    /// Insert the demo products and sales
    Seed(db::DatabaseArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => db::migrate::run(args).await,
            Commands::Seed(args) => db::seed::run(args).await,
        }
    }
}
