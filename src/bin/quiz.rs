use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quiz_api::db::{self, run_migrations};
use quiz_api::server::run_server;
use quiz_api::settings::Settings;
use quiz_api::telemetry::init_tracing;
use quiz_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and start the HTTP server
    Serve,
    /// Apply migrations and exit
    Migrate,
    /// Export all data as CSV files into a directory
    Export { path: PathBuf },
    /// Import CSV files previously written by `export`
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let pool = db::establish_connection(&settings.db_path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.db_path))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await.context("Failed to run migrations")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(pool, &settings).await?,
        Commands::Migrate => {}
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
    }
    Ok(())
}
