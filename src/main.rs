//! # HR Records Main Entry Point
//!
//! Loads configuration, initializes telemetry and the database, then either
//! serves the HTTP API or applies migrations and exits.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hr_records::{
    config::ConfigLoader,
    db::{init_pool, run_migrations},
    server::run_server,
    telemetry::init_tracing,
};

#[derive(Parser, Debug)]
#[command(name = "hr-records", about = "HR records service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply migrations and start the HTTP service (default command)
    Serve(ServeArgs),
    /// Apply pending migrations and exit
    Migrate,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let mut config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    if let Command::Serve(ServeArgs { bind: Some(bind) }) = &command {
        config.api_bind_addr = bind.clone();
    }

    init_tracing(&config).context("initializing telemetry")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = init_pool(&config)
        .await
        .context("initializing database connection pool")?;
    run_migrations(&db).await?;

    match command {
        Command::Serve(_) => run_server(config, db).await,
        Command::Migrate => Ok(()),
    }
}
