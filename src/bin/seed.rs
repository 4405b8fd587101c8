use clap::Parser;
use fundmatch::config::Settings;
use fundmatch::db::Gateway;
use fundmatch::seed::{initialize_database, SeedOutcome};
use fundmatch::telemetry;
use tracing::info;

/// Load the sample domains, startups, investors and funding rounds.
#[derive(Debug, Parser)]
#[command(name = "fundmatch-seed", version)]
struct Cli {
    /// Assume the schema already exists and only insert data.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();
    let cli = Cli::parse();

    let settings = Settings::load()?;
    let gateway = Gateway::new(settings.database.clone(), settings.connect_timeout);

    match initialize_database(&gateway, !cli.skip_migrations).await? {
        SeedOutcome::AlreadySeeded => info!("Nothing to do"),
        SeedOutcome::Seeded(summary) => info!(?summary, "Done"),
    }
    Ok(())
}
