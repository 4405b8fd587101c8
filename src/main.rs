use anyhow::Context;
use fundmatch::config::Settings;
use fundmatch::seed::initialize_database;
use fundmatch::{create_app, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let settings = Settings::load()?;
    let address = settings.bind_address();
    let state = AppState::new(settings);

    if state.settings.seed_on_startup {
        // Failures are logged inside; the site still starts without sample data.
        let _ = initialize_database(&state.gateway, true).await;
    }

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("could not bind {address}"))?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;
    Ok(())
}
