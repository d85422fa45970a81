use std::process::ExitCode;
use std::sync::Arc;

use dealership_web::{
    accounts::PgAccountStore,
    config::AppConfig,
    create_router, db,
    inventory::PgInventoryStore,
    views::TeraRenderer,
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber for logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Dealership - Starting...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let renderer = TeraRenderer::from_dir(&config.templates_dir)?;

    let state = AppState::new(
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgInventoryStore::new(pool)),
        Arc::new(renderer),
        config.signing_key.clone(),
        config.environment,
    );
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dealership is running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
