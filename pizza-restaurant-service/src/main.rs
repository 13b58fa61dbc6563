use tracing::info;
use tracing_subscriber::EnvFilter;

use pizza_restaurant_service::{router, AppState, Config, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db = Database::new(config.database_url.clone());
    db.run_pending_migrations()?;
    info!(database_url = db.url(), "database ready");

    let app = router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Pizza restaurant service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
