use lifeline_sos::config::AppConfig;
use lifeline_sos::routes::{self, AppState};
use lifeline_sos::db;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Lifeline SOS coordination service...");

    // Init DB
    let pool = db::init_pool(&config.database_url).await?;
    info!("Connected to database");

    let state = AppState {
        pool,
        allow_realert: config.allow_realert,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
