use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clay_dashboard::config::Config;
use clay_dashboard::routes::{create_router, AppState};
use clay_dashboard::services::{SummaryClient, SummarySource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clay_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    if config.testing_mode {
        tracing::warn!("TESTING MODE - dashboard is running against a test summary API");
    }

    if config.fiscal_years.is_empty() {
        tracing::warn!("No selectable fiscal years configured");
    }

    let summary: Arc<dyn SummarySource> = Arc::new(SummaryClient::new(
        &config.summary_api_url,
        config.summary_api_token.as_deref(),
    ));
    tracing::info!("Summary API: {}", config.summary_api_url);

    let state = AppState::new(config.display(), summary);
    state
        .views
        .spawn_sweeper(config.view_idle_timeout, config.view_sweep_interval);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Dashboard API: {}/gallium/api/dashboard/views", config.base_url);

    axum::serve(listener, app).await?;

    Ok(())
}
