pub mod admin;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::DisplaySettings;
use crate::dashboard::ViewRegistry;
use crate::services::SummarySource;

#[derive(Clone)]
pub struct AppState {
    pub settings: DisplaySettings,
    pub views: ViewRegistry,
}

impl AppState {
    pub fn new(settings: DisplaySettings, source: Arc<dyn SummarySource>) -> Self {
        Self {
            settings,
            views: ViewRegistry::new(source),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/gallium", admin::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
