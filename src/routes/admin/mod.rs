pub mod dashboard;

use axum::Router;

use crate::routes::AppState;

pub fn routes() -> Router<AppState> {
    let api_routes = Router::new().merge(dashboard::routes());

    Router::new().nest("/api", api_routes)
}
