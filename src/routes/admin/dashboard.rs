use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use tokio::sync::MutexGuard;
use uuid::Uuid;

use crate::dashboard::{DashboardSnapshot, DashboardView, ModalKind, SalesGranularity, ViewHandle};
use crate::error::{AppError, AppResult};
use crate::routes::AppState;

#[derive(Deserialize)]
pub struct SelectYearRequest {
    pub year: i32,
}

#[derive(Deserialize)]
pub struct GranularityRequest {
    pub granularity: SalesGranularity,
}

#[derive(Deserialize)]
pub struct OpenModalRequest {
    pub modal: ModalKind,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/views", post(mount_view))
        .route("/dashboard/views/{id}", get(get_view).delete(teardown_view))
        .route("/dashboard/views/{id}/year", put(select_year))
        .route("/dashboard/views/{id}/granularity", put(set_granularity))
        .route("/dashboard/views/{id}/modal", post(open_modal).delete(dismiss_modal))
}

fn view_not_found() -> AppError {
    AppError::NotFound("Dashboard view not found".to_string())
}

async fn find_view(state: &AppState, id: Uuid) -> AppResult<Arc<ViewHandle>> {
    state.views.get(id).await.ok_or_else(view_not_found)
}

/// Locks a live view; one torn down after lookup counts as missing.
async fn lock_view(handle: &ViewHandle) -> AppResult<MutexGuard<'_, DashboardView>> {
    handle.lock_active().await.ok_or_else(view_not_found)
}

async fn snapshot_of(state: &AppState, handle: &ViewHandle) -> AppResult<DashboardSnapshot> {
    Ok(lock_view(handle).await?.snapshot(handle.id(), &state.settings))
}

async fn mount_view(State(state): State<AppState>) -> AppResult<(StatusCode, Json<DashboardSnapshot>)> {
    let (handle, _load) = state.views.mount(Local::now().date_naive()).await;
    let snapshot = snapshot_of(&state, &handle).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DashboardSnapshot>> {
    let handle = find_view(&state, id).await?;
    Ok(Json(snapshot_of(&state, &handle).await?))
}

async fn teardown_view(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<StatusCode> {
    if state.views.teardown(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(view_not_found())
    }
}

async fn select_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectYearRequest>,
) -> AppResult<Json<DashboardSnapshot>> {
    let handle = find_view(&state, id).await?;
    let mut view = lock_view(&handle).await?;
    view.select_year(payload.year);
    Ok(Json(view.snapshot(id, &state.settings)))
}

async fn set_granularity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GranularityRequest>,
) -> AppResult<Json<DashboardSnapshot>> {
    let handle = find_view(&state, id).await?;
    let mut view = lock_view(&handle).await?;
    view.set_granularity(payload.granularity);
    Ok(Json(view.snapshot(id, &state.settings)))
}

async fn open_modal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OpenModalRequest>,
) -> AppResult<Json<DashboardSnapshot>> {
    let handle = find_view(&state, id).await?;
    let mut view = lock_view(&handle).await?;
    view.open_modal(payload.modal)?;
    Ok(Json(view.snapshot(id, &state.settings)))
}

async fn dismiss_modal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DashboardSnapshot>> {
    let handle = find_view(&state, id).await?;
    let mut view = lock_view(&handle).await?;
    view.dismiss_modal();
    Ok(Json(view.snapshot(id, &state.settings)))
}
