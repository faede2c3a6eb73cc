use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::gardening_logs::dto::{validate_task_fields, LogTaskRequest, LogView, TaskType};
use crate::gardening_logs::repo;
use crate::state::AppState;

pub fn gardening_log_routes() -> Router<AppState> {
    Router::new()
        .route("/gardening-log/log-task", post(log_task))
        .route("/gardening-log/my-logs", get(my_logs))
        .route("/gardening-log/all-logs", get(all_logs))
}

#[instrument(skip(state, claims, payload))]
pub async fn log_task(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<LogTaskRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let Some(task_raw) = payload
        .task_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest("Task type is required.".into()));
    };
    let task = TaskType::parse(task_raw)?;

    validate_task_fields(
        task,
        payload.area_description.as_deref(),
        payload.plant_id,
        payload.notes.as_deref(),
    )?;

    let date_of_task = payload
        .date_of_task
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let log = repo::create(
        &state.db,
        claims.id,
        task.as_str(),
        date_of_task,
        payload.area_description.as_deref(),
        payload.plant_id,
        payload.notes.as_deref(),
    )
    .await?;

    info!(log_id = log.id, gardener_id = claims.id, task = task.as_str(), "gardening task logged");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Gardening task logged successfully.",
            "data": LogView::from(log)
        })),
    ))
}

#[instrument(skip(state, claims))]
pub async fn my_logs(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let logs: Vec<LogView> = repo::list_by_gardener(&state.db, claims.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": logs })))
}

#[instrument(skip(state, claims))]
pub async fn all_logs(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let logs: Vec<LogView> = repo::list_all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": logs })))
}
