use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::complaints::dto::{
    validate_priority, validate_status, ComplaintFilter, ComplaintView, ManageComplaintRequest,
    SubmitComplaintRequest,
};
use crate::complaints::repo;
use crate::error::ApiError;
use crate::state::AppState;

pub fn complaint_routes() -> Router<AppState> {
    Router::new()
        .route("/complaint/submit", post(submit_complaint))
        .route("/complaint/my-complaints", get(my_complaints))
        .route("/complaint/all", get(all_complaints))
        .route("/complaint/:id/manage", put(manage_complaint))
        .route("/complaint/assigned-to-me", get(assigned_to_me))
}

#[instrument(skip(state, claims, payload))]
pub async fn submit_complaint(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<SubmitComplaintRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Some(text) = payload
        .complaint_text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest(
            "Complaint details cannot be empty.".into(),
        ));
    };
    if text.len() < 15 || text.len() > 3000 {
        return Err(ApiError::BadRequest(
            "Complaint should be between 15 and 3000 characters.".into(),
        ));
    }

    let priority = payload.priority.as_deref().unwrap_or("medium");
    validate_priority(priority)?;

    let complaint = repo::create(
        &state.db,
        claims.id,
        text,
        payload.category.as_deref(),
        payload.location_description.as_deref(),
        priority,
    )
    .await?;

    info!(complaint_id = complaint.id, user_id = claims.id, "complaint submitted");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Complaint submitted successfully. We will look into it shortly.",
            "data": ComplaintView::from(complaint)
        })),
    ))
}

#[instrument(skip(state, claims))]
pub async fn my_complaints(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let items: Vec<ComplaintView> = repo::list_by_submitter(&state.db, claims.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": items })))
}

#[instrument(skip(state, claims))]
pub async fn all_complaints(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(filter): Query<ComplaintFilter>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let items: Vec<ComplaintView> = repo::list_filtered(
        &state.db,
        filter.status.as_deref(),
        filter.category.as_deref(),
        filter.priority.as_deref(),
    )
    .await?
    .into_iter()
    .map(Into::into)
    .collect();
    Ok(Json(json!({ "success": true, "data": items })))
}

#[instrument(skip(state, claims, payload))]
pub async fn manage_complaint(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<ManageComplaintRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    if let Some(status) = payload.status.as_deref() {
        validate_status(status)?;
    }
    if let Some(priority) = payload.priority.as_deref() {
        validate_priority(priority)?;
    }

    let (set_assignee, assignee) = match payload.assigned_to_user_id {
        Some(value) => (true, value),
        None => (false, None),
    };

    let updated = repo::manage(
        &state.db,
        id,
        payload.status.as_deref(),
        payload.priority.as_deref(),
        set_assignee,
        assignee,
        payload.resolution_details.as_deref(),
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Complaint not found."));
    }

    let complaint = repo::find_view_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Complaint not found."))?;

    info!(complaint_id = id, admin_id = claims.id, "complaint updated");
    Ok(Json(json!({
        "success": true,
        "message": "Complaint updated successfully.",
        "data": ComplaintView::from(complaint)
    })))
}

#[instrument(skip(state, claims))]
pub async fn assigned_to_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let items: Vec<ComplaintView> = repo::list_assigned_open(&state.db, claims.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": items })))
}
