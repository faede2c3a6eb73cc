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
use crate::error::ApiError;
use crate::feedback::dto::{
    validate_status, FeedbackFilter, FeedbackView, SubmitFeedbackRequest,
    UpdateFeedbackStatusRequest,
};
use crate::feedback::repo;
use crate::state::AppState;

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback/submit", post(submit_feedback))
        .route("/feedback/", get(list_feedback))
        .route("/feedback/:id/status", put(update_feedback_status))
}

#[instrument(skip(state, claims, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Some(text) = payload
        .feedback_text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest("Feedback text cannot be empty.".into()));
    };
    if text.len() < 10 || text.len() > 2000 {
        return Err(ApiError::BadRequest(
            "Feedback should be between 10 and 2000 characters.".into(),
        ));
    }
    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::BadRequest("Rating must be between 1 and 5.".into()));
        }
    }

    let feedback = repo::create(
        &state.db,
        claims.id,
        text,
        payload.rating,
        payload.category.as_deref(),
    )
    .await?;

    info!(feedback_id = feedback.id, user_id = claims.id, "feedback submitted");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Feedback submitted successfully! Thank you.",
            "data": FeedbackView::from(feedback)
        })),
    ))
}

#[instrument(skip(state, claims))]
pub async fn list_feedback(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(filter): Query<FeedbackFilter>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let items: Vec<FeedbackView> =
        repo::list_filtered(&state.db, filter.status.as_deref(), filter.category.as_deref())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
    Ok(Json(json!({ "success": true, "data": items })))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_feedback_status(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFeedbackStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let Some(status) = payload
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest("New status is required.".into()));
    };
    validate_status(status)?;

    let feedback = repo::update_status(
        &state.db,
        id,
        status,
        payload.admin_notes.as_deref(),
        claims.id,
    )
    .await?
    .ok_or(ApiError::NotFound("Feedback item not found."))?;

    info!(feedback_id = id, admin_id = claims.id, status, "feedback status updated");
    Ok(Json(json!({
        "success": true,
        "message": "Feedback status updated successfully.",
        "data": FeedbackView::from(feedback)
    })))
}
