use axum::{
    extract::{Path, State},
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
use crate::events::dto::{CreateEventRequest, EventView, UpdateEventRequest};
use crate::events::repo::{self, EventChanges};
use crate::events::services;
use crate::state::AppState;

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/event/create", post(create_event))
        .route("/event/", get(list_events))
        .route(
            "/event/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/event/:id/join", post(join_event))
        .route("/event/:id/complete", post(complete_event))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    claims.require_role(&[Role::Admin])?;

    let (Some(title), Some(description), Some(location), Some(date), Some(time)) = (
        payload.title.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.description.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.location.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.date,
        payload.time.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required event information. All fields (title, description, location, date, time) are necessary."
                .into(),
        ));
    };

    let event = repo::create(
        &state.db,
        title,
        description,
        location,
        date,
        time,
        payload.image_url.as_deref(),
        claims.id,
    )
    .await?;

    info!(event_id = event.id, admin_id = claims.id, "event created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "event": EventView::from(event) })),
    ))
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rows = repo::list_with_creator(&state.db).await?;
    let buckets = services::bucket_events(rows, OffsetDateTime::now_utc());
    Ok(Json(json!({ "success": true, "data": buckets })))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let event = repo::find_by_id_with_creator(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Event not found"))?;
    Ok(Json(json!({ "success": true, "data": EventView::from(event) })))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let changes = EventChanges {
        title: payload.title,
        description: payload.description,
        location: payload.location,
        date: payload.date,
        time: payload.time,
        image_url: payload.image_url,
        remove_image: payload.remove_image,
        completed: payload.completed,
    };

    let event = repo::update(&state.db, id, changes)
        .await?
        .ok_or(ApiError::NotFound("Event not found."))?;

    info!(event_id = id, admin_id = claims.id, "event updated");
    Ok(Json(json!({
        "success": true,
        "message": "Event updated successfully.",
        "data": EventView::from(event)
    })))
}

#[instrument(skip(state, claims))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let deleted = repo::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Event not found."));
    }

    info!(event_id = id, admin_id = claims.id, "event deleted");
    Ok(Json(json!({ "success": true, "message": "Event deleted successfully." })))
}

#[instrument(skip(state, claims))]
pub async fn complete_event(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let updated = repo::mark_completed(&state.db, id).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Event not found."));
    }

    info!(event_id = id, admin_id = claims.id, "event marked as completed");
    Ok(Json(json!({ "success": true, "message": "Event marked as completed." })))
}

#[instrument(skip(state, claims))]
pub async fn join_event(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // The id arrives as a raw path segment; anything but a positive
    // integer is rejected before touching the store.
    let event_id: i32 = id
        .parse()
        .ok()
        .filter(|n: &i32| *n > 0)
        .ok_or_else(|| ApiError::BadRequest("Invalid event ID.".into()))?;

    services::join_event(&state.db, event_id, claims.id).await?;
    Ok(Json(json!({ "success": true, "message": "Successfully joined the event." })))
}
