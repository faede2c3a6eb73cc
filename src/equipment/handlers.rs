use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::equipment::dto::{AddEquipmentRequest, EquipmentView, UpdateEquipmentRequest};
use crate::equipment::repo;
use crate::error::ApiError;
use crate::state::AppState;

pub fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route("/equipment/add", post(add_equipment))
        .route("/equipment/", get(list_equipment))
        .route("/equipment/:id", put(update_equipment).delete(delete_equipment))
}

#[instrument(skip(state, claims, payload))]
pub async fn add_equipment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<AddEquipmentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    claims.require_role(&[Role::Admin])?;

    let Some(name) = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest("Equipment name is required.".into()));
    };
    let Some(image_url) = payload
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::BadRequest("Equipment image is required.".into()));
    };

    let equipment = repo::create(
        &state.db,
        name,
        image_url,
        payload.description.as_deref(),
        claims.id,
    )
    .await?;

    info!(equipment_id = equipment.id, admin_id = claims.id, "equipment added");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Equipment image added successfully.",
            "data": EquipmentView::from(equipment)
        })),
    ))
}

#[instrument(skip(state))]
pub async fn list_equipment(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let items: Vec<EquipmentView> = repo::list_all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": items })))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_equipment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEquipmentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let equipment = repo::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.image_url.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("Equipment image not found."))?;

    info!(equipment_id = id, admin_id = claims.id, "equipment updated");
    Ok(Json(json!({
        "success": true,
        "message": "Equipment details updated.",
        "data": EquipmentView::from(equipment)
    })))
}

#[instrument(skip(state, claims))]
pub async fn delete_equipment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let deleted = repo::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Equipment image not found."));
    }

    info!(equipment_id = id, admin_id = claims.id, "equipment deleted");
    Ok(Json(json!({ "success": true, "message": "Equipment image deleted successfully." })))
}
