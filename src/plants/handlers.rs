use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::plants::dto::{AddPlantRequest, GalleryItem, PlantView, UpdatePlantRequest};
use crate::plants::repo::{self, PlantChanges};
use crate::state::AppState;

pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/plant/addPlant", post(add_plant))
        .route("/plant/show", get(show_plants))
        .route("/plant/:id", get(get_plant).put(update_plant).delete(delete_plant))
}

#[instrument(skip(state, claims, payload))]
pub async fn add_plant(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<AddPlantRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let (Some(name), Some(scientific_name), Some(area)) = (
        payload.name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.scientific_name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.area.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Name, scientific name, and area are required.".into(),
        ));
    };

    let plant = repo::create(
        &state.db,
        name,
        scientific_name,
        payload.description.as_deref(),
        payload.image_url.as_deref(),
        area,
        payload.quantity.unwrap_or(1),
        claims.id,
    )
    .await?;

    info!(plant_id = plant.id, user_id = claims.id, "plant added");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "plant": PlantView::from(plant) })),
    ))
}

#[instrument(skip(state))]
pub async fn show_plants(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plants: Vec<GalleryItem> = repo::list_gallery(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": plants })))
}

#[instrument(skip(state))]
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plant = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Plant not found"))?;
    Ok(Json(json!({ "success": true, "data": PlantView::from(plant) })))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_plant(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePlantRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let changes = PlantChanges {
        name: payload.name,
        scientific_name: payload.scientific_name,
        description: payload.description,
        area: payload.area,
        quantity: payload.quantity,
        image_url: payload.image_url,
    };

    let plant = repo::update(&state.db, id, changes)
        .await?
        .ok_or(ApiError::NotFound("Plant not found"))?;

    info!(plant_id = id, user_id = claims.id, "plant updated");
    Ok(Json(json!({
        "success": true,
        "message": "Plant updated successfully",
        "data": PlantView::from(plant)
    })))
}

#[instrument(skip(state, claims))]
pub async fn delete_plant(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Gardener, Role::Admin])?;

    let deleted = repo::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Plant not found"));
    }

    info!(plant_id = id, user_id = claims.id, "plant deleted");
    Ok(Json(json!({ "success": true, "message": "Plant deleted successfully" })))
}
