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
use crate::auth::dto::PublicUser;
use crate::auth::extractors::AuthUser;
use crate::auth::repo as users;
use crate::error::ApiError;
use crate::events::dto::JoinedEventView;
use crate::events::repo as events_repo;
use crate::events::services::{classify, EventPhase};
use crate::feedback::dto::FeedbackView;
use crate::feedback::repo as feedback_repo;
use crate::profiles::dto::{
    GardenerListItem, GardenerProfileSetupRequest, GardenerProfileView,
    StudentProfileSetupRequest, StudentProfileView,
};
use crate::profiles::repo::{self, GardenerProfileFields, StudentProfileFields};
use crate::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/student-profile/setup", post(setup_student_profile))
        .route("/student-profile/", get(get_student_profile))
        .route("/gardener-profile/setup", post(setup_gardener_profile))
        .route("/gardener-profile/", get(get_gardener_profile))
        .route("/admin-actions/gardeners", get(list_gardeners))
}

#[instrument(skip(state, claims, payload))]
pub async fn setup_student_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<StudentProfileSetupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if claims.role != Role::Student {
        return Err(ApiError::Forbidden(
            "Access denied. Only students can set up this profile.".into(),
        ));
    }

    let fields = StudentProfileFields {
        contact_number: payload.contact_number,
        department: payload.department,
        semester: payload.semester,
        year_of_joining: payload.year_of_joining,
        bio: payload.bio,
        profile_image_url: payload.profile_image_url,
        remove_image: payload.remove_profile_image,
    };

    let (profile, created) = match repo::update_student(&state.db, claims.id, &fields).await? {
        Some(updated) => (updated, false),
        None => (repo::create_student(&state.db, claims.id, &fields).await?, true),
    };

    info!(user_id = claims.id, created, "student profile saved");
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    let message = if created {
        "Student profile created successfully."
    } else {
        "Student profile updated successfully."
    };
    Ok((
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": StudentProfileView::from(profile)
        })),
    ))
}

#[instrument(skip(state, claims))]
pub async fn get_student_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if claims.role != Role::Student {
        return Err(ApiError::Forbidden("This profile is for students.".into()));
    }

    let user = users::find_by_id(&state.db, claims.id)
        .await?
        .ok_or(ApiError::NotFound("Student user not found."))?;

    let profile = repo::find_student(&state.db, claims.id)
        .await?
        .map(StudentProfileView::from);

    // Joined events split into upcoming vs completed; a past event the
    // admin never closed out still counts as attended here.
    let now = OffsetDateTime::now_utc();
    let mut upcoming = Vec::new();
    let mut completed = Vec::new();
    for event in events_repo::list_joined_by_user(&state.db, claims.id).await? {
        match classify(event.date, &event.time, event.completed, now) {
            EventPhase::Upcoming => upcoming.push(event),
            EventPhase::Completed | EventPhase::PastUncompleted => completed.push(event),
        }
    }
    upcoming.sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
    completed.sort_by(|a, b| (b.date, b.time.as_str()).cmp(&(a.date, a.time.as_str())));
    let upcoming: Vec<JoinedEventView> = upcoming.into_iter().map(Into::into).collect();
    let completed: Vec<JoinedEventView> = completed.into_iter().map(Into::into).collect();

    let feedback: Vec<FeedbackView> = feedback_repo::list_by_submitter(&state.db, claims.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({
        "success": true,
        "data": {
            "profile": profile,
            "user": PublicUser::from(user),
            "events": { "upcoming": upcoming, "completed": completed },
            "feedback": feedback
        }
    })))
}

#[instrument(skip(state, claims, payload))]
pub async fn setup_gardener_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<GardenerProfileSetupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if claims.role != Role::Gardener {
        return Err(ApiError::Forbidden(
            "Access denied. Only gardeners can set up this profile.".into(),
        ));
    }

    let fields = GardenerProfileFields {
        contact_number: payload.contact_number,
        address: payload.address,
        date_of_joining: payload.date_of_joining,
        specialization: payload.specialization,
        profile_image_url: payload.profile_image_url,
        remove_image: payload.remove_profile_image,
    };

    let (profile, created) = match repo::update_gardener(&state.db, claims.id, &fields).await? {
        Some(updated) => (updated, false),
        None => {
            let Some(contact) = fields
                .contact_number
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
            else {
                return Err(ApiError::BadRequest("Contact number is required.".into()));
            };
            let created = repo::create_gardener(&state.db, claims.id, contact, &fields).await?;
            (created, true)
        }
    };

    info!(user_id = claims.id, created, "gardener profile saved");
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    let message = if created {
        "Gardener profile created successfully."
    } else {
        "Gardener profile updated successfully."
    };
    Ok((
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": GardenerProfileView::from(profile)
        })),
    ))
}

#[instrument(skip(state, claims))]
pub async fn get_gardener_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if claims.role != Role::Gardener {
        return Err(ApiError::Forbidden(
            "Access denied. This profile view is for gardeners.".into(),
        ));
    }

    let user = users::find_by_id(&state.db, claims.id)
        .await?
        .ok_or(ApiError::NotFound("Gardener user not found."))?;
    let profile = repo::find_gardener(&state.db, claims.id)
        .await?
        .map(GardenerProfileView::from);

    Ok(Json(json!({
        "success": true,
        "data": { "profile": profile, "user": PublicUser::from(user) }
    })))
}

#[instrument(skip(state, claims))]
pub async fn list_gardeners(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;

    let gardeners: Vec<GardenerListItem> = repo::list_gardeners(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "success": true, "data": gardeners })))
}
