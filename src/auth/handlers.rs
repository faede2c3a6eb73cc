use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::str::FromStr;
use tracing::{info, instrument, warn};

use crate::auth::{
    claims::Role,
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
    extractors::{AuthUser, ACCESS_TOKEN_HEADER},
    jwt::JwtKeys,
    repo,
    services::{hash_password, is_valid_email, map_user_create_err, verify_password},
};
use crate::error::{ApiError, IdentityField};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/assignable-staff", get(assignable_staff))
}

fn required(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

#[instrument(skip(state, headers, payload))]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (Some(role_raw), Some(name), Some(username), Some(email), Some(password)) = (
        required(payload.role.as_deref()),
        required(payload.name.as_deref()),
        required(payload.username.as_deref()),
        required(payload.email.as_deref()),
        required(payload.password.as_deref()),
    ) else {
        return Err(ApiError::BadRequest("All fields are required.".into()));
    };
    let email = email.to_lowercase();

    let target_role = Role::from_str(role_raw)?;

    // Admin self-registration is disallowed: minting an admin account
    // requires a verified token from an existing admin.
    if target_role == Role::Admin {
        let keys = JwtKeys::from_ref(&state);
        let token = headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated(
                "Authentication required to create an admin user. Please log in as an admin.",
            ))?;
        let caller = keys.verify(token).map_err(|_| {
            ApiError::InvalidToken(
                "Invalid or expired token for admin creation. Please re-login.",
            )
        })?;
        if caller.role != Role::Admin {
            warn!(caller_id = caller.id, "non-admin attempted admin creation");
            return Err(ApiError::Forbidden(
                "Access Denied: Only administrators can create other admin users.".into(),
            ));
        }
        info!(admin_id = caller.id, new_username = %username, "admin creating a new admin account");
    }

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email address.".into()));
    }

    // Email checked before username: a request colliding on both reports
    // the email collision.
    if repo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::Duplicate(IdentityField::Email));
    }
    if repo::find_by_username(&state.db, username).await?.is_some() {
        return Err(ApiError::Duplicate(IdentityField::Username));
    }

    let hash = hash_password(password)?;
    let user = repo::create(&state.db, target_role, name, username, &email, &hash)
        .await
        .map_err(map_user_create_err)?;

    info!(user_id = user.id, username = %user.username, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Account created successfully.",
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(role_raw), Some(identifier), Some(password)) = (
        required(payload.role.as_deref()),
        required(payload.identifier.as_deref()),
        required(payload.password.as_deref()),
    ) else {
        return Err(ApiError::BadRequest(
            "Role, identifier (email/username), and password are required.".into(),
        ));
    };

    // Unknown identifier and wrong password share one error so callers
    // cannot probe which accounts exist.
    let user = repo::find_by_identifier(&state.db, identifier)
        .await?
        .ok_or_else(|| {
            warn!(identifier = %identifier, "login with unknown identifier");
            ApiError::InvalidCredentials
        })?;

    if user.role.as_str() != role_raw.to_lowercase() {
        return Err(ApiError::RoleMismatch {
            attempted: role_raw.to_string(),
            actual: user.role,
        });
    }

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, claims))]
pub async fn assignable_staff(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_role(&[Role::Admin])?;
    let staff = repo::list_staff(&state.db).await?;
    Ok(Json(json!({ "success": true, "data": staff })))
}
