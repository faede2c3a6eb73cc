use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::auth::claims::Role;

/// Which unique identity field collided during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Email,
    Username,
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityField::Email => f.write_str("Email"),
            IdentityField::Username => f.write_str("Username"),
        }
    }
}

/// Domain error taxonomy. Every handler failure is one of these; the
/// `IntoResponse` impl renders the wire envelope `{"success":false,"message":…}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("{0}")]
    InvalidToken(&'static str),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} already exists.")]
    Duplicate(IdentityField),
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Access denied. You are trying to log in as '{attempted}', but your account role is '{actual}'. Please select the correct role.")]
    RoleMismatch { attempted: String, actual: Role },
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Already joined this event.")]
    AlreadyJoined,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            // The browser client distinguishes "not logged in" (401) from
            // "bad token" (403), so an unverifiable token is forbidden here.
            ApiError::InvalidToken(_) => StatusCode::FORBIDDEN,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyJoined => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Storage/config failures keep their details in the log, not on the wire.
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_identity_names_the_field() {
        assert_eq!(
            ApiError::Duplicate(IdentityField::Email).to_string(),
            "Email already exists."
        );
        assert_eq!(
            ApiError::Duplicate(IdentityField::Username).to_string(),
            "Username already exists."
        );
    }

    #[test]
    fn role_mismatch_names_both_roles() {
        let err = ApiError::RoleMismatch {
            attempted: "student".into(),
            actual: Role::Gardener,
        };
        let msg = err.to_string();
        assert!(msg.contains("'student'"));
        assert!(msg.contains("'gardener'"));
    }

    #[test]
    fn statuses_match_the_wire_contract() {
        assert_eq!(
            ApiError::Unauthenticated("User not logged in").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidToken("Token is not valid").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Duplicate(IdentityField::Email).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::AlreadyJoined.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Event not found.").status(), StatusCode::NOT_FOUND);
    }
}
