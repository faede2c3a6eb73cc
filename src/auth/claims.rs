use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Account role. A closed set, normalized to lowercase at every boundary;
/// free-form role strings never make it past parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Student,
    Gardener,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Gardener => "gardener",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "gardener" => Ok(Role::Gardener),
            "admin" => Ok(Role::Admin),
            other => Err(ApiError::BadRequest(format!("Unknown role '{other}'."))),
        }
    }
}

/// JWT payload carried by every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: Role,
    pub username: String,
    pub name: String,
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}

impl Claims {
    /// Per-route role gate, applied after authentication succeeds.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Access denied: Insufficient permissions".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(Role::from_str("student").unwrap(), Role::Student);
        assert_eq!(Role::from_str("Gardener").unwrap(), Role::Gardener);
        assert_eq!(Role::from_str("  ADMIN  ").unwrap(), Role::Admin);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = Role::from_str("superuser").unwrap_err();
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"gardener\"").unwrap(),
            Role::Gardener
        );
    }

    fn claims_with_role(role: Role) -> Claims {
        Claims {
            id: 1,
            role,
            username: "u1".into(),
            name: "U One".into(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn require_role_allows_listed_roles() {
        let claims = claims_with_role(Role::Gardener);
        assert!(claims.require_role(&[Role::Gardener, Role::Admin]).is_ok());
    }

    #[test]
    fn require_role_rejects_unlisted_roles() {
        let claims = claims_with_role(Role::Student);
        let err = claims.require_role(&[Role::Admin]).unwrap_err();
        assert!(err.to_string().contains("Insufficient permissions"));
    }
}
