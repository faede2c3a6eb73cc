use serde::{Deserialize, Serialize};

use crate::auth::claims::Role;
use crate::auth::repo::UserRecord;

/// Request body for user registration. Fields are optional at the parse
/// layer so a missing field yields the contract's 400 rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub role: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login. `identifier` matches either username or email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Option<String>,
    pub identifier: Option<String>,
    pub password: Option<String>,
}

/// Sanitized user projection returned to clients; never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<UserRecord> for PublicUser {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            email: u.email,
            role: u.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_never_serializes_the_hash() {
        let record = UserRecord {
            id: 3,
            name: "A".into(),
            username: "a1".into(),
            email: "a1@x.com".into(),
            role: Role::Student,
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(record)).unwrap();
        assert!(json.contains("\"a1@x.com\""));
        assert!(json.contains("\"student\""));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn user_record_hides_the_hash_too() {
        let record = UserRecord {
            id: 3,
            name: "A".into(),
            username: "a1".into(),
            email: "a1@x.com".into(),
            role: Role::Admin,
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
