use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::auth::claims::Role;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Staff projection for the assignable-staff listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StaffRecord {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub role: Role,
}

/// Find a user whose email or username matches the identifier. Emails are
/// stored lowercased, so the email arm folds case; usernames stay exact.
pub async fn find_by_identifier(db: &PgPool, identifier: &str) -> sqlx::Result<Option<UserRecord>> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, username, email, role, password_hash, created_at
        FROM users
        WHERE email = lower($1) OR username = $1
        "#,
    )
    .bind(identifier)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<UserRecord>> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, username, email, role, password_hash, created_at
        FROM users
        WHERE email = lower($1)
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<UserRecord>> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, username, email, role, password_hash, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<UserRecord>> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, username, email, role, password_hash, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Create a new user with an already-hashed password. The unique indexes on
/// email and username are the second line of defense behind the pre-insert
/// checks; a violation here surfaces as `sqlx::Error` for the caller to
/// translate.
pub async fn create(
    db: &PgPool,
    role: Role,
    name: &str,
    username: &str,
    email: &str,
    password_hash: &str,
) -> sqlx::Result<UserRecord> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        INSERT INTO users (role, name, username, email, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, username, email, role, password_hash, created_at
        "#,
    )
    .bind(role)
    .bind(name)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await
}

/// Users eligible for task assignment: gardeners and admins.
pub async fn list_staff(db: &PgPool) -> sqlx::Result<Vec<StaffRecord>> {
    sqlx::query_as::<_, StaffRecord>(
        r#"
        SELECT id, name, username, role
        FROM users
        WHERE role IN ('gardener', 'admin')
        ORDER BY role ASC, name ASC
        "#,
    )
    .fetch_all(db)
    .await
}
