use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Feedback row with optional submitter/resolver projections.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackRow {
    pub id: i32,
    pub feedback_text: String,
    pub rating: Option<i32>,
    pub category: Option<String>,
    pub status: String,
    pub submitted_by_user_id: i32,
    pub resolved_by_admin_id: Option<i32>,
    pub admin_notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub submitter_name: Option<String>,
    pub submitter_username: Option<String>,
    pub resolver_name: Option<String>,
    pub resolver_username: Option<String>,
}

const PLAIN_PROJECTIONS: &str = r#"
    NULL::text AS submitter_name, NULL::text AS submitter_username,
    NULL::text AS resolver_name, NULL::text AS resolver_username
"#;

pub async fn create(
    db: &PgPool,
    submitted_by_user_id: i32,
    feedback_text: &str,
    rating: Option<i32>,
    category: Option<&str>,
) -> sqlx::Result<FeedbackRow> {
    sqlx::query_as::<_, FeedbackRow>(&format!(
        r#"
        INSERT INTO feedback (feedback_text, rating, category, submitted_by_user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, feedback_text, rating, category, status, submitted_by_user_id,
                  resolved_by_admin_id, admin_notes, created_at, updated_at,
                  {PLAIN_PROJECTIONS}
        "#
    ))
    .bind(feedback_text)
    .bind(rating)
    .bind(category)
    .bind(submitted_by_user_id)
    .fetch_one(db)
    .await
}

/// Admin listing with optional status/category filters, newest first.
pub async fn list_filtered(
    db: &PgPool,
    status: Option<&str>,
    category: Option<&str>,
) -> sqlx::Result<Vec<FeedbackRow>> {
    sqlx::query_as::<_, FeedbackRow>(
        r#"
        SELECT f.id, f.feedback_text, f.rating, f.category, f.status, f.submitted_by_user_id,
               f.resolved_by_admin_id, f.admin_notes, f.created_at, f.updated_at,
               s.name AS submitter_name, s.username AS submitter_username,
               r.name AS resolver_name, r.username AS resolver_username
        FROM feedback f
        JOIN users s ON s.id = f.submitted_by_user_id
        LEFT JOIN users r ON r.id = f.resolved_by_admin_id
        WHERE ($1::text IS NULL OR f.status = $1)
          AND ($2::text IS NULL OR f.category = $2)
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(status)
    .bind(category)
    .fetch_all(db)
    .await
}

/// Feedback submitted by one user, with resolver projection. Used by the
/// student profile view.
pub async fn list_by_submitter(db: &PgPool, user_id: i32) -> sqlx::Result<Vec<FeedbackRow>> {
    sqlx::query_as::<_, FeedbackRow>(
        r#"
        SELECT f.id, f.feedback_text, f.rating, f.category, f.status, f.submitted_by_user_id,
               f.resolved_by_admin_id, f.admin_notes, f.created_at, f.updated_at,
               NULL::text AS submitter_name, NULL::text AS submitter_username,
               r.name AS resolver_name, r.username AS resolver_username
        FROM feedback f
        LEFT JOIN users r ON r.id = f.resolved_by_admin_id
        WHERE f.submitted_by_user_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Status transition by an admin; stamps the resolver and bumps updated_at.
pub async fn update_status(
    db: &PgPool,
    id: i32,
    status: &str,
    admin_notes: Option<&str>,
    admin_id: i32,
) -> sqlx::Result<Option<FeedbackRow>> {
    sqlx::query_as::<_, FeedbackRow>(&format!(
        r#"
        UPDATE feedback SET
            status = $2,
            admin_notes = COALESCE($3, admin_notes),
            resolved_by_admin_id = $4,
            updated_at = now()
        WHERE id = $1
        RETURNING id, feedback_text, rating, category, status, submitted_by_user_id,
                  resolved_by_admin_id, admin_notes, created_at, updated_at,
                  {PLAIN_PROJECTIONS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(admin_notes)
    .bind(admin_id)
    .fetch_optional(db)
    .await
}
