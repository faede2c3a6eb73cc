use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Complaint row with optional complainant/assignee projections.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintRow {
    pub id: i32,
    pub complaint_text: String,
    pub category: Option<String>,
    pub location_description: Option<String>,
    pub status: String,
    pub priority: String,
    pub submitted_by_user_id: i32,
    pub assigned_to_user_id: Option<i32>,
    pub resolution_details: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub complainant_name: Option<String>,
    pub complainant_username: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_username: Option<String>,
}

const PLAIN_PROJECTIONS: &str = r#"
    NULL::text AS complainant_name, NULL::text AS complainant_username,
    NULL::text AS assignee_name, NULL::text AS assignee_username
"#;

pub async fn create(
    db: &PgPool,
    submitted_by_user_id: i32,
    complaint_text: &str,
    category: Option<&str>,
    location_description: Option<&str>,
    priority: &str,
) -> sqlx::Result<ComplaintRow> {
    sqlx::query_as::<_, ComplaintRow>(&format!(
        r#"
        INSERT INTO complaints (complaint_text, category, location_description, priority, submitted_by_user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, complaint_text, category, location_description, status, priority,
                  submitted_by_user_id, assigned_to_user_id, resolution_details,
                  created_at, updated_at,
                  {PLAIN_PROJECTIONS}
        "#
    ))
    .bind(complaint_text)
    .bind(category)
    .bind(location_description)
    .bind(priority)
    .bind(submitted_by_user_id)
    .fetch_one(db)
    .await
}

pub async fn list_by_submitter(db: &PgPool, user_id: i32) -> sqlx::Result<Vec<ComplaintRow>> {
    sqlx::query_as::<_, ComplaintRow>(
        r#"
        SELECT c.id, c.complaint_text, c.category, c.location_description, c.status, c.priority,
               c.submitted_by_user_id, c.assigned_to_user_id, c.resolution_details,
               c.created_at, c.updated_at,
               NULL::text AS complainant_name, NULL::text AS complainant_username,
               a.name AS assignee_name, a.username AS assignee_username
        FROM complaints c
        LEFT JOIN users a ON a.id = c.assigned_to_user_id
        WHERE c.submitted_by_user_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Admin listing with optional status/category/priority filters.
pub async fn list_filtered(
    db: &PgPool,
    status: Option<&str>,
    category: Option<&str>,
    priority: Option<&str>,
) -> sqlx::Result<Vec<ComplaintRow>> {
    sqlx::query_as::<_, ComplaintRow>(
        r#"
        SELECT c.id, c.complaint_text, c.category, c.location_description, c.status, c.priority,
               c.submitted_by_user_id, c.assigned_to_user_id, c.resolution_details,
               c.created_at, c.updated_at,
               s.name AS complainant_name, s.username AS complainant_username,
               a.name AS assignee_name, a.username AS assignee_username
        FROM complaints c
        JOIN users s ON s.id = c.submitted_by_user_id
        LEFT JOIN users a ON a.id = c.assigned_to_user_id
        WHERE ($1::text IS NULL OR c.status = $1)
          AND ($2::text IS NULL OR c.category = $2)
          AND ($3::text IS NULL OR c.priority = $3)
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(status)
    .bind(category)
    .bind(priority)
    .fetch_all(db)
    .await
}

pub async fn find_view_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<ComplaintRow>> {
    sqlx::query_as::<_, ComplaintRow>(
        r#"
        SELECT c.id, c.complaint_text, c.category, c.location_description, c.status, c.priority,
               c.submitted_by_user_id, c.assigned_to_user_id, c.resolution_details,
               c.created_at, c.updated_at,
               s.name AS complainant_name, s.username AS complainant_username,
               a.name AS assignee_name, a.username AS assignee_username
        FROM complaints c
        JOIN users s ON s.id = c.submitted_by_user_id
        LEFT JOIN users a ON a.id = c.assigned_to_user_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Partial admin update. `set_assignee` gates the assignment column so an
/// absent field leaves it untouched while an explicit null clears it.
pub async fn manage(
    db: &PgPool,
    id: i32,
    status: Option<&str>,
    priority: Option<&str>,
    set_assignee: bool,
    assignee: Option<i32>,
    resolution_details: Option<&str>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE complaints SET
            status = COALESCE($2, status),
            priority = COALESCE($3, priority),
            assigned_to_user_id = CASE WHEN $4 THEN $5 ELSE assigned_to_user_id END,
            resolution_details = COALESCE($6, resolution_details),
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(priority)
    .bind(set_assignee)
    .bind(assignee)
    .bind(resolution_details)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Open complaints assigned to one staff member, highest priority first.
pub async fn list_assigned_open(db: &PgPool, assignee_id: i32) -> sqlx::Result<Vec<ComplaintRow>> {
    sqlx::query_as::<_, ComplaintRow>(
        r#"
        SELECT c.id, c.complaint_text, c.category, c.location_description, c.status, c.priority,
               c.submitted_by_user_id, c.assigned_to_user_id, c.resolution_details,
               c.created_at, c.updated_at,
               s.name AS complainant_name, s.username AS complainant_username,
               NULL::text AS assignee_name, NULL::text AS assignee_username
        FROM complaints c
        JOIN users s ON s.id = c.submitted_by_user_id
        WHERE c.assigned_to_user_id = $1
          AND c.status IN ('pending_review', 'under_investigation')
        ORDER BY CASE c.priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                 c.created_at ASC
        "#,
    )
    .bind(assignee_id)
    .fetch_all(db)
    .await
}
