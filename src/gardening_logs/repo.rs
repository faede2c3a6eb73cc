use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

/// Log row with optional plant and gardener projections; the projection
/// columns are NULL when not joined or when the reference is gone.
#[derive(Debug, Clone, FromRow)]
pub struct LogRow {
    pub id: i32,
    pub gardener_user_id: i32,
    pub task_type: String,
    pub date_of_task: Date,
    pub area_description: Option<String>,
    pub plant_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub plant_name: Option<String>,
    pub plant_image_url: Option<String>,
    pub gardener_name: Option<String>,
    pub gardener_username: Option<String>,
}

pub async fn create(
    db: &PgPool,
    gardener_user_id: i32,
    task_type: &str,
    date_of_task: Date,
    area_description: Option<&str>,
    plant_id: Option<i32>,
    notes: Option<&str>,
) -> sqlx::Result<LogRow> {
    sqlx::query_as::<_, LogRow>(
        r#"
        INSERT INTO gardening_logs (gardener_user_id, task_type, date_of_task, area_description, plant_id, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, gardener_user_id, task_type, date_of_task, area_description, plant_id, notes, created_at,
                  NULL::text AS plant_name, NULL::text AS plant_image_url, NULL::text AS gardener_name, NULL::text AS gardener_username
        "#,
    )
    .bind(gardener_user_id)
    .bind(task_type)
    .bind(date_of_task)
    .bind(area_description)
    .bind(plant_id)
    .bind(notes)
    .fetch_one(db)
    .await
}

pub async fn list_by_gardener(db: &PgPool, gardener_user_id: i32) -> sqlx::Result<Vec<LogRow>> {
    sqlx::query_as::<_, LogRow>(
        r#"
        SELECT l.id, l.gardener_user_id, l.task_type, l.date_of_task, l.area_description,
               l.plant_id, l.notes, l.created_at,
               p.name AS plant_name, p.image_url AS plant_image_url,
               NULL::text AS gardener_name, NULL::text AS gardener_username
        FROM gardening_logs l
        LEFT JOIN plants p ON p.id = l.plant_id
        WHERE l.gardener_user_id = $1
        ORDER BY l.date_of_task DESC, l.created_at DESC
        "#,
    )
    .bind(gardener_user_id)
    .fetch_all(db)
    .await
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<LogRow>> {
    sqlx::query_as::<_, LogRow>(
        r#"
        SELECT l.id, l.gardener_user_id, l.task_type, l.date_of_task, l.area_description,
               l.plant_id, l.notes, l.created_at,
               p.name AS plant_name, p.image_url AS plant_image_url,
               u.name AS gardener_name, u.username AS gardener_username
        FROM gardening_logs l
        LEFT JOIN plants p ON p.id = l.plant_id
        JOIN users u ON u.id = l.gardener_user_id
        ORDER BY l.date_of_task DESC, l.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}
