use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Equipment row with an optional adder projection.
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub added_by_user_id: i32,
    pub created_at: OffsetDateTime,
    pub adder_name: Option<String>,
    pub adder_username: Option<String>,
}

pub async fn create(
    db: &PgPool,
    name: &str,
    image_url: &str,
    description: Option<&str>,
    added_by_user_id: i32,
) -> sqlx::Result<EquipmentRow> {
    sqlx::query_as::<_, EquipmentRow>(
        r#"
        INSERT INTO equipment (name, image_url, description, added_by_user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, image_url, description, added_by_user_id, created_at,
                  NULL::text AS adder_name, NULL::text AS adder_username
        "#,
    )
    .bind(name)
    .bind(image_url)
    .bind(description)
    .bind(added_by_user_id)
    .fetch_one(db)
    .await
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<EquipmentRow>> {
    sqlx::query_as::<_, EquipmentRow>(
        r#"
        SELECT e.id, e.name, e.image_url, e.description, e.added_by_user_id, e.created_at,
               u.name AS adder_name, u.username AS adder_username
        FROM equipment e
        JOIN users u ON u.id = e.added_by_user_id
        ORDER BY e.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn update(
    db: &PgPool,
    id: i32,
    name: Option<&str>,
    description: Option<&str>,
    image_url: Option<&str>,
) -> sqlx::Result<Option<EquipmentRow>> {
    sqlx::query_as::<_, EquipmentRow>(
        r#"
        UPDATE equipment SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            image_url = COALESCE($4, image_url)
        WHERE id = $1
        RETURNING id, name, image_url, description, added_by_user_id, created_at,
                  NULL::text AS adder_name, NULL::text AS adder_username
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(image_url)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
