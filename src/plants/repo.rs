use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct PlantRecord {
    pub id: i32,
    pub name: String,
    pub scientific_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub area: Option<String>,
    pub quantity: i32,
    pub added_by: i32,
    pub created_at: OffsetDateTime,
}

/// Projection for the public gallery listing.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryRow {
    pub id: i32,
    pub name: String,
    pub scientific_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct PlantChanges {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

pub async fn create(
    db: &PgPool,
    name: &str,
    scientific_name: &str,
    description: Option<&str>,
    image_url: Option<&str>,
    area: &str,
    quantity: i32,
    added_by: i32,
) -> sqlx::Result<PlantRecord> {
    sqlx::query_as::<_, PlantRecord>(
        r#"
        INSERT INTO plants (name, scientific_name, description, image_url, area, quantity, added_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, scientific_name, description, image_url, area, quantity, added_by, created_at
        "#,
    )
    .bind(name)
    .bind(scientific_name)
    .bind(description)
    .bind(image_url)
    .bind(area)
    .bind(quantity)
    .bind(added_by)
    .fetch_one(db)
    .await
}

pub async fn list_gallery(db: &PgPool) -> sqlx::Result<Vec<GalleryRow>> {
    sqlx::query_as::<_, GalleryRow>(
        r#"
        SELECT id, name, scientific_name, image_url
        FROM plants
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<PlantRecord>> {
    sqlx::query_as::<_, PlantRecord>(
        r#"
        SELECT id, name, scientific_name, description, image_url, area, quantity, added_by, created_at
        FROM plants
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update(db: &PgPool, id: i32, changes: PlantChanges) -> sqlx::Result<Option<PlantRecord>> {
    sqlx::query_as::<_, PlantRecord>(
        r#"
        UPDATE plants SET
            name = COALESCE($2, name),
            scientific_name = COALESCE($3, scientific_name),
            description = COALESCE($4, description),
            area = COALESCE($5, area),
            quantity = COALESCE($6, quantity),
            image_url = COALESCE($7, image_url)
        WHERE id = $1
        RETURNING id, name, scientific_name, description, image_url, area, quantity, added_by, created_at
        "#,
    )
    .bind(id)
    .bind(changes.name)
    .bind(changes.scientific_name)
    .bind(changes.description)
    .bind(changes.area)
    .bind(changes.quantity)
    .bind(changes.image_url)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM plants WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
