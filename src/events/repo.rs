use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

/// Event record in the database. `participant_count` is a denormalized
/// cache of the join-record count, maintained transactionally by
/// `services::join_event`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Date,
    pub time: String,
    pub image_url: Option<String>,
    pub completed: bool,
    pub participant_count: i32,
    pub created_by: i32,
    pub created_at: OffsetDateTime,
}

/// Event row joined with its creator's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCreatorRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Date,
    pub time: String,
    pub image_url: Option<String>,
    pub completed: bool,
    pub participant_count: i32,
    pub created_by: i32,
    pub created_at: OffsetDateTime,
    pub creator_name: String,
    pub creator_username: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<Date>,
    pub time: Option<String>,
    pub image_url: Option<String>,
    pub remove_image: bool,
    pub completed: Option<bool>,
}

pub async fn create(
    db: &PgPool,
    title: &str,
    description: &str,
    location: &str,
    date: Date,
    time: &str,
    image_url: Option<&str>,
    created_by: i32,
) -> sqlx::Result<EventRecord> {
    sqlx::query_as::<_, EventRecord>(
        r#"
        INSERT INTO events (title, description, location, date, time, image_url, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, title, description, location, date, time, image_url,
                  completed, participant_count, created_by, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(location)
    .bind(date)
    .bind(time)
    .bind(image_url)
    .bind(created_by)
    .fetch_one(db)
    .await
}

pub async fn find_by_id_with_creator(
    db: &PgPool,
    id: i32,
) -> sqlx::Result<Option<EventWithCreatorRow>> {
    sqlx::query_as::<_, EventWithCreatorRow>(
        r#"
        SELECT e.id, e.title, e.description, e.location, e.date, e.time, e.image_url,
               e.completed, e.participant_count, e.created_by, e.created_at,
               u.name AS creator_name, u.username AS creator_username
        FROM events e
        JOIN users u ON u.id = e.created_by
        WHERE e.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// All events, oldest first; classification into upcoming/completed/past
/// buckets happens in the service layer on every read.
pub async fn list_with_creator(db: &PgPool) -> sqlx::Result<Vec<EventWithCreatorRow>> {
    sqlx::query_as::<_, EventWithCreatorRow>(
        r#"
        SELECT e.id, e.title, e.description, e.location, e.date, e.time, e.image_url,
               e.completed, e.participant_count, e.created_by, e.created_at,
               u.name AS creator_name, u.username AS creator_username
        FROM events e
        JOIN users u ON u.id = e.created_by
        ORDER BY e.date ASC, e.time ASC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn update(db: &PgPool, id: i32, changes: EventChanges) -> sqlx::Result<Option<EventRecord>> {
    sqlx::query_as::<_, EventRecord>(
        r#"
        UPDATE events SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            location = COALESCE($4, location),
            date = COALESCE($5, date),
            time = COALESCE($6, time),
            image_url = CASE WHEN $8 THEN NULL ELSE COALESCE($7, image_url) END,
            completed = COALESCE($9, completed)
        WHERE id = $1
        RETURNING id, title, description, location, date, time, image_url,
                  completed, participant_count, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.location)
    .bind(changes.date)
    .bind(changes.time)
    .bind(changes.image_url)
    .bind(changes.remove_image)
    .bind(changes.completed)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn mark_completed(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE events SET completed = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Events the user has joined, for the student profile view.
pub async fn list_joined_by_user(db: &PgPool, user_id: i32) -> sqlx::Result<Vec<EventRecord>> {
    sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT e.id, e.title, e.description, e.location, e.date, e.time, e.image_url,
               e.completed, e.participant_count, e.created_by, e.created_at
        FROM events e
        JOIN event_participants ep ON ep.event_id = e.id
        WHERE ep.user_id = $1
        ORDER BY e.date ASC, e.time ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
