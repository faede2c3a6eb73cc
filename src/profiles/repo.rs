use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, FromRow)]
pub struct StudentProfileRecord {
    pub user_id: i32,
    pub contact_number: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub year_of_joining: Option<i32>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct GardenerProfileRecord {
    pub user_id: i32,
    pub contact_number: String,
    pub address: Option<String>,
    pub date_of_joining: Option<Date>,
    pub profile_image_url: Option<String>,
    pub specialization: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Gardener user joined with an optional profile, for the admin roster.
#[derive(Debug, Clone, FromRow)]
pub struct GardenerListRow {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub contact_number: Option<String>,
    pub specialization: Option<String>,
    pub profile_image_url: Option<String>,
    pub date_of_joining: Option<Date>,
}

/// Replacement field set for a profile setup; the submitted form is the
/// whole profile, so absent fields clear. The image column is special:
/// `remove_image` clears it, a provided URL replaces it, otherwise it stays.
#[derive(Debug, Default)]
pub struct StudentProfileFields {
    pub contact_number: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub year_of_joining: Option<i32>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub remove_image: bool,
}

#[derive(Debug, Default)]
pub struct GardenerProfileFields {
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub date_of_joining: Option<Date>,
    pub specialization: Option<String>,
    pub profile_image_url: Option<String>,
    pub remove_image: bool,
}

pub async fn find_student(db: &PgPool, user_id: i32) -> sqlx::Result<Option<StudentProfileRecord>> {
    sqlx::query_as::<_, StudentProfileRecord>(
        r#"
        SELECT user_id, contact_number, department, semester, year_of_joining,
               profile_image_url, bio, created_at, updated_at
        FROM student_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn create_student(
    db: &PgPool,
    user_id: i32,
    fields: &StudentProfileFields,
) -> sqlx::Result<StudentProfileRecord> {
    sqlx::query_as::<_, StudentProfileRecord>(
        r#"
        INSERT INTO student_profiles (user_id, contact_number, department, semester, year_of_joining, profile_image_url, bio)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING user_id, contact_number, department, semester, year_of_joining,
                  profile_image_url, bio, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&fields.contact_number)
    .bind(&fields.department)
    .bind(&fields.semester)
    .bind(fields.year_of_joining)
    .bind(&fields.profile_image_url)
    .bind(&fields.bio)
    .fetch_one(db)
    .await
}

pub async fn update_student(
    db: &PgPool,
    user_id: i32,
    fields: &StudentProfileFields,
) -> sqlx::Result<Option<StudentProfileRecord>> {
    sqlx::query_as::<_, StudentProfileRecord>(
        r#"
        UPDATE student_profiles SET
            contact_number = $2,
            department = $3,
            semester = $4,
            year_of_joining = $5,
            bio = $6,
            profile_image_url = CASE
                WHEN $8 THEN NULL
                WHEN $7::text IS NOT NULL THEN $7
                ELSE profile_image_url
            END,
            updated_at = now()
        WHERE user_id = $1
        RETURNING user_id, contact_number, department, semester, year_of_joining,
                  profile_image_url, bio, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&fields.contact_number)
    .bind(&fields.department)
    .bind(&fields.semester)
    .bind(fields.year_of_joining)
    .bind(&fields.bio)
    .bind(&fields.profile_image_url)
    .bind(fields.remove_image)
    .fetch_optional(db)
    .await
}

pub async fn find_gardener(
    db: &PgPool,
    user_id: i32,
) -> sqlx::Result<Option<GardenerProfileRecord>> {
    sqlx::query_as::<_, GardenerProfileRecord>(
        r#"
        SELECT user_id, contact_number, address, date_of_joining,
               profile_image_url, specialization, created_at, updated_at
        FROM gardener_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn create_gardener(
    db: &PgPool,
    user_id: i32,
    contact_number: &str,
    fields: &GardenerProfileFields,
) -> sqlx::Result<GardenerProfileRecord> {
    sqlx::query_as::<_, GardenerProfileRecord>(
        r#"
        INSERT INTO gardener_profiles (user_id, contact_number, address, date_of_joining, profile_image_url, specialization)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING user_id, contact_number, address, date_of_joining,
                  profile_image_url, specialization, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(contact_number)
    .bind(&fields.address)
    .bind(fields.date_of_joining)
    .bind(&fields.profile_image_url)
    .bind(&fields.specialization)
    .fetch_one(db)
    .await
}

pub async fn update_gardener(
    db: &PgPool,
    user_id: i32,
    fields: &GardenerProfileFields,
) -> sqlx::Result<Option<GardenerProfileRecord>> {
    sqlx::query_as::<_, GardenerProfileRecord>(
        r#"
        UPDATE gardener_profiles SET
            contact_number = COALESCE($2, contact_number),
            address = $3,
            date_of_joining = $4,
            specialization = $5,
            profile_image_url = CASE
                WHEN $7 THEN NULL
                WHEN $6::text IS NOT NULL THEN $6
                ELSE profile_image_url
            END,
            updated_at = now()
        WHERE user_id = $1
        RETURNING user_id, contact_number, address, date_of_joining,
                  profile_image_url, specialization, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&fields.contact_number)
    .bind(&fields.address)
    .bind(fields.date_of_joining)
    .bind(&fields.specialization)
    .bind(&fields.profile_image_url)
    .bind(fields.remove_image)
    .fetch_optional(db)
    .await
}

pub async fn list_gardeners(db: &PgPool) -> sqlx::Result<Vec<GardenerListRow>> {
    sqlx::query_as::<_, GardenerListRow>(
        r#"
        SELECT u.id, u.name, u.username, u.email, u.created_at,
               gp.contact_number, gp.specialization, gp.profile_image_url, gp.date_of_joining
        FROM users u
        LEFT JOIN gardener_profiles gp ON gp.user_id = u.id
        WHERE u.role = 'gardener'
        ORDER BY u.name ASC
        "#,
    )
    .fetch_all(db)
    .await
}
