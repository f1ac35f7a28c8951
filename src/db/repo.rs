//! Keyed persistence operations for users and day records.
//!
//! Every function hits the backing store directly; there is no cache, so
//! each call reflects the latest committed state. Failures are terminal —
//! callers never retry.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::day::DayRecord;
use crate::models::user::User;
use crate::validate::ValidatedDay;

pub async fn find_user_by_username(db: &PgPool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

/// Insert a new user. The unique index on `username` is the real guard
/// against concurrent duplicate signups; a violation surfaces as
/// [`AppError::Conflict`] rather than a generic store failure.
pub async fn create_user(
    db: &PgPool,
    username: &str,
    email: Option<&str>,
    password_hash: &str,
) -> AppResult<User> {
    let result = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(e) if is_unique_violation(&e) => {
            Err(AppError::Conflict("Username already taken.".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn create_day(db: &PgPool, user_id: Uuid, day: &ValidatedDay) -> AppResult<DayRecord> {
    let record = sqlx::query_as::<_, DayRecord>(
        r#"
        INSERT INTO days (id, user_id, work, sleep, chores, leisure, self_care, mood, month, day)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(day.work)
    .bind(day.sleep)
    .bind(day.chores)
    .bind(day.leisure)
    .bind(day.self_care)
    .bind(day.mood.as_str())
    .bind(day.month)
    .bind(day.day)
    .fetch_one(db)
    .await?;

    Ok(record)
}

pub async fn list_days_for_user(db: &PgPool, user_id: Uuid) -> AppResult<Vec<DayRecord>> {
    let records = sqlx::query_as::<_, DayRecord>(
        "SELECT * FROM days WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(records)
}

pub async fn find_day_by_id(db: &PgPool, id: Uuid) -> AppResult<Option<DayRecord>> {
    let record = sqlx::query_as::<_, DayRecord>("SELECT * FROM days WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(record)
}

/// Full-document replace: every content column is overwritten with the
/// validated input, so fields absent from the request body land back on
/// their schema defaults. The owning user is left untouched.
pub async fn replace_day(db: &PgPool, id: Uuid, day: &ValidatedDay) -> AppResult<Option<DayRecord>> {
    let record = sqlx::query_as::<_, DayRecord>(
        r#"
        UPDATE days SET
            work = $2, sleep = $3, chores = $4, leisure = $5, self_care = $6,
            mood = $7, month = $8, day = $9, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(day.work)
    .bind(day.sleep)
    .bind(day.chores)
    .bind(day.leisure)
    .bind(day.self_care)
    .bind(day.mood.as_str())
    .bind(day.month)
    .bind(day.day)
    .fetch_optional(db)
    .await?;

    Ok(record)
}

/// Delete a day record by id. Returns `false` when no row matched.
pub async fn delete_day(db: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM days WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db_err| db_err.is_unique_violation())
}
