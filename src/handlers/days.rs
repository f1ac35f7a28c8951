use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::repo;
use crate::error::{AppError, AppResult};
use crate::models::day::{DayRecord, DayRecordInput};
use crate::validate::validate_day;
use crate::AppState;

/// POST /upload — validate and persist a day record for the caller.
pub async fn upload(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<DayRecordInput>,
) -> AppResult<(StatusCode, Json<DayRecord>)> {
    let valid = validate_day(&body)?;
    let record = repo::create_day(&state.db, auth_user.id, &valid).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /daily-report — every record owned by the caller, insertion order.
pub async fn daily_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<DayRecord>>> {
    let records = repo::list_days_for_user(&state.db, auth_user.id).await?;
    Ok(Json(records))
}

/// GET /:id — fetch a single record by id.
///
/// Public and unscoped: the lookup is by id only, with no check that the
/// caller owns the record (or is logged in at all).
pub async fn get_day(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DayRecord>> {
    let record = repo::find_day_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Day record not found".into()))?;

    Ok(Json(record))
}

/// PUT /:id — full replace of a record.
///
/// Fields absent from the body revert to their defaults, exactly like a
/// fresh upload. Looked up by id only; ownership is not checked.
pub async fn replace_day(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DayRecordInput>,
) -> AppResult<Json<DayRecord>> {
    let valid = validate_day(&body)?;
    let record = repo::replace_day(&state.db, id, &valid)
        .await?
        .ok_or_else(|| AppError::NotFound("Day record not found".into()))?;

    Ok(Json(record))
}

/// DELETE /:id — delete a record by id. Ownership is not checked.
pub async fn delete_day(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = repo::delete_day(&state.db, id).await?;
    if !removed {
        return Err(AppError::NotFound("Day record not found".into()));
    }

    Ok(Json(json!({ "deleted": true, "id": id })))
}
