use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{create_session, resolve_session, revoke_session};
use crate::db::repo;
use crate::error::{AppError, AppResult};
use crate::models::user::UserProfile;
use crate::AppState;

// Credential fields default to empty when absent so a missing field gets
// the same structured 400 as an empty one, instead of a body-deserialize
// rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide your username."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "Your password needs to be at least 8 characters long."
    ))]
    pub password: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide your username."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "Your password needs to be at least 8 characters long."
    ))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access_token: String,
}

/// Pull the first human-readable message out of a set of field errors.
fn validation_message(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flatten()
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request".into())
}

/// GET /session — who does this token belong to?
///
/// No authorization header at all is not an error; the client is simply
/// logged out, and gets `null`. A header that is present but unreadable
/// or resolves to nothing is 404.
pub async fn session_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<serde_json::Value>> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(Json(serde_json::Value::Null));
    };

    let token = header
        .to_str()
        .map_err(|_| AppError::NotFound("Session does not exist".into()))?;

    let (session, user) = resolve_session(&state.db, token)
        .await?
        .ok_or_else(|| AppError::NotFound("Session does not exist".into()))?;

    Ok(Json(json!({
        "session": {
            "id": session.id,
            "created_at": session.created_at,
        },
        "user": UserProfile::from(user),
    })))
}

/// POST /signup — create a user and log them straight in.
///
/// The username pre-check gives the friendly error for the common case;
/// under a concurrent duplicate signup the unique index in the store is
/// what actually wins, surfaced as the same conflict.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(e)))?;

    if repo::find_user_by_username(&state.db, &body.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already taken.".into()));
    }

    let password_hash = hash_password(&body.password)?;
    let user = repo::create_user(
        &state.db,
        &body.username,
        body.email.as_deref(),
        &password_hash,
    )
    .await?;

    let session = create_session(&state.db, user.id).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            access_token: session.id,
        }),
    ))
}

/// POST /login — verify credentials and issue a fresh session.
///
/// Unknown username and wrong password produce the identical response, so
/// the endpoint does not leak which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(e)))?;

    let user = repo::find_user_by_username(&state.db, &body.username)
        .await?
        .ok_or_else(|| AppError::Validation("Wrong credentials.".into()))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(AppError::Validation("Wrong credentials.".into()));
    }

    let session = create_session(&state.db, user.id).await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        access_token: session.id,
    }))
}

/// DELETE /logout — revoke the presented session token.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let removed = revoke_session(&state.db, &auth_user.token).await?;
    if !removed {
        // The gate resolved this token a moment ago; losing the race to
        // another logout still has to read as a failure.
        return Err(AppError::NotFound("Session does not exist".into()));
    }

    Ok(Json(json!({ "message": "User was logged out" })))
}
