//! Request-level auth gates. Both are stateless and delegate entirely to
//! the session store.
//!
//! The `authorization` header carries the session token directly; there is
//! no "Bearer " prefix scheme.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::session::resolve_session;
use crate::error::AppError;
use crate::AppState;

/// Authenticated caller, extracted from the `authorization` header.
///
/// Use as an extractor parameter in any handler that requires a login; a
/// missing token or one that resolves to no live session rejects with 401
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    /// The raw token the caller presented; logout deletes this session.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let (_, user) = resolve_session(&state.db, &token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            token,
        })
    }
}

/// Inverse gate for signup and login: a request that presents a token
/// resolving to a live session is rejected with 403. Requests with no
/// token, or a stale one, pass through.
pub async fn require_logout(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if let Some(token) = token {
        if resolve_session(&state.db, token).await?.is_some() {
            return Err(AppError::Forbidden);
        }
    }

    Ok(next.run(req).await)
}
