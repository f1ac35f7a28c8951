use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side session. The `id` is the opaque token handed to the client
/// and presented back in the `authorization` header on every request.
///
/// Sessions carry no expiry; they live until revoked by DELETE /logout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
