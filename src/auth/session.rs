//! Opaque session tokens, backed by the `sessions` table.
//!
//! The token doubles as the session's primary key: 32 bytes from the OS
//! RNG, hex-encoded. Tokens never expire; the only way out is
//! [`revoke_session`].

use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::session::Session;
use crate::models::user::User;

/// Allocate a fresh unguessable token: 64 lowercase hex chars.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Create a session for a user and return it. The caller hands the
/// session id back to the client as its access token.
pub async fn create_session(db: &PgPool, user_id: Uuid) -> AppResult<Session> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(generate_token())
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(session)
}

/// Look up a session by token and join the user it references.
///
/// An unknown token is `None`, not an error. So is a token whose user has
/// since been deleted; the join simply comes back empty.
pub async fn resolve_session(db: &PgPool, token: &str) -> AppResult<Option<(Session, User)>> {
    let row = sqlx::query_as::<_, SessionUserRow>(
        r#"
        SELECT s.id AS session_id, s.user_id, s.created_at AS session_created_at,
               u.id, u.username, u.email, u.password_hash, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.id = $1
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await?;

    Ok(row.map(SessionUserRow::split))
}

/// Delete a session by token. Returns `false` when no such session existed.
pub async fn revoke_session(db: &PgPool, token: &str) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(token)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct SessionUserRow {
    session_id: String,
    user_id: Uuid,
    session_created_at: chrono::DateTime<chrono::Utc>,
    id: Uuid,
    username: String,
    email: Option<String>,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl SessionUserRow {
    fn split(self) -> (Session, User) {
        (
            Session {
                id: self.session_id,
                user_id: self.user_id,
                created_at: self.session_created_at,
            },
            User {
                id: self.id,
                username: self.username,
                email: self.email,
                password_hash: self.password_hash,
                created_at: self.created_at,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_lowercase_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_are_unique_across_calls() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }
}
