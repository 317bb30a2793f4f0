/**
 * Opaque Bearer Tokens
 *
 * This module issues and resolves the opaque tokens that carry identity
 * across requests.
 *
 * # Get-or-Create Semantics
 *
 * Each user has at most one outstanding token (UNIQUE on user_id).
 * Authenticating while a non-expired token exists returns that same token;
 * it does not rotate. Expired tokens are replaced in place. Both cases are
 * handled by a single `INSERT ... ON CONFLICT DO UPDATE` so that two
 * concurrent logins for the same user cannot mint two distinct live tokens.
 *
 * # Token Format
 *
 * Tokens are 64 hex characters drawn from two v4 UUIDs. They carry no
 * claims; identity is established only by looking the token up in the
 * store (`resolve_token`).
 */

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::User;

/// Token lifetime.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// An issued bearer token
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// The opaque key presented in the Authorization header
    pub token: String,
    /// When this token stops resolving
    pub expires_at: DateTime<Utc>,
}

/// Generate a fresh opaque token key (64 hex chars)
pub fn new_token_key() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// Compute the expiry for a token issued now
pub fn expiry_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(TOKEN_TTL_DAYS)
}

/// Get the user's outstanding token, or create one
///
/// A single upsert keyed on the UNIQUE (user_id) constraint:
/// - no row: insert the candidate token
/// - live row: keep it untouched and return it
/// - expired row: replace it with the candidate
///
/// The CASE expressions make the whole decision inside one statement, so
/// there is no check-then-act window between concurrent authenticates.
pub async fn get_or_create_token(pool: &PgPool, user_id: Uuid) -> Result<AuthToken, sqlx::Error> {
    let candidate = new_token_key();
    let now = Utc::now();
    let expires = expiry_from(now);

    let row: (String, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO auth_tokens (id, user_id, token, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE SET
            token = CASE WHEN auth_tokens.expires_at <= EXCLUDED.created_at
                         THEN EXCLUDED.token ELSE auth_tokens.token END,
            created_at = CASE WHEN auth_tokens.expires_at <= EXCLUDED.created_at
                              THEN EXCLUDED.created_at ELSE auth_tokens.created_at END,
            expires_at = CASE WHEN auth_tokens.expires_at <= EXCLUDED.created_at
                              THEN EXCLUDED.expires_at ELSE auth_tokens.expires_at END
        RETURNING token, expires_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&candidate)
    .bind(now)
    .bind(expires)
    .fetch_one(pool)
    .await?;

    Ok(AuthToken {
        token: row.0,
        expires_at: row.1,
    })
}

/// Resolve a bearer token to its user
///
/// Returns `None` for unknown or expired tokens. This is the sole
/// mechanism a request uses to establish identity.
pub async fn resolve_token(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.name, u.password_hash, u.created_at, u.updated_at
        FROM auth_tokens t
        JOIN users u ON u.id = t.user_id
        WHERE t.token = $1 AND t.expires_at > $2
        "#,
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_key_format() {
        let key = new_token_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_keys_are_unique() {
        assert_ne!(new_token_key(), new_token_key());
    }

    #[test]
    fn test_expiry_is_thirty_days_out() {
        let now = Utc::now();
        let expires = expiry_from(now);
        assert_eq!(expires - now, Duration::days(TOKEN_TTL_DAYS));
    }
}
