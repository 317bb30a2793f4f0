/**
 * Login Handler
 *
 * Implements authentication for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by identifier (email if it contains '@', else username)
 * 2. Verify the password with bcrypt
 * 3. Get-or-create the user's bearer token
 *
 * # Security
 *
 * - Unknown identifier and wrong password return the same error, so user
 *   enumeration is not possible
 * - Re-authenticating while a token is outstanding returns the identical
 *   token; no rotation on login
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::tokens::get_or_create_token;
use crate::auth::users::{get_user_by_email, get_user_by_username};
use crate::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401` - unknown identifier or wrong password
/// * `503` - database not configured
/// * `500` - password verification or token issuance failed
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.identifier.trim().is_empty() {
        return Err(ApiError::validation("identifier", "identifier must not be empty"));
    }

    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("login request for: {}", request.identifier);

    let user = if request.identifier.contains('@') {
        get_user_by_email(&pool, &request.identifier).await?
    } else {
        get_user_by_username(&pool, &request.identifier).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("login failed, unknown identifier: {}", request.identifier);
        ApiError::InvalidCredentials
    })?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;
    if !valid {
        tracing::warn!("login failed, wrong password for: {}", user.username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = get_or_create_token(&pool, user.id).await?;

    tracing::info!("user logged in: {} ({})", user.username, user.email);
    Ok(Json(AuthResponse {
        token: token.token,
        user: UserResponse::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_login_rejects_blank_identifier() {
        let request = LoginRequest {
            identifier: "  ".to_string(),
            password: "pw".to_string(),
        };
        let result = login(State(None), Json(request)).await;
        assert_matches!(
            result.unwrap_err(),
            ApiError::Validation { field: "identifier", .. }
        );
    }

    #[tokio::test]
    async fn test_login_without_database_is_unavailable() {
        let request = LoginRequest {
            identifier: "a@x.com".to_string(),
            password: "password123".to_string(),
        };
        let result = login(State(None), Json(request)).await;
        assert_matches!(result.unwrap_err(), ApiError::Unavailable);
    }
}
