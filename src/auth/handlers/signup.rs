/**
 * Signup Handler
 *
 * Implements user registration for POST /signup.
 *
 * # Registration Process
 *
 * 1. Validate display name, email format, and password length
 * 2. Reject already-registered emails (case-insensitive)
 * 3. Derive a unique username from the display name / email
 * 4. Hash the password with bcrypt
 * 5. Create the user and fire the post-registration hook
 *
 * All validation happens before any mutation. The welcome hook runs
 * detached and is not on the success path.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::auth::handlers::types::{SignupRequest, UserResponse};
use crate::auth::hooks;
use crate::auth::username::generate_unique_username;
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::{is_unique_violation, ApiError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate signup input, field by field
///
/// Runs before the pool is touched so malformed requests never reach
/// the store.
pub fn validate_signup(request: &SignupRequest) -> Result<(), ApiError> {
    if request.display_name.trim().is_empty() {
        return Err(ApiError::validation(
            "displayName",
            "display name must not be empty",
        ));
    }
    if !request.email.contains('@') {
        return Err(ApiError::validation("email", "invalid email format"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Sign up handler
///
/// # Errors
///
/// * `400` - invalid field, or email already registered
/// * `503` - database not configured
/// * `500` - password hashing or user creation failed
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_signup(&request)?;

    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("signup request for email: {}", request.email);

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("email already registered: {}", request.email);
        return Err(ApiError::DuplicateEmail);
    }

    let username = generate_unique_username(&pool, &request.display_name, &request.email).await?;

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    // The unique index on LOWER(email) backs up the pre-check against
    // a concurrent registration of the same address.
    let user = match create_user(
        &pool,
        username,
        request.email.clone(),
        request.display_name.trim().to_string(),
        password_hash,
    )
    .await
    {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => return Err(ApiError::DuplicateEmail),
        Err(e) => return Err(e.into()),
    };

    hooks::dispatch_welcome(&user);

    tracing::info!("user created: {} ({})", user.username, user.email);
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(email: &str, name: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            display_name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_input() {
        assert!(validate_signup(&request("a@x.com", "Jane", "password123")).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let err = validate_signup(&request("not-an-email", "Jane", "password123")).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "email", .. });
    }

    #[test]
    fn test_validate_rejects_short_password() {
        let err = validate_signup(&request("a@x.com", "Jane", "short")).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "password", .. });
    }

    #[test]
    fn test_validate_rejects_blank_display_name() {
        let err = validate_signup(&request("a@x.com", "   ", "password123")).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "displayName", .. });
    }

    #[tokio::test]
    async fn test_signup_validates_before_touching_store() {
        // With no database configured, a malformed request must still
        // fail with a field error rather than 503.
        let result = signup(State(None), Json(request("bad", "Jane", "password123"))).await;
        assert_matches!(result.unwrap_err(), ApiError::Validation { field: "email", .. });
    }

    #[tokio::test]
    async fn test_signup_without_database_is_unavailable() {
        let result = signup(State(None), Json(request("a@x.com", "Jane", "password123"))).await;
        assert_matches!(result.unwrap_err(), ApiError::Unavailable);
    }
}
