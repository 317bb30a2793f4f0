/**
 * Authentication Middleware
 *
 * Protects resource routes: extracts the opaque bearer token from the
 * Authorization header, resolves it against the store, and attaches the
 * authenticated identity to the request extensions. Handlers then take
 * the identity as an explicit `AuthUser` parameter.
 *
 * Absent or malformed headers fail before the store is touched; unknown
 * or expired tokens fail with 401 after a single lookup.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::tokens::resolve_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated identity resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Resolves it to a user via the identity store
/// 3. Attaches the identity to request extensions for handlers
///
/// Returns 401 if the header is missing/malformed or the token is
/// unknown/expired, and 503 if no database is configured.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("missing Authorization header");
            ApiError::InvalidToken
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("malformed Authorization header");
        ApiError::InvalidToken
    })?;

    let pool = app_state.db_pool.as_ref().ok_or(ApiError::Unavailable)?;

    let user = resolve_token(pool, token).await?.ok_or_else(|| {
        tracing::warn!("unknown or expired token");
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
        name: user.name,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::InvalidToken
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;

    fn test_state() -> AppState {
        AppState { db_pool: None }
    }

    #[tokio::test]
    async fn test_extractor_reads_identity_from_extensions() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "jane_doe".to_string(),
            email: "a@x.com".to_string(),
            name: "Jane Doe".to_string(),
        };

        let mut request = HttpRequest::builder().uri("/apps").body(()).unwrap();
        request.extensions_mut().insert(user.clone());
        let (mut parts, _) = request.into_parts();

        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &test_state())
            .await
            .unwrap();
        assert_eq!(extracted.user_id, user.user_id);
        assert_eq!(extracted.username, "jane_doe");
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_identity() {
        let request = HttpRequest::builder().uri("/apps").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &test_state()).await;
        assert!(matches!(result.unwrap_err(), ApiError::InvalidToken));
    }
}
