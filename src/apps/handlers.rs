/**
 * App Handlers
 *
 * CRUD handlers for /apps. Every operation derives its row scope from the
 * ownership policy before touching the repository; ownership mismatches
 * come back as 404, not 403.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::apps::db;
use crate::apps::model::{App, AppPatch, AppPayload};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::policy::{self, Action, ResourceClass};

const MAX_NAME_LEN: usize = 50;

/// Validate an app payload before any mutation
pub fn validate_payload(payload: &AppPayload) -> Result<(), ApiError> {
    if payload.domain_name.trim().is_empty() {
        return Err(ApiError::validation("domain_name", "domain name must not be empty"));
    }
    if payload.domain_name.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(
            "domain_name",
            format!("domain name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name", "name must not be empty"));
    }
    if payload.name.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(
            "name",
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// GET /apps - list the requester's apps
pub async fn list_apps(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<App>>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::App, Action::List);
    Ok(Json(db::list_apps(&pool, &scope).await?))
}

/// POST /apps - create an app owned by the requester
pub async fn create_app(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AppPayload>,
) -> Result<(StatusCode, Json<App>), ApiError> {
    validate_payload(&payload)?;
    let pool = pool.ok_or(ApiError::Unavailable)?;

    // Owner comes from the policy, never from the body.
    let owner = policy::forced_owner(user.user_id, ResourceClass::App)
        .ok_or_else(|| ApiError::internal("apps must carry an owner"))?;

    let app = db::insert_app(&pool, owner, &payload).await?;
    tracing::info!("app created: {} ({}) for {}", app.name, app.id, user.username);
    Ok((StatusCode::CREATED, Json(app)))
}

/// GET /apps/{id} - fetch one of the requester's apps
pub async fn get_app(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<App>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::App, Action::Read);
    let app = db::get_app(&pool, &scope, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(app))
}

/// PUT /apps/{id} - full update of one of the requester's apps
pub async fn update_app(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AppPayload>,
) -> Result<Json<App>, ApiError> {
    validate_payload(&payload)?;
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::App, Action::Update);
    let app = db::update_app(&pool, &scope, id, &payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(app))
}

/// PATCH /apps/{id} - partial update of one of the requester's apps
pub async fn patch_app(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<AppPatch>,
) -> Result<Json<App>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::App, Action::Update);

    let current = db::get_app(&pool, &scope, id).await?.ok_or(ApiError::NotFound)?;
    let merged = patch.apply_to(&current);
    validate_payload(&merged)?;

    let app = db::update_app(&pool, &scope, id, &merged)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(app))
}

/// DELETE /apps/{id} - hard-delete one of the requester's apps
pub async fn delete_app(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::App, Action::Delete);
    if !db::delete_app(&pool, &scope, id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("app deleted: {} by {}", id, user.username);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::model::{AppType, Framework};
    use assert_matches::assert_matches;

    fn payload(domain: &str, name: &str) -> AppPayload {
        AppPayload {
            domain_name: domain.to_string(),
            name: name.to_string(),
            app_type: AppType::Web,
            framework: Framework::ServerRendered,
            description: String::new(),
            screenshot: None,
        }
    }

    #[test]
    fn test_validate_accepts_minimal_payload() {
        assert!(validate_payload(&payload("d1", "My App")).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let err = validate_payload(&payload("  ", "My App")).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "domain_name", .. });
    }

    #[test]
    fn test_validate_rejects_oversized_name() {
        let err = validate_payload(&payload("d1", &"x".repeat(51))).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "name", .. });
    }
}
