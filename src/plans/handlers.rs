/**
 * Plan Handlers
 *
 * CRUD handlers for /plans. Plans are not owner-scoped: any
 * authenticated identity may list, read, and manage them. Administrative
 * gating, if a deployment wants it, is an external concern.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::plans::db;
use crate::plans::model::{Plan, PlanPatch, PlanPayload, PlanTier};
use crate::policy::{self, Action, ResourceClass};

const MAX_NAME_LEN: usize = 20;

/// Validate a plan payload and resolve its tier
pub fn validate_payload(payload: &PlanPayload) -> Result<PlanTier, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name", "name must not be empty"));
    }
    if payload.name.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(
            "name",
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    PlanTier::from_price(payload.price).ok_or_else(|| {
        ApiError::validation("price", format!("unknown plan tier: {}", payload.price))
    })
}

/// GET /plans - list all plans
pub async fn list_plans(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Plan>>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Plan, Action::List);
    Ok(Json(db::list_plans(&pool, &scope).await?))
}

/// POST /plans - create a plan
pub async fn create_plan(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<PlanPayload>,
) -> Result<(StatusCode, Json<Plan>), ApiError> {
    let tier = validate_payload(&payload)?;
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let plan = db::insert_plan(&pool, tier, &payload).await?;
    tracing::info!("plan created: {} ({}) by {}", plan.name, plan.id, user.username);
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /plans/{id} - fetch one plan
pub async fn get_plan(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Plan>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Plan, Action::Read);
    let plan = db::get_plan(&pool, &scope, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(plan))
}

/// PUT /plans/{id} - full update of a plan
pub async fn update_plan(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlanPayload>,
) -> Result<Json<Plan>, ApiError> {
    let tier = validate_payload(&payload)?;
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Plan, Action::Update);
    let plan = db::update_plan(&pool, &scope, id, tier, &payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(plan))
}

/// PATCH /plans/{id} - partial update of a plan
pub async fn patch_plan(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<PlanPatch>,
) -> Result<Json<Plan>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Plan, Action::Update);

    let current = db::get_plan(&pool, &scope, id).await?.ok_or(ApiError::NotFound)?;
    let merged = patch.apply_to(&current);
    let tier = validate_payload(&merged)?;

    let plan = db::update_plan(&pool, &scope, id, tier, &merged)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(plan))
}

/// DELETE /plans/{id} - hard-delete a plan
pub async fn delete_plan(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Plan, Action::Delete);
    if !db::delete_plan(&pool, &scope, id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("plan deleted: {} by {}", id, user.username);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn payload(name: &str, price: i32) -> PlanPayload {
        PlanPayload {
            name: name.to_string(),
            description: None,
            price,
        }
    }

    #[test]
    fn test_validate_resolves_tier() {
        assert_eq!(validate_payload(&payload("Free", 0)).unwrap(), PlanTier::Free);
        assert_eq!(validate_payload(&payload("Pro", 25)).unwrap(), PlanTier::Pro);
    }

    #[test]
    fn test_validate_rejects_unknown_tier() {
        let err = validate_payload(&payload("Custom", 7)).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "price", .. });
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = validate_payload(&payload("", 0)).unwrap_err();
        assert_matches!(err, ApiError::Validation { field: "name", .. });
    }
}
