/**
 * Subscription Handlers
 *
 * HTTP surface for /subscriptions. Reads go straight to the repository
 * under the policy scope; creates, updates, and deletes go through the
 * lifecycle controller, which owns the uniqueness and soft-delete
 * semantics.
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
use crate::policy::{self, Action, ResourceClass};
use crate::subscriptions::db;
use crate::subscriptions::lifecycle;
use crate::subscriptions::model::{Subscription, SubscriptionPatch, SubscriptionPayload};

/// GET /subscriptions - list the requester's active subscriptions
///
/// Soft-deleted subscriptions drop out of this listing but remain
/// fetchable by id.
pub async fn list_subscriptions(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Subscription>>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Subscription, Action::List);
    Ok(Json(db::list_subscriptions(&pool, &scope).await?))
}

/// POST /subscriptions - subscribe an app to a plan
pub async fn create_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<(StatusCode, Json<Subscription>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let subscription = lifecycle::create(&pool, user.user_id, &payload).await?;
    tracing::info!(
        "subscription created: {} (app {} / plan {}) for {}",
        subscription.id,
        subscription.app_id,
        subscription.plan_id,
        user.username
    );
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /subscriptions/{id} - fetch one subscription, active or not
pub async fn get_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Subscription>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let scope = policy::scope(user.user_id, ResourceClass::Subscription, Action::Read);
    let subscription = db::get_subscription(&pool, &scope, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(subscription))
}

/// PUT /subscriptions/{id} - replace the (app, plan) binding
pub async fn update_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<Json<Subscription>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let patch = SubscriptionPatch {
        app: Some(payload.app),
        plan: Some(payload.plan),
    };
    let subscription = lifecycle::update(&pool, user.user_id, id, &patch).await?;
    Ok(Json(subscription))
}

/// PATCH /subscriptions/{id} - partially rebind app and/or plan
pub async fn patch_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<SubscriptionPatch>,
) -> Result<Json<Subscription>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let subscription = lifecycle::update(&pool, user.user_id, id, &patch).await?;
    Ok(Json(subscription))
}

/// DELETE /subscriptions/{id} - soft-delete (cancel) a subscription
pub async fn delete_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    lifecycle::soft_delete(&pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
