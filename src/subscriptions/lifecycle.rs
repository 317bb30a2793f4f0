/**
 * Subscription Lifecycle Controller
 *
 * Orchestrates the operations where plain CRUD is not enough:
 *
 * - **create** enters Active, with the owner pinned to the requester and
 *   the `(app, plan)` pair claimed against the store's unique constraint.
 * - **update** re-validates the uniqueness invariant on the merged pair
 *   in the same statement that writes it; a conflict rejects the whole
 *   update with no partial field changes.
 * - **soft delete** is the only transition out of Active. Inactive is
 *   terminal: no reactivation operation exists, and a pair consumed by
 *   an inactive subscription stays consumed forever.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::policy::{self, Action, ResourceClass};
use crate::subscriptions::db;
use crate::subscriptions::model::{Subscription, SubscriptionPatch, SubscriptionPayload};

/// Classify store-level constraint failures into the API taxonomy
///
/// A unique violation is the `(app, plan)` pair being already claimed,
/// active or not. A foreign-key violation means the referenced app or
/// plan does not exist.
fn classify(err: sqlx::Error) -> ApiError {
    if is_unique_violation(&err) {
        return ApiError::conflict("a subscription for this app and plan already exists");
    }
    if is_foreign_key_violation(&err) {
        let field = match &err {
            sqlx::Error::Database(db) => match db.constraint() {
                Some(c) if c.contains("app") => "app",
                Some(c) if c.contains("plan") => "plan",
                _ => "app",
            },
            _ => "app",
        };
        return ApiError::validation(field, "referenced record does not exist");
    }
    err.into()
}

/// Create a subscription: always enters Active, owner forced to requester
pub async fn create(
    pool: &PgPool,
    requester: Uuid,
    payload: &SubscriptionPayload,
) -> Result<Subscription, ApiError> {
    let owner = policy::forced_owner(requester, ResourceClass::Subscription)
        .ok_or_else(|| ApiError::internal("subscriptions must carry an owner"))?;

    db::insert_subscription(pool, owner, payload.app, payload.plan)
        .await
        .map_err(classify)
}

/// Patch a subscription's (app, plan) binding
///
/// Loads the requester's record (active or not; anything else is 404),
/// merges the patch onto the current pair, and commits a single UPDATE.
/// The owner stays pinned to the record's user no matter what the caller
/// supplied, and `is_active` is untouched.
pub async fn update(
    pool: &PgPool,
    requester: Uuid,
    id: Uuid,
    patch: &SubscriptionPatch,
) -> Result<Subscription, ApiError> {
    let scope = policy::scope(requester, ResourceClass::Subscription, Action::Update);

    let current = db::get_subscription(pool, &scope, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let (app_id, plan_id) = patch.merged_pair(&current);

    db::update_pair(pool, &scope, id, app_id, plan_id)
        .await
        .map_err(classify)?
        .ok_or(ApiError::NotFound)
}

/// Soft-delete a subscription: Active -> Inactive, row kept for audit
pub async fn soft_delete(pool: &PgPool, requester: Uuid, id: Uuid) -> Result<(), ApiError> {
    let scope = policy::scope(requester, ResourceClass::Subscription, Action::Delete);

    if !db::deactivate(pool, &scope, id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("subscription {} deactivated by {}", id, requester);
    Ok(())
}
