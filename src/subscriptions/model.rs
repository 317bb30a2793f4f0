/**
 * Subscription Model
 *
 * A Subscription binds one App to one Plan for one owning user. The
 * `(app, plan)` pair is unique across all subscriptions, active or not:
 * once a pair has been claimed it can never be claimed again, even after
 * cancellation. Cancellation itself is a soft delete.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    /// Always the authenticated requester at creation; pinned thereafter
    pub user_id: Uuid,
    #[serde(rename = "app")]
    pub app_id: Uuid,
    #[serde(rename = "plan")]
    pub plan_id: Uuid,
    /// False once soft-deleted; there is no way back to true
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload
///
/// Carries neither an owner (pinned to the requester by policy) nor an
/// `is_active` flag (cancellation only happens through DELETE, and there
/// is no reactivation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPayload {
    pub app: Uuid,
    pub plan: Uuid,
}

/// Partial-update payload (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionPatch {
    pub app: Option<Uuid>,
    pub plan: Option<Uuid>,
}

impl SubscriptionPatch {
    /// The `(app, plan)` pair the record would hold after this patch
    ///
    /// The uniqueness invariant is re-validated against this merged pair
    /// before anything is written.
    pub fn merged_pair(&self, current: &Subscription) -> (Uuid, Uuid) {
        (
            self.app.unwrap_or(current.app_id),
            self.plan.unwrap_or(current.plan_id),
        )
    }
}
