/**
 * API Route Configuration
 *
 * Route tables for the identity and resource endpoints.
 *
 * # Routes
 *
 * ## Public
 * - `POST /signup` - user registration
 * - `POST /login`  - authentication, token get-or-create
 *
 * ## Bearer-token authenticated
 * - `GET /me`
 * - `GET/POST /apps`, `GET/PUT/PATCH/DELETE /apps/{id}`
 * - `GET/POST /plans`, `GET/PUT/PATCH/DELETE /plans/{id}`
 * - `GET/POST /subscriptions`, `GET/PUT/PATCH/DELETE /subscriptions/{id}`
 *
 * DELETE on a subscription is a soft delete (204, row kept); DELETE on
 * apps and plans is a hard delete.
 */

use axum::routing::{get, post};
use axum::Router;

use crate::apps::handlers as apps;
use crate::auth::{get_me, login, signup};
use crate::plans::handlers as plans;
use crate::server::state::AppState;
use crate::subscriptions::handlers as subscriptions;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes behind the auth middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/apps", get(apps::list_apps).post(apps::create_app))
        .route(
            "/apps/{id}",
            get(apps::get_app)
                .put(apps::update_app)
                .patch(apps::patch_app)
                .delete(apps::delete_app),
        )
        .route("/plans", get(plans::list_plans).post(plans::create_plan))
        .route(
            "/plans/{id}",
            get(plans::get_plan)
                .put(plans::update_plan)
                .patch(plans::patch_plan)
                .delete(plans::delete_plan),
        )
        .route(
            "/subscriptions",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/{id}",
            get(subscriptions::get_subscription)
                .put(subscriptions::update_subscription)
                .patch(subscriptions::patch_subscription)
                .delete(subscriptions::delete_subscription),
        )
}
