/**
 * Get Current User Handler
 *
 * Implements GET /me, returning the profile of the authenticated user.
 * Identity was already resolved by the auth middleware, so this handler
 * is a pure projection of the request identity.
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::middleware::auth::AuthUser;

/// Get current user handler
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id,
        email: user.email,
        display_name: user.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::AuthenticatedUser;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_get_me_projects_identity() {
        let id = Uuid::new_v4();
        let user = AuthenticatedUser {
            user_id: id,
            username: "jane_doe".to_string(),
            email: "a@x.com".to_string(),
            name: "Jane Doe".to_string(),
        };

        let Json(response) = get_me(AuthUser(user)).await;
        assert_eq!(response.id, id);
        assert_eq!(response.email, "a@x.com");
        assert_eq!(response.display_name, "Jane Doe");
    }
}
