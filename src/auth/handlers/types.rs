/**
 * Authentication Handler Types
 *
 * Request and response types shared by the signup, login, and me handlers.
 * The auth boundary speaks camelCase (`displayName`), matching the gateway
 * contract; resource endpoints keep snake_case.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// User's email address (unique, case-insensitively)
    pub email: String,
    /// User's display name; the unique username is derived from it
    pub display_name: String,
    /// User's password (hashed before storage, never persisted as-is)
    pub password: String,
}

/// Login request
///
/// The identifier is an email address or a username; anything containing
/// an `@` is treated as an email.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Auth response returned by login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Opaque bearer token (get-or-create: re-login returns the same token)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_uses_camel_case() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"email":"a@x.com","displayName":"Jane Doe","password":"pw123456"}"#,
        )
        .unwrap();
        assert_eq!(request.display_name, "Jane Doe");
    }

    #[test]
    fn test_user_response_has_no_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "jane_doe".to_string(),
            email: "a@x.com".to_string(),
            name: "Jane Doe".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let body = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!body.contains("secret"));
        assert!(body.contains("displayName"));
    }
}
