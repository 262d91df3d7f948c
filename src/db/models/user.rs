//! User model and demo login payloads.

use serde::{Deserialize, Serialize};

use super::Entity;

/// Placeholder stored instead of a real password hash
pub const DEMO_PASSWORD_HASH: &str = "demo-hash";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "user";
}

impl User {
    /// Build the record stored on first login. `name` falls back to the
    /// local part of the email address.
    pub fn from_login(request: &LoginRequest) -> Self {
        let name = request
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_name(&request.email));

        Self {
            name,
            email: request.email.clone(),
            password_hash: DEMO_PASSWORD_HASH.to_string(),
        }
    }
}

fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}
