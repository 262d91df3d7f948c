//! Demo login: find-or-create a user by email. No token or session is issued.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{
    create_document, Entity, Filter, LoginRequest, LoginResponse, User, UserResponse,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::ValidJson;

/// Login endpoint
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let store = state.store()?;
    let candidate = User::from_login(&request);

    let by_email = Filter::new().eq("email", request.email.as_str());
    let name = match store.find_one(User::COLLECTION, &by_email).await? {
        Some(existing) => existing.decode::<User>()?.name,
        None => {
            let id = create_document(store, &candidate).await?;
            info!(user_id = %id, email = %candidate.email, "User created on first login");
            candidate.name
        }
    };

    Ok(Json(LoginResponse {
        user: UserResponse {
            name,
            email: request.email,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{detached_state, failing_state, memory_state};
    use crate::db::DEMO_PASSWORD_HASH;
    use axum::http::StatusCode;

    fn request(name: Option<&str>, email: &str) -> LoginRequest {
        LoginRequest {
            name: name.map(str::to_string),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_login_creates_user() {
        let state = memory_state().await;

        let Json(response) = login(State(state.clone()), ValidJson(request(None, "ada@example.com")))
            .await
            .unwrap();
        assert_eq!(response.user.name, "ada");
        assert_eq!(response.user.email, "ada@example.com");

        let store = state.store().unwrap();
        let users = store.list(User::COLLECTION, &Filter::new(), None).await.unwrap();
        assert_eq!(users.len(), 1);
        let stored: User = users[0].decode().unwrap();
        assert_eq!(stored.password_hash, DEMO_PASSWORD_HASH);
    }

    #[tokio::test]
    async fn test_repeat_login_returns_existing_profile() {
        let state = memory_state().await;

        login(State(state.clone()), ValidJson(request(Some("Ada Lovelace"), "ada@example.com")))
            .await
            .unwrap();
        let Json(response) = login(State(state.clone()), ValidJson(request(Some("Someone Else"), "ada@example.com")))
            .await
            .unwrap();

        assert_eq!(response.user.name, "Ada Lovelace");

        let store = state.store().unwrap();
        let users = store.list(User::COLLECTION, &Filter::new(), None).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_login_without_store_is_500() {
        let err = login(State(detached_state()), ValidJson(request(None, "a@b.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_login_store_failure_is_500() {
        let err = login(State(failing_state()), ValidJson(request(None, "a@b.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
