use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{create_document, ContactMessage, ContactResponse};
use crate::AppState;

use super::error::ApiError;
use super::validation::ValidJson;

/// POST /contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ValidJson(message): ValidJson<ContactMessage>,
) -> Result<Json<ContactResponse>, ApiError> {
    let store = state.store()?;
    let id = create_document(store, &message).await?;
    info!(message_id = %id, "Contact message received");

    Ok(Json(ContactResponse {
        id,
        status: "received".to_string(),
    }))
}
