//! Liveness and store diagnostics.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

use super::error::truncate;

/// At most this many collection names are reported
const MAX_REPORTED_COLLECTIONS: usize = 10;
const MAX_ERROR_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    pub message: String,
}

/// Store connectivity report. Failures are described here, never raised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DatabaseDiagnostics {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hotel Booking API is running".to_string(),
    })
}

/// GET /test
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DatabaseDiagnostics> {
    let mut report = DatabaseDiagnostics::default();

    let store = match state.store.as_deref() {
        Some(store) => store,
        None => {
            report.database = "⚠️  Available but not initialized".to_string();
            return Json(report);
        }
    };

    report.database = "✅ Connected & Working".to_string();
    report.database_url = Some(if state.config.database.url.is_some() {
        "✅ Set".to_string()
    } else {
        "❌ Not Set".to_string()
    });
    report.database_name = Some(store.name().to_string());
    report.connection_status = "Connected".to_string();

    match store.list_collection_names().await {
        Ok(names) => {
            report.collections = names.into_iter().take(MAX_REPORTED_COLLECTIONS).collect();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Listing collections failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate(&e.to_string(), MAX_ERROR_LEN)
            );
        }
    }

    Json(report)
}
