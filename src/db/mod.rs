//! Document persistence.
//!
//! Entities are stored as JSON documents in named collections behind the
//! [`DocumentStore`] trait. [`SqliteStore`] is the production backend; the
//! typed helpers [`create_document`] and [`get_documents`] sit on top of any
//! store.

mod models;
mod seeders;
mod sqlite;

pub use models::*;
pub use seeders::{sample_hotels, seed_hotels};
pub use sqlite::{database_name_from_url, SqliteStore};

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

lazy_static! {
    /// Field names usable in filters (they end up inside a JSON path)
    static ref FIELD_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// Shared handle to whichever store backs the API
pub type StoreHandle = Arc<dyn DocumentStore>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database not configured")]
    NotConfigured,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Failed to encode or decode document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid filter field: {0}")]
    InvalidField(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Conjunction of exact string-equality conditions on top-level fields.
///
/// The pseudo-field `id` matches the store-assigned identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub const ID_FIELD: &'static str = "id";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().eq(Self::ID_FIELD, id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Reject field names that cannot be addressed safely
    pub fn validate(&self) -> Result<(), StoreError> {
        match self
            .conditions
            .iter()
            .find(|(field, _)| !FIELD_NAME_REGEX.is_match(field))
        {
            Some((field, _)) => Err(StoreError::InvalidField(field.clone())),
            None => Ok(()),
        }
    }
}

/// A stored document: identifier plus JSON object body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.body.clone()))?)
    }

    /// API rendering: the identifier becomes a string `id` field.
    /// Timestamps are stored as ISO-8601 strings already.
    pub fn into_json(self) -> Value {
        let mut body = self.body;
        body.remove("_id");
        body.insert(Filter::ID_FIELD.to_string(), Value::String(self.id));
        Value::Object(body)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Database name reported by diagnostics
    fn name(&self) -> &str;

    /// Insert a document and return its new identifier
    async fn insert(&self, collection: &str, body: Map<String, Value>) -> Result<String, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Document>, StoreError>;

    /// Matching documents in insertion order
    async fn list(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Collections that currently hold at least one document
    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Insert `entity` into its collection, stamping `created_at`/`updated_at`
pub async fn create_document<E: Entity>(
    store: &dyn DocumentStore,
    entity: &E,
) -> Result<String, StoreError> {
    let mut body = match serde_json::to_value(entity)? {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "{} must serialize to an object, got {}",
                E::COLLECTION,
                other
            )))
        }
    };

    let now = Value::String(chrono::Utc::now().to_rfc3339());
    body.insert("created_at".to_string(), now.clone());
    body.insert("updated_at".to_string(), now);

    store.insert(E::COLLECTION, body).await
}

pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Filter,
    limit: Option<u32>,
) -> Result<Vec<Document>, StoreError> {
    store.list(collection, filter, limit).await
}

/// Connect the configured store, or return `None` when no URL is set
pub async fn init(config: &DatabaseConfig) -> Result<Option<StoreHandle>> {
    let url = match config.url.as_deref() {
        Some(url) => url,
        None => {
            warn!("No database URL configured, running without a store");
            return Ok(None);
        }
    };

    let store = SqliteStore::connect(url, config.max_connections, config.name.clone())
        .await
        .with_context(|| "Failed to initialize database")?;

    info!(database = %store.name(), "Database initialized successfully");
    Ok(Some(Arc::new(store)))
}
