use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::{Document, DocumentStore, Filter, StoreError};

/// SQLite-backed document store. All collections share the `documents` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    name: String,
}

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<(), StoreError> {
    for statement in split_statements(sql) {
        sqlx::query(&statement).execute(pool).await?;
    }
    Ok(())
}

/// Drop `--` comment lines, then split on `;`
fn split_statements(sql: &str) -> Vec<String> {
    let cleaned = sql
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    cleaned
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Derive a display name from a connection string (`sqlite:data/hotel.db` -> `hotel`)
pub fn database_name_from_url(url: &str) -> String {
    if is_memory_url(url) {
        return "memory".to_string();
    }

    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("sqlite")
        .to_string()
}

impl SqliteStore {
    pub async fn connect(
        url: &str,
        max_connections: u32,
        name: Option<String>,
    ) -> Result<Self, StoreError> {
        let memory = is_memory_url(url);
        info!(memory, "Connecting to document store");

        // Each in-memory connection is a separate database, so keep exactly one alive
        let options = if memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = options.connect(url).await?;

        if !memory {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA synchronous = NORMAL")
                .execute(&pool)
                .await?;
        }

        let store = Self {
            pool,
            name: name.unwrap_or_else(|| database_name_from_url(url)),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", 1, None).await
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        debug!("Running database migrations...");
        execute_sql(&self.pool, include_str!("../../migrations/001_documents.sql")).await?;
        Ok(())
    }
}

fn select_sql(filter: &Filter, limited: bool) -> Result<String, StoreError> {
    filter.validate()?;

    let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?");
    for (field, _) in filter.conditions() {
        if field == Filter::ID_FIELD {
            sql.push_str(" AND id = ?");
        } else {
            sql.push_str(&format!(" AND json_extract(body, '$.{}') = ?", field));
        }
    }
    sql.push_str(" ORDER BY rowid");
    if limited {
        sql.push_str(" LIMIT ?");
    }
    Ok(sql)
}

fn row_to_document((id, body): (String, String)) -> Result<Document, StoreError> {
    match serde_json::from_str::<Value>(&body)? {
        Value::Object(map) => Ok(Document::new(id, map)),
        _ => Err(StoreError::InvalidDocument(format!(
            "document {} is not a JSON object",
            id
        ))),
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert(&self, collection: &str, body: Map<String, Value>) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let body = serde_json::to_string(&body)?;

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(collection)
            .bind(&body)
            .execute(&self.pool)
            .await?;

        debug!(collection, id = %id, "Document inserted");
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.list(collection, filter, Some(1)).await?;
        Ok(documents.pop())
    }

    async fn list(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = select_sql(filter, limit.is_some())?;

        let mut query = sqlx::query_as::<_, (String, String)>(&sql).bind(collection);
        for (_, value) in filter.conditions() {
            query = query.bind(value.as_str());
        }
        if let Some(limit) = limit {
            query = query.bind(i64::from(limit));
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
