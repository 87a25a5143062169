//! Key-value configuration store. Request handlers only read; writes happen out of band.
//!
//! The PostgreSQL adapter keeps documents in a table named from `EDGE_SCHEMA` env (default `edge`).

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Read access to JSON documents by key. `Ok(None)` means the key is absent.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError>;
}

/// Key of the tenant settings document.
pub fn org_settings_key(tenant_key: &str) -> String {
    format!("org-settings-{}", tenant_key)
}

/// Key of the stored HTML template parameters for one page.
pub fn html_file_key(tenant_key: &str, html_file_name: &str) -> String {
    format!("html-file-{}-{}", tenant_key, html_file_name)
}

/// Key of a named import map for one deployment environment.
pub fn import_map_key(tenant_key: &str, environment: &str, import_map_name: &str) -> String {
    format!("import-map-{}-{}-{}", tenant_key, environment, import_map_name)
}

/// In-process store. Used by tests and by the server when no database is configured.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        MemoryKvStore::default()
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        MemoryKvStore {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Seed from a JSON object file mapping keys to documents.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Store(format!("read {}: {}", path.display(), e)))?;
        let entries: HashMap<String, Value> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Store(format!("parse {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), keys = entries.len(), "seeded in-memory kv store");
        Ok(MemoryKvStore {
            entries: RwLock::new(entries),
        })
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Result<(), AppError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| AppError::Store("kv lock poisoned".into()))?;
        guard.insert(key.into(), value);
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| AppError::Store("kv lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }
}

/// Schema name for the KV table. From env `EDGE_SCHEMA`, default `edge`. Must be a valid PostgreSQL identifier.
pub fn edge_schema() -> String {
    std::env::var("EDGE_SCHEMA").unwrap_or_else(|_| "edge".into())
}

/// Returns schema-qualified table name (e.g. "edge._sys_kv_data").
pub fn qualified_sys_table(table: &str) -> String {
    format!("{}.{}", edge_schema(), table)
}

/// Create schema from `EDGE_SCHEMA` env if not exists, then the KV table.
pub async fn ensure_kv_table(pool: &PgPool) -> Result<(), AppError> {
    let schema = edge_schema();
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            key TEXT PRIMARY KEY,
            value JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_sys_table("_sys_kv_data")
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Store backed by `<schema>._sys_kv_data`.
#[derive(Clone)]
pub struct PgKvStore {
    pool: PgPool,
    table: String,
}

impl PgKvStore {
    pub fn new(pool: PgPool) -> Self {
        PgKvStore {
            pool,
            table: qualified_sys_table("_sys_kv_data"),
        }
    }
}

#[async_trait]
impl KvStore for PgKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT value FROM {} WHERE key = $1", self.table);
        tracing::debug!(sql = %sql, key, "kv get");
        let row: Option<(Value,)> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.0))
    }
}
