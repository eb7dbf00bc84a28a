//! API key repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::parse_db_timestamp;
use crate::models::ApiKey;

#[derive(Debug, sqlx::FromRow)]
struct ApiKeyRow {
    id: String,
    tenant_id: String,
    key_hash: String,
    label: String,
    created_at: String,
}

pub struct ApiKeyRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ApiKeyRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<ApiKey>> {
        let rows = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT id, tenant_id, key_hash, label, created_at
            FROM api_keys
            WHERE tenant_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id.to_string())
        .fetch_all(self.pool)
        .await
        .context("Failed to list api keys")?;

        rows.into_iter().map(row_to_api_key).collect()
    }

    /// Look up a key by the SHA-256 hash of its plaintext
    pub async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT id, tenant_id, key_hash, label, created_at
            FROM api_keys
            WHERE key_hash = ?
            "#,
        )
        .bind(key_hash)
        .fetch_optional(self.pool)
        .await
        .context("Failed to get api key")?;

        row.map(row_to_api_key).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM api_keys")
            .fetch_one(self.pool)
            .await
            .context("Failed to count api keys")
    }

    /// Store a hashed key for `tenant_id` on the caller's connection
    pub async fn insert_hashed_key(
        conn: &mut SqliteConnection,
        tenant_id: Uuid,
        key_hash: &str,
        label: &str,
    ) -> Result<ApiKey> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO api_keys (id, tenant_id, key_hash, label, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(tenant_id.to_string())
        .bind(key_hash)
        .bind(label)
        .bind(created_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .context("Failed to create api key")?;

        Ok(ApiKey {
            id,
            tenant_id,
            key_hash: key_hash.to_string(),
            label: label.to_string(),
            created_at,
        })
    }
}

fn row_to_api_key(row: ApiKeyRow) -> Result<ApiKey> {
    Ok(ApiKey {
        id: Uuid::parse_str(&row.id).context("Invalid api key id")?,
        tenant_id: Uuid::parse_str(&row.tenant_id).context("Invalid tenant id")?,
        key_hash: row.key_hash,
        label: row.label,
        created_at: parse_db_timestamp(&row.created_at),
    })
}
