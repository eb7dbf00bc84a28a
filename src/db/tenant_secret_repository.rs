//! Tenant secret repository (per-tenant GHL credentials)

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::parse_db_timestamp;
use crate::models::{GhlCredentials, TenantSecret};

#[derive(sqlx::FromRow)]
struct TenantSecretRow {
    tenant_id: String,
    ghl_api_key: String,
    ghl_location_id: String,
    ghl_base_url: String,
    ghl_version: String,
    updated_at: String,
}

pub struct TenantSecretRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TenantSecretRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_for_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantSecret>> {
        let row = sqlx::query_as::<_, TenantSecretRow>(
            r#"
            SELECT tenant_id, ghl_api_key, ghl_location_id, ghl_base_url, ghl_version, updated_at
            FROM tenant_secrets
            WHERE tenant_id = ?
            "#,
        )
        .bind(tenant_id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to get tenant secret")?;

        row.map(row_to_secret).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tenant_secrets")
            .fetch_one(self.pool)
            .await
            .context("Failed to count tenant secrets")
    }

    /// Insert or fully overwrite the GHL credentials for `tenant_id`.
    ///
    /// On conflict every GHL field is replaced and `updated_at` is refreshed;
    /// nothing from the previous row is merged.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        tenant_id: Uuid,
        creds: &GhlCredentials,
    ) -> Result<TenantSecret> {
        let updated_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO tenant_secrets
                (tenant_id, ghl_api_key, ghl_location_id, ghl_base_url, ghl_version, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(tenant_id) DO UPDATE SET
                ghl_api_key = excluded.ghl_api_key,
                ghl_location_id = excluded.ghl_location_id,
                ghl_base_url = excluded.ghl_base_url,
                ghl_version = excluded.ghl_version,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(tenant_id.to_string())
        .bind(&creds.api_key)
        .bind(&creds.location_id)
        .bind(&creds.base_url)
        .bind(&creds.version)
        .bind(updated_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .context("Failed to upsert tenant secret")?;

        Ok(TenantSecret {
            tenant_id,
            ghl_api_key: creds.api_key.clone(),
            ghl_location_id: creds.location_id.clone(),
            ghl_base_url: creds.base_url.clone(),
            ghl_version: creds.version.clone(),
            updated_at,
        })
    }
}

fn row_to_secret(row: TenantSecretRow) -> Result<TenantSecret> {
    Ok(TenantSecret {
        tenant_id: Uuid::parse_str(&row.tenant_id).context("Invalid tenant id")?,
        ghl_api_key: row.ghl_api_key,
        ghl_location_id: row.ghl_location_id,
        ghl_base_url: row.ghl_base_url,
        ghl_version: row.ghl_version,
        updated_at: parse_db_timestamp(&row.updated_at),
    })
}
