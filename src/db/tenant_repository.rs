//! Tenant repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::parse_db_timestamp;
use crate::models::Tenant;

#[derive(Debug, sqlx::FromRow)]
struct TenantRow {
    id: String,
    name: String,
    created_at: String,
}

pub struct TenantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TenantRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Tenant>> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, name, created_at
            FROM tenants
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to get tenant")?;

        row.map(row_to_tenant).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tenants")
            .fetch_one(self.pool)
            .await
            .context("Failed to count tenants")
    }

    /// Insert a tenant on the caller's connection (normally an open transaction)
    /// and return it with the identifier the row was stored under.
    pub async fn insert(conn: &mut SqliteConnection, name: &str) -> Result<Tenant> {
        let created_at = Utc::now();

        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO tenants (id, name, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(created_at.to_rfc3339())
        .fetch_one(&mut *conn)
        .await
        .context("Failed to create tenant")?;

        Ok(Tenant {
            id: Uuid::parse_str(&id).context("Invalid tenant id")?,
            name: name.to_string(),
            created_at,
        })
    }
}

fn row_to_tenant(row: TenantRow) -> Result<Tenant> {
    Ok(Tenant {
        id: Uuid::parse_str(&row.id).context("Invalid tenant id")?,
        name: row.name,
        created_at: parse_db_timestamp(&row.created_at),
    })
}
