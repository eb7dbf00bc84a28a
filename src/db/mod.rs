//! Database layer
//!
//! This module owns the connection pool and the repositories for:
//! - Tenants
//! - Hashed API keys
//! - Per-tenant GHL credentials

pub mod api_key_repository;
pub mod tenant_repository;
pub mod tenant_secret_repository;

pub use api_key_repository::ApiKeyRepository;
pub use tenant_repository::TenantRepository;
pub use tenant_secret_repository::TenantSecretRepository;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::utils::ProvisionResult;

/// Database connection pool type
pub type DbPool = Pool<Sqlite>;

/// Embedded schema for the three provisioning tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool for the given configuration
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .foreign_keys(true)
        .create_if_missing(config.create_if_missing);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
}

/// Explicitly constructed handle to the shared connection pool.
///
/// The pool is opened on first use and at most once per handle; every
/// later call to [`Database::pool`] returns the same pool. Callers own the
/// handle and must call [`Database::close`] before exiting.
pub struct Database {
    config: DatabaseConfig,
    pool: OnceCell<DbPool>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Get the pool, connecting on first call
    pub async fn pool(&self) -> ProvisionResult<&DbPool> {
        let pool = self
            .pool
            .get_or_try_init(|| async {
                debug!(max_connections = self.config.max_connections, "Opening database pool");
                init_pool(&self.config).await
            })
            .await?;
        Ok(pool)
    }

    /// Whether a connection pool has been opened
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Apply the bundled schema
    pub async fn migrate(&self) -> ProvisionResult<()> {
        let pool = self.pool().await?;
        MIGRATOR.run(pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Close the pool if it was opened. Safe to call more than once.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            debug!("Database pool closed");
        }
    }
}

pub(crate) fn parse_db_timestamp(ts: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc);
    }
    Utc::now()
}
