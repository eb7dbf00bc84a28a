//! Row count fixtures

use tenant_provisioner::db::{ApiKeyRepository, TenantRepository, TenantSecretRepository};
use tenant_provisioner::DbPool;

/// Number of rows in each provisioning table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub tenants: i64,
    pub api_keys: i64,
    pub tenant_secrets: i64,
}

impl RowCounts {
    pub const EMPTY: RowCounts = RowCounts {
        tenants: 0,
        api_keys: 0,
        tenant_secrets: 0,
    };

    pub async fn of(pool: &DbPool) -> Self {
        Self {
            tenants: TenantRepository::new(pool).count().await.unwrap(),
            api_keys: ApiKeyRepository::new(pool).count().await.unwrap(),
            tenant_secrets: TenantSecretRepository::new(pool).count().await.unwrap(),
        }
    }
}
