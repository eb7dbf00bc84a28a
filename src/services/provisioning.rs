//! Transactional tenant writer
//!
//! Creates the tenant, its hashed API key, and (optionally) its GHL
//! credentials in one transaction. Either all rows are committed or none.

use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use crate::db::{ApiKeyRepository, DbPool, TenantRepository, TenantSecretRepository};
use crate::models::{ProvisionRequest, ProvisionedTenant};
use crate::services::credentials::GeneratedApiKey;
use crate::utils::ProvisionResult;

pub struct TenantProvisioner {
    pool: DbPool,
}

impl TenantProvisioner {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate `request`, then write all rows and commit.
    ///
    /// On any failure the transaction is rolled back before the error is
    /// returned. A failing rollback is logged and otherwise ignored so the
    /// original error is the one the caller sees.
    pub async fn provision(
        &self,
        request: &ProvisionRequest,
        key: &GeneratedApiKey,
    ) -> ProvisionResult<ProvisionedTenant> {
        let mut tx = self.pool.begin().await?;

        match write_rows(&mut tx, request, key).await {
            Ok(provisioned) => {
                tx.commit().await?;
                info!(
                    tenant_id = %provisioned.tenant.id,
                    api_key_id = %provisioned.api_key.id,
                    label = %provisioned.api_key.label,
                    ghl_stored = provisioned.ghl_stored,
                    "Tenant provisioned"
                );
                Ok(provisioned)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                debug!(error = %err, "Provisioning rolled back");
                Err(err)
            }
        }
    }
}

async fn write_rows(
    conn: &mut SqliteConnection,
    request: &ProvisionRequest,
    key: &GeneratedApiKey,
) -> ProvisionResult<ProvisionedTenant> {
    request.validate()?;
    let ghl = request.ghl_credentials()?;

    let tenant = TenantRepository::insert(conn, request.tenant_name.trim()).await?;
    debug!(tenant_id = %tenant.id, "Inserted tenant");

    let api_key =
        ApiKeyRepository::insert_hashed_key(conn, tenant.id, key.hash(), &request.key_label)
            .await?;
    debug!(api_key_id = %api_key.id, "Inserted api key");

    let ghl_stored = match ghl {
        Some(creds) => {
            TenantSecretRepository::upsert(conn, tenant.id, &creds).await?;
            debug!(
                tenant_id = %tenant.id,
                location_id = %creds.location_id,
                "Stored GHL credentials"
            );
            true
        }
        None => false,
    };

    Ok(ProvisionedTenant {
        tenant,
        api_key,
        ghl_stored,
    })
}
