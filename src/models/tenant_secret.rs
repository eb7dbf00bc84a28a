//! Per-tenant third-party (GHL) credentials

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored `tenant_secrets` row. At most one per tenant.
#[derive(Clone, Serialize, Deserialize)]
pub struct TenantSecret {
    pub tenant_id: Uuid,
    pub ghl_api_key: String,
    pub ghl_location_id: String,
    pub ghl_base_url: String,
    pub ghl_version: String,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for TenantSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantSecret")
            .field("tenant_id", &self.tenant_id)
            .field("ghl_api_key", &"<redacted>")
            .field("ghl_location_id", &self.ghl_location_id)
            .field("ghl_base_url", &self.ghl_base_url)
            .field("ghl_version", &self.ghl_version)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A complete GHL credential set ready to be upserted.
///
/// Only constructed when both the API key and the location id are present.
#[derive(Clone, PartialEq, Eq)]
pub struct GhlCredentials {
    pub api_key: String,
    pub location_id: String,
    pub base_url: String,
    pub version: String,
}

impl fmt::Debug for GhlCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GhlCredentials")
            .field("api_key", &"<redacted>")
            .field("location_id", &self.location_id)
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .finish()
    }
}
