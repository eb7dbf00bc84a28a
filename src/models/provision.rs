//! Provisioning request and outcome models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ApiKey, GhlCredentials, Tenant};
use crate::utils::validation::{
    validate_api_version, validate_base_url, validate_key_label, validate_tenant_name,
    MAX_KEY_LABEL_LEN, MAX_TENANT_NAME_LEN,
};
use crate::utils::{ProvisionError, ProvisionResult};

/// Label used when the operator leaves the key label blank
pub const DEFAULT_KEY_LABEL: &str = "primary";

/// GHL API base URL used when the operator leaves it blank
pub const DEFAULT_GHL_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// GHL API version used when the operator leaves it blank
pub const DEFAULT_GHL_VERSION: &str = "2021-07-28";

/// Everything the operator supplied for one tenant.
///
/// `ghl_api_key` and `ghl_location_id` are either both present or both
/// absent; [`ProvisionRequest::validate`] rejects anything else.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub tenant_name: String,
    pub key_label: String,
    #[serde(skip_serializing)]
    pub ghl_api_key: Option<String>,
    pub ghl_location_id: Option<String>,
    pub ghl_base_url: String,
    pub ghl_version: String,
}

impl ProvisionRequest {
    /// Request with only a tenant name; everything else takes its default.
    pub fn new(tenant_name: impl Into<String>) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            key_label: DEFAULT_KEY_LABEL.to_string(),
            ghl_api_key: None,
            ghl_location_id: None,
            ghl_base_url: DEFAULT_GHL_BASE_URL.to_string(),
            ghl_version: DEFAULT_GHL_VERSION.to_string(),
        }
    }

    pub fn with_key_label(mut self, label: impl Into<String>) -> Self {
        self.key_label = label.into();
        self
    }

    pub fn with_ghl(mut self, api_key: impl Into<String>, location_id: impl Into<String>) -> Self {
        self.ghl_api_key = Some(api_key.into());
        self.ghl_location_id = Some(location_id.into());
        self
    }

    /// Check every rule the writer relies on.
    pub fn validate(&self) -> ProvisionResult<()> {
        if self.tenant_name.trim().is_empty() {
            return Err(ProvisionError::validation("Tenant name is required"));
        }
        if !validate_tenant_name(&self.tenant_name) {
            return Err(ProvisionError::validation(format!(
                "Tenant name must be at most {} characters",
                MAX_TENANT_NAME_LEN
            )));
        }
        if !validate_key_label(&self.key_label) {
            return Err(ProvisionError::validation(format!(
                "Invalid key label '{}': use letters, digits, spaces, '.', '_' or '-' (max {} characters)",
                self.key_label, MAX_KEY_LABEL_LEN
            )));
        }

        self.ghl_credentials().map(|_| ())
    }

    /// The GHL credential pair, if one was supplied.
    ///
    /// Blank values count as absent. Exactly one of key/location is a
    /// validation error.
    pub fn ghl_credentials(&self) -> ProvisionResult<Option<GhlCredentials>> {
        let api_key = non_blank(self.ghl_api_key.as_deref());
        let location_id = non_blank(self.ghl_location_id.as_deref());

        match (api_key, location_id) {
            (None, None) => Ok(None),
            (Some(api_key), Some(location_id)) => {
                if !validate_base_url(&self.ghl_base_url) {
                    return Err(ProvisionError::validation(format!(
                        "Invalid GHL base URL '{}'",
                        self.ghl_base_url
                    )));
                }
                if !validate_api_version(&self.ghl_version) {
                    return Err(ProvisionError::validation(format!(
                        "Invalid GHL API version '{}'",
                        self.ghl_version
                    )));
                }
                Ok(Some(GhlCredentials {
                    api_key: api_key.to_string(),
                    location_id: location_id.to_string(),
                    base_url: self.ghl_base_url.clone(),
                    version: self.ghl_version.clone(),
                }))
            }
            _ => Err(ProvisionError::validation(
                "Provide both GHL API key and GHL location ID, or leave both blank",
            )),
        }
    }
}

impl fmt::Debug for ProvisionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionRequest")
            .field("tenant_name", &self.tenant_name)
            .field("key_label", &self.key_label)
            .field("ghl_api_key", &self.ghl_api_key.as_ref().map(|_| "<redacted>"))
            .field("ghl_location_id", &self.ghl_location_id)
            .field("ghl_base_url", &self.ghl_base_url)
            .field("ghl_version", &self.ghl_version)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Result of a committed provisioning transaction.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedTenant {
    pub tenant: Tenant,
    pub api_key: ApiKey,
    /// Whether a `tenant_secrets` row was written
    pub ghl_stored: bool,
}
