//! Test data factories
//!
//! Builders for provisioning requests covering the credential combinations
//! the writer has to handle.

use tenant_provisioner::models::ProvisionRequest;

/// Factory for creating provisioning requests
pub struct RequestFactory;

impl RequestFactory {
    /// Tenant with default label and no GHL credentials
    pub fn minimal(name: &str) -> ProvisionRequest {
        ProvisionRequest::new(name)
    }

    /// Tenant with a custom label and a full GHL credential set
    pub fn with_ghl(name: &str) -> ProvisionRequest {
        ProvisionRequest::new(name)
            .with_key_label("integration")
            .with_ghl("pit-test-key", "loc_test_1")
    }

    /// Tenant with only one half of the GHL credential pair
    pub fn partial_ghl(
        name: &str,
        api_key: Option<&str>,
        location_id: Option<&str>,
    ) -> ProvisionRequest {
        let mut request = ProvisionRequest::new(name);
        request.ghl_api_key = api_key.map(str::to_string);
        request.ghl_location_id = location_id.map(str::to_string);
        request
    }
}
