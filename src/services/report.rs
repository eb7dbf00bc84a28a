//! Operator-facing result report

use std::fmt::Write as _;

use crate::models::ProvisionedTenant;
use crate::services::credentials::GeneratedApiKey;
use crate::utils::ProvisionError;

/// Fixed usage hint printed after every successful run
pub const USAGE_HINT: &str =
    "Send the Authorization header above with every API request made on behalf of this tenant.";

/// Note printed when no GHL credentials were stored
pub const GHL_FALLBACK_NOTE: &str = "No GHL credentials were stored for this tenant. \
Requests will fall back to the single-tenant GHL_API_KEY and GHL_LOCATION_ID environment variables.";

/// Render the success report.
///
/// This is the only place the plaintext key is ever shown.
pub fn render_success(provisioned: &ProvisionedTenant, key: &GeneratedApiKey) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "[OK] Tenant created");
    let _ = writeln!(out, "  Tenant:     {}", provisioned.tenant.name);
    let _ = writeln!(out, "  Tenant ID:  {}", provisioned.tenant.id);
    let _ = writeln!(out, "  Key label:  {}", provisioned.api_key.label);
    let _ = writeln!(out);
    let _ = writeln!(out, "  API key (shown only once, store it now):");
    let _ = writeln!(out, "    {}", key.plaintext());
    let _ = writeln!(out);
    let _ = writeln!(out, "  Authorization: {}", key.bearer_header());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", USAGE_HINT);

    if !provisioned.ghl_stored {
        let _ = writeln!(out);
        let _ = writeln!(out, "Note: {}", GHL_FALLBACK_NOTE);
    }

    out
}

/// Render the single failure line
pub fn render_failure(err: &ProvisionError) -> String {
    format!("[FAIL] Tenant provisioning failed: {}", err)
}
