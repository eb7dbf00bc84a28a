//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum tenant display name length
pub const MAX_TENANT_NAME_LEN: usize = 255;

/// Maximum API key label length
pub const MAX_KEY_LABEL_LEN: usize = 100;

/// Regex for validating API key labels
static KEY_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9 _.-]*$").unwrap());

/// Regex for validating third-party base URLs
static BASE_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[a-zA-Z0-9.-]+(:[0-9]{1,5})?(/\S*)?$").unwrap());

/// Validate a tenant display name
pub fn validate_tenant_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_TENANT_NAME_LEN
}

/// Validate an API key label
pub fn validate_key_label(label: &str) -> bool {
    !label.is_empty() && label.len() <= MAX_KEY_LABEL_LEN && KEY_LABEL_REGEX.is_match(label)
}

/// Validate a GHL base URL
pub fn validate_base_url(url: &str) -> bool {
    url.len() <= 2048 && BASE_URL_REGEX.is_match(url)
}

/// Validate a GHL API version string
pub fn validate_api_version(version: &str) -> bool {
    !version.trim().is_empty() && !version.chars().any(char::is_whitespace)
}
