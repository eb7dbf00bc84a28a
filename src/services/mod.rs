//! Provisioning services

pub mod credentials;
pub mod prompt;
pub mod provisioning;
pub mod report;

pub use credentials::{hash_api_key, GeneratedApiKey};
pub use prompt::PromptCollector;
pub use provisioning::TenantProvisioner;
pub use report::{render_failure, render_success};
