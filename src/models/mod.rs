//! Data models

mod api_key;
mod provision;
mod tenant;
mod tenant_secret;

pub use api_key::*;
pub use provision::*;
pub use tenant::*;
pub use tenant_secret::*;
