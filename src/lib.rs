//! Tenant Provisioner Library
//!
//! Provisions a tenant, a hashed API key, and optional per-tenant GHL
//! credentials in a single database transaction. The `create-tenant` binary
//! drives it interactively.

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

pub use config::ProvisionConfig;
pub use db::{Database, DbPool};
pub use utils::{ProvisionError, ProvisionResult};
