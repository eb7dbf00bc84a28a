//! Common test utilities and helpers
//!
//! This module provides shared test infrastructure including:
//! - In-memory database setup
//! - Provisioning request factories
//! - Row count fixtures

pub mod factories;
pub mod fixtures;

pub use factories::*;
pub use fixtures::*;
pub use test_db::*;
