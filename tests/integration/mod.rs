//! Integration tests for the tenant provisioner
//!
//! These tests run the writer against a real (in-memory) database and the
//! `create-tenant` binary against a temporary SQLite file.

mod cli_tests;
