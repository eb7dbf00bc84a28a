//! End-to-end tests for the `create-tenant` binary

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tenant_provisioner::config::DatabaseConfig;
use tenant_provisioner::db::{ApiKeyRepository, TenantSecretRepository};
use tenant_provisioner::services::hash_api_key;
use tenant_provisioner::Database;
use uuid::Uuid;

use crate::common::RowCounts;

/// Scratch directory with no `.env` or config file in it
fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("create-tenant-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_cli(dir: &PathBuf, database_url: Option<&str>, args: &[&str], stdin: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_create-tenant"));
    cmd.current_dir(dir)
        .args(args)
        .env_remove("DATABASE_URL")
        .env_remove("TENANT_PROVISIONER_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(url) = database_url {
        cmd.env("DATABASE_URL", url);
    }

    let mut child = cmd.spawn().expect("Failed to spawn create-tenant");
    {
        let mut child_stdin = child.stdin.take().unwrap();
        // The process may exit before reading stdin
        let _ = child_stdin.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn open_file_database(path: &PathBuf) -> Database {
    Database::new(DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 1,
        connect_timeout_secs: 5,
        create_if_missing: false,
    })
}

fn reported_key(stdout: &str) -> String {
    let mut lines = stdout.lines();
    lines
        .by_ref()
        .find(|l| l.contains("shown only once"))
        .expect("report should announce the one-time key");
    lines.next().unwrap().trim().to_string()
}

#[test]
fn test_missing_database_url_exits_with_one() {
    let dir = scratch_dir();
    let output = run_cli(&dir, None, &[], "Acme\n\n\n\n\n\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("[FAIL]"));
    assert!(stdout.contains("DATABASE_URL"));
    // Fails before prompting, so nothing was collected or written
    assert!(!stdout.contains("Company / tenant name"));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn test_unknown_argument_exits_with_one() {
    let dir = scratch_dir();
    let output = run_cli(&dir, None, &["--bogus"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown argument: --bogus"));
}

#[tokio::test]
async fn test_end_to_end_provisioning() {
    let dir = scratch_dir();
    let db_path = dir.join("tenants.db");
    let url = format!("sqlite://{}", db_path.display());

    let output = run_cli(
        &dir,
        Some(&url),
        &["--migrate"],
        "Acme Corp\n\npit-123\nloc_9\n\n\n",
    );
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("[OK] Tenant created"));
    assert!(stdout.contains("Key label:  primary"));
    assert!(!stdout.contains("fall back to the single-tenant"));

    let key = reported_key(&stdout);
    assert_eq!(key.len(), 64);
    assert!(stdout.contains(&format!("Authorization: Bearer {}", key)));

    let database = open_file_database(&db_path);
    let pool = database.pool().await.unwrap();
    let stored = ApiKeyRepository::new(pool)
        .find_by_hash(&hash_api_key(&key))
        .await
        .unwrap()
        .expect("stored hash should match the reported key");
    assert!(stdout.contains(&stored.tenant_id.to_string()));

    let secret = TenantSecretRepository::new(pool)
        .get_for_tenant(stored.tenant_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(secret.ghl_location_id, "loc_9");
    assert_eq!(secret.ghl_base_url, "https://services.leadconnectorhq.com");

    assert_eq!(
        RowCounts::of(pool).await,
        RowCounts {
            tenants: 1,
            api_keys: 1,
            tenant_secrets: 1,
        }
    );
    database.close().await;
}

#[tokio::test]
async fn test_end_to_end_partial_credentials_fail() {
    let dir = scratch_dir();
    let db_path = dir.join("tenants.db");
    let url = format!("sqlite://{}", db_path.display());

    let output = run_cli(&dir, Some(&url), &["--migrate"], "Acme\n\nX\n\n\n\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("[FAIL]"));
    assert!(stdout.contains("Provide both GHL API key"));
    assert!(!stdout.contains("[OK]"));

    let database = open_file_database(&db_path);
    assert_eq!(
        RowCounts::of(database.pool().await.unwrap()).await,
        RowCounts::EMPTY
    );
    database.close().await;
}

#[tokio::test]
async fn test_end_to_end_without_ghl_prints_fallback_note() {
    let dir = scratch_dir();
    let db_path = dir.join("tenants.db");
    let url = format!("sqlite://{}", db_path.display());

    let output = run_cli(&dir, Some(&url), &["--migrate"], "Acme\nops\n\n\n\n\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Key label:  ops"));
    assert!(stdout.contains("GHL_API_KEY"));
    assert!(stdout.contains("GHL_LOCATION_ID"));

    let database = open_file_database(&db_path);
    let counts = RowCounts::of(database.pool().await.unwrap()).await;
    assert_eq!(counts.tenants, 1);
    assert_eq!(counts.tenant_secrets, 0);
    database.close().await;
}
