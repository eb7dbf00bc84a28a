//! Interactive tool that provisions a new tenant
//!
//! Prompts for the tenant name, an API key label, and optional GHL
//! credentials, then writes the tenant, the hashed key, and the credentials
//! in one transaction. The plaintext key is printed once and never stored.
//!
//! Usage:
//!   create-tenant [--config <path>] [--migrate] [--verbose]
//!
//! Environment:
//!   DATABASE_URL  Connection string (required unless set in the config file)

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tenant_provisioner::config::{LogFormat, LoggingConfig};
use tenant_provisioner::services::{
    render_failure, render_success, GeneratedApiKey, PromptCollector, TenantProvisioner,
};
use tenant_provisioner::{Database, ProvisionConfig, ProvisionError, ProvisionResult};
use tracing::{error, info};

struct CliArgs {
    config_path: Option<PathBuf>,
    migrate: bool,
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", msg);
            print_help();
            return ExitCode::FAILURE;
        }
    };

    let mut config = match ProvisionConfig::load(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", render_failure(&e));
            return exit_code(&e);
        }
    };
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    if args.migrate {
        config.database.create_if_missing = true;
    }

    init_logging(&config.logging);

    let database = Database::new(config.database.clone());
    let result = run(&config, &database, args.migrate).await;

    // Close on every path once the database may have been touched
    database.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Tenant provisioning failed");
            println!("{}", render_failure(&e));
            exit_code(&e)
        }
    }
}

async fn run(config: &ProvisionConfig, database: &Database, migrate: bool) -> ProvisionResult<()> {
    let request = PromptCollector::stdio(config.ghl.clone()).collect().await?;
    let key = GeneratedApiKey::generate();

    let pool = database.pool().await?;
    info!("Connected to database");
    if migrate {
        database.migrate().await?;
    }

    let provisioned = TenantProvisioner::new(pool.clone())
        .provision(&request, &key)
        .await?;

    print!("{}", render_success(&provisioned, &key));
    Ok(())
}

fn exit_code(err: &ProvisionError) -> ExitCode {
    ExitCode::from(err.exit_code() as u8)
}

/// Returns `Ok(None)` when the invocation was fully handled (help/version)
fn parse_args() -> Result<Option<CliArgs>, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = CliArgs {
        config_path: None,
        migrate: false,
        verbose: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    return Err("--config requires a path".to_string());
                }
            }
            "--migrate" => {
                parsed.migrate = true;
            }
            "--verbose" | "-v" => {
                parsed.verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("create-tenant {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            other => {
                return Err(format!("Unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(parsed))
}

/// Logs go to stderr; stdout carries the prompts and the report
fn init_logging(logging: &LoggingConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    match logging.format {
        LogFormat::Json => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            subscriber
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

fn print_help() {
    println!("Tenant Provisioner - create a tenant and its API key");
    println!();
    println!("Usage:");
    println!("  create-tenant [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <path>   Path to a YAML configuration file");
    println!("  --migrate         Create the database and apply the bundled schema first");
    println!("  -v, --verbose     Enable debug logging (on stderr)");
    println!("  -h, --help        Show this help message");
    println!("  -V, --version     Show version");
    println!();
    println!("Environment:");
    println!("  DATABASE_URL      Database connection string, e.g. sqlite://tenants.db");
    println!("  GHL_BASE_URL      Default offered at the GHL base URL prompt");
    println!("  GHL_VERSION       Default offered at the GHL API version prompt");
    println!();
    println!("Example:");
    println!("  DATABASE_URL=sqlite://tenants.db create-tenant --migrate");
}
