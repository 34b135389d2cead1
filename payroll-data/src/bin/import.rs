use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use payroll_core::{
    backend::{BackendConfig, BackendRegistry},
    bulk::Severity,
    models::{Role, Session},
};
use payroll_data::{ImportError, ImportOptions, import_csv, prepare};
use payroll_http::HttpBackendFactory;
use tracing_subscriber::EnvFilter;

/// Validate a payroll CSV upload and submit it to the HR backend in one
/// batch.
///
/// The file must use the upload template columns:
/// employee_id, admin_id, hourly_rate, pay_period, basic_hours,
/// overtime_hours, deductions
#[derive(Parser, Debug)]
#[command(name = "payroll-import")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file to import
    #[arg(short, long)]
    file: PathBuf,

    /// Root URL of the HR backend API
    #[arg(short, long, default_value = "http://localhost/hrms/api")]
    base_url: String,

    /// Id of the admin performing the import
    #[arg(short, long)]
    admin_id: i64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Submit the valid rows even if some rows are rejected
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,

    /// Parse and validate only; nothing is sent
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn print_rejections(errors: &[payroll_core::validation::RowError]) {
    for error in errors {
        eprintln!("  {error}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let options = ImportOptions {
        skip_invalid: args.skip_invalid,
    };

    if args.dry_run {
        let batch = match prepare(&text, options) {
            Ok(batch) => batch,
            Err(ImportError::InvalidRows(errors)) => {
                eprintln!("{} row(s) failed validation:", errors.len());
                print_rejections(&errors);
                bail!("validation failed for {}", args.file.display());
            }
            Err(other) => return Err(other).context("Failed to prepare import"),
        };
        print_rejections(&batch.errors);
        println!("{} row(s) ready to submit.", batch.accepted.len());
        return Ok(());
    }

    let mut registry = BackendRegistry::new();
    registry.register(Box::new(HttpBackendFactory));

    let config = BackendConfig {
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout_secs,
        ..BackendConfig::default()
    };
    let backend = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to connect to backend: {}", args.base_url))?;

    let session = Session {
        id: args.admin_id,
        full_name: String::new(),
        email: String::new(),
        role: Role::Admin,
    };

    println!("Importing payroll records from: {}", args.file.display());

    let report = match import_csv(backend.as_ref(), &session, &text, options).await {
        Ok(report) => report,
        Err(ImportError::InvalidRows(errors)) => {
            eprintln!("{} row(s) failed validation:", errors.len());
            print_rejections(&errors);
            bail!("nothing was submitted; fix the rows above or pass --skip-invalid");
        }
        Err(other) => return Err(other).context("Failed to import payroll records"),
    };

    print_rejections(&report.batch.errors);
    println!("{}", report.summary);

    if report.summary.severity == Severity::Failure {
        bail!("bulk payroll upload failed");
    }
    Ok(())
}
