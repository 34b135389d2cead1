use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use payroll_cli::{app, commands, config::AppConfig, logging};
use payroll_core::models::{PayPeriod, PayrollForm};
use payroll_data::ImportOptions;
use rust_decimal::Decimal;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Payroll tool for the HR backend.
///
/// Validates and imports payroll uploads, submits single payroll records,
/// and renders payslips with EPF/ETF deductions.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: $PAYROLL_CONFIG, then ./payroll.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend to use (`http` or `memory`). Overrides the config file.
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Root URL of the HR backend API. Overrides the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show EPF, ETF and net salary for a gross amount.
    Calc {
        gross: Decimal,
    },

    /// Check a CSV upload without submitting it.
    Validate {
        file: PathBuf,
    },

    /// Validate a CSV upload and submit it as one batch.
    Import {
        file: PathBuf,

        /// Submit the valid rows even if others are rejected.
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Submit a single payroll record.
    Submit {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        pay_period: String,
        #[arg(long)]
        basic_hours: String,
        #[arg(long, default_value = "")]
        overtime_hours: String,
        /// Leave empty to use the employee's stored rate.
        #[arg(long, default_value = "")]
        hourly_rate: String,
        #[arg(long, default_value = "")]
        deductions: String,
    },

    /// Write the blank upload template, one row per employee.
    Template {
        /// Output file (default: ./payroll_template.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a payslip.
    Payslip {
        pay_period: PayPeriod,

        /// Defaults to the signed-in employee.
        #[arg(long)]
        employee_id: Option<i64>,

        /// Also save the payslip as CSV in this directory.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_path) = AppConfig::load(cli.config.as_deref())?;
    if let Some(kind) = cli.backend {
        config.backend.kind = kind;
    }
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }

    logging::init_logging(&config.logging)?;
    if cli.verbose {
        logging::set_log_level("debug")?;
    }
    debug!(config = ?config_path, backend = %config.backend.kind, "configuration loaded");

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Calc { gross } => commands::calc::run(gross, &mut out),
        Command::Validate { file } => commands::validate::run(&file, &mut out),
        Command::Import { file, skip_invalid } => {
            let session = config.session("bulk payroll import")?;
            let backend = app::connect(&config.backend).await?;
            commands::import::run(
                backend.as_ref(),
                session,
                &file,
                ImportOptions { skip_invalid },
                &mut out,
            )
            .await
        }
        Command::Submit {
            employee_id,
            pay_period,
            basic_hours,
            overtime_hours,
            hourly_rate,
            deductions,
        } => {
            let session = config.session("payroll submission")?;
            let backend = app::connect(&config.backend).await?;
            let form = PayrollForm {
                employee_id,
                pay_period,
                basic_hours,
                overtime_hours,
                hourly_rate,
                deductions,
            };
            commands::submit::run(backend.as_ref(), session, &form, &mut out).await
        }
        Command::Template { output } => {
            let session = config.session("template download")?;
            let backend = app::connect(&config.backend).await?;
            commands::template::run(backend.as_ref(), session, output.as_deref(), &mut out)
                .await
                .map(drop)
        }
        Command::Payslip {
            pay_period,
            employee_id,
            export,
        } => {
            let session = config.session("payslip view")?;
            let backend = app::connect(&config.backend).await?;
            commands::payslip::run(
                backend.as_ref(),
                session,
                employee_id,
                pay_period,
                export.as_deref(),
                &mut out,
            )
            .await
            .map(drop)
        }
    }
}
