//! Sales report generator
//!
//! Reads the configured sales source and writes the multi-sheet report
//! workbook plus its chart images.
//!
//! Exit status: 0 on success, 3 when only the summary checkpoint was written,
//! 4 when the source has no records, 1 for any other failure.

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_report_io::ReportGenerator;
use sales_report_shared::{AppConfig, ReportError};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report_error = err.downcast_ref::<ReportError>();
            error!(
                code = report_error.map_or("CONFIG_ERROR", ReportError::error_code),
                stage = ?report_error.and_then(ReportError::stage),
                "{err:#}"
            );
            let status = report_error.map_or(1, ReportError::exit_code);
            ExitCode::from(u8::try_from(status).unwrap_or(1))
        }
    }
}

fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        input = %config.input.path.display(),
        sheet = %config.input.sheet,
        output = %config.output.path.display(),
        locale = %config.report.locale,
        "Configuration loaded"
    );

    let outcome = ReportGenerator::from_config(&config)?.run()?;

    info!(
        path = %outcome.output_path.display(),
        sheets = ?outcome.sheet_names,
        total_value = %outcome.summary.total_value,
        total_quantity = outcome.summary.total_quantity,
        "Report generated"
    );
    Ok(())
}
