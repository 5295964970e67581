//! tempcheck - Disposable email checker.
//!
//! CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tempcheck::notify::ConsoleOutput;
use tempcheck::{Config, EmailChecker, Screener};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("tempcheck=debug,info")
    } else {
        EnvFilter::new("tempcheck=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&config).await.unwrap_or_else(|code| code)
}

async fn run(config: &Config) -> Result<ExitCode, ExitCode> {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(ExitCode::FAILURE);
    }

    let emails = match config.load_emails() {
        Ok(e) => e,
        Err(e) => {
            error!("Failed to load addresses: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    if emails.is_empty() {
        error!("No addresses specified. Use positional arguments or -f <file>.");
        return Err(ExitCode::FAILURE);
    }

    let checker = match EmailChecker::new(config.checker_config()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create checker: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let console = ConsoleOutput::new(config.verbose, config.json, config.quiet);
    console.print_info(&format!("Checking against {}", checker.endpoint()));

    let screener = Screener::new(checker, config.screen_config());

    let progress = console.create_spinner(&format!("checking {} address(es)", emails.len()));
    let report = screener.screen_many(emails).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    console.print_summary(&report);

    if let Some(ref output_path) = config.output {
        if let Err(e) = report.write_json(output_path) {
            error!("Failed to write output file: {}", e);
            return Err(ExitCode::FAILURE);
        }
        info!("Results written to: {:?}", output_path);
    }

    Ok(ExitCode::from(report.exit_status(config.strict)))
}
