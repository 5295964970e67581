//! Colored console output for check results.

use crate::types::{CheckOutcome, CheckReport};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self {
            verbose,
            json_mode,
            quiet,
        }
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if self.json_mode || self.quiet {
            return;
        }

        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print one outcome.
    pub fn print_outcome(&self, outcome: &CheckOutcome) {
        if self.json_mode {
            return;
        }

        match outcome {
            CheckOutcome::Checked {
                email,
                is_temporary: true,
            } => {
                println!("{} {} {}", "[!]".red().bold(), email.bright_white().bold(), "TEMPORARY".red().bold());
            }
            CheckOutcome::Checked { email, .. } => {
                if !self.quiet {
                    println!("{} {} {}", "[+]".green(), email, "ok".green());
                }
            }
            CheckOutcome::ClientError { email, status, body } => {
                println!("{} {} {}", "[?]".yellow(), email, format!("rejected (HTTP {})", status).yellow());
                if self.verbose {
                    println!("    +-- {}", body.dimmed());
                }
            }
            CheckOutcome::Unexpected { email, status, detail } => {
                let reason = match status {
                    Some(code) => format!("service failure (HTTP {})", code),
                    None => "service unreachable".to_string(),
                };
                println!("{} {} {}", "[?]".yellow(), email, reason.yellow());
                if self.verbose {
                    println!("    +-- {}", detail.dimmed());
                }
            }
        }
    }

    /// Print batch summary.
    pub fn print_summary(&self, report: &CheckReport) {
        if self.json_mode {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize results: {}", e),
            }
            return;
        }

        for outcome in &report.results {
            self.print_outcome(outcome);
        }

        if !self.shows_summary_block(report) {
            return;
        }

        println!();
        println!("{}", "=== Check Summary ===".bright_cyan());
        println!("  Checked:   {}", report.results.len());
        println!("  Duration:  {:.2}s", report.duration_secs);
        println!("  Clean:     {}", report.clean_count);

        if report.temporary_count > 0 {
            println!(
                "  {}",
                format!("DISPOSABLE ADDRESSES FOUND: {}", report.temporary_count)
                    .red()
                    .bold()
            );
        } else {
            println!("  {}", "No disposable addresses found.".green());
        }

        if report.failed_count > 0 {
            println!(
                "  {}",
                format!(
                    "Unverified (treated as not disposable): {}",
                    report.failed_count
                )
                .yellow()
            );
        }

        println!();
    }

    /// Whether the text summary block follows the per-address lines.
    ///
    /// JSON mode prints the report instead; quiet mode only summarizes
    /// batches with something worth reporting.
    fn shows_summary_block(&self, report: &CheckReport) -> bool {
        if self.json_mode {
            return false;
        }
        !self.quiet || report.temporary_count > 0 || report.failed_count > 0
    }

    /// Create a spinner shown while a batch runs.
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.json_mode || self.quiet {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}
