//! Configuration handling for the checker CLI.

use crate::types::{CheckerConfig, Result, TempcheckError};
use clap::Parser;
use std::path::PathBuf;

/// Check email addresses against a disposable email checking service.
#[derive(Parser, Debug, Clone)]
#[command(name = "tempcheck")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Email address(es) to check
    #[arg(required_unless_present = "file")]
    pub emails: Vec<String>,

    /// Checking service base URL
    #[arg(long, env = "TEMPCHECK_URL")]
    pub url: String,

    /// API token for the checking service
    #[arg(long, env = "TEMPCHECK_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Skip TLS certificate verification (unsafe)
    #[arg(long, env = "TEMPCHECK_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds (defaults to the HTTP client's)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// File containing addresses to check (one per line)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of addresses to check in parallel
    #[arg(long, short = 'p', default_value = "4")]
    pub parallel: usize,

    /// Rate limit (requests per second)
    #[arg(long, default_value = "10")]
    pub rate_limit: u32,

    /// Seconds to remember a verdict within a run (0 disables)
    #[arg(long, default_value = "3600")]
    pub cache_ttl: u64,

    /// Quiet mode: only show disposable addresses and failures
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Exit with status 2 if any disposable address is found
    #[arg(long)]
    pub strict: bool,
}

/// Settings for batch screening.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub parallel: usize,
    pub rate_limit: u32,
    pub cache_ttl_secs: u64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            parallel: 4,
            rate_limit: 10,
            cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Service client configuration.
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            base_url: self.url.clone(),
            api_token: self.api_token.clone(),
            accept_invalid_certs: self.insecure,
            timeout_secs: self.timeout,
        }
    }

    /// Batch screening configuration.
    pub fn screen_config(&self) -> ScreenConfig {
        ScreenConfig {
            parallel: self.parallel.max(1),
            rate_limit: self.rate_limit,
            cache_ttl_secs: self.cache_ttl,
        }
    }

    /// Collect addresses from arguments and the input file, if any.
    pub fn load_emails(&self) -> Result<Vec<String>> {
        let mut emails: Vec<String> = self
            .emails
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if let Some(ref file_path) = self.file {
            let content = std::fs::read_to_string(file_path)?;
            for line in content.lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    emails.push(trimmed.to_string());
                }
            }
        }

        Ok(emails)
    }

    /// Reject settings the service client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(TempcheckError::ConfigError(
                "service URL is empty; set TEMPCHECK_URL or --url".to_string(),
            ));
        }
        if self.api_token.trim().is_empty() {
            return Err(TempcheckError::ConfigError(
                "API token is empty; set TEMPCHECK_API_TOKEN or --api-token".to_string(),
            ));
        }
        Ok(())
    }
}
