//! Core types and errors for the disposable email checker.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while setting up or driving checks.
///
/// Individual checks never return these; they are absorbed into a
/// [`CheckOutcome`] instead.
#[derive(Error, Debug)]
pub enum TempcheckError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TempcheckError>;

/// Result of asking the checking service about one address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The service answered with a verdict.
    Checked { email: String, is_temporary: bool },
    /// The service rejected the request (4xx).
    ClientError {
        email: String,
        status: u16,
        body: String,
    },
    /// Anything else: 5xx, transport failure, unreadable success body.
    Unexpected {
        email: String,
        status: Option<u16>,
        detail: String,
    },
}

impl CheckOutcome {
    /// The address this outcome belongs to.
    pub fn email(&self) -> &str {
        match self {
            CheckOutcome::Checked { email, .. }
            | CheckOutcome::ClientError { email, .. }
            | CheckOutcome::Unexpected { email, .. } => email,
        }
    }

    /// Boolean verdict. Failures fail open and report `false`.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            CheckOutcome::Checked {
                is_temporary: true,
                ..
            }
        )
    }

    /// Whether the service could not produce a verdict.
    pub fn is_failure(&self) -> bool {
        !matches!(self, CheckOutcome::Checked { .. })
    }
}

/// Summary of a batch of checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Outcomes in input order.
    pub results: Vec<CheckOutcome>,
    /// Addresses reported as disposable.
    pub temporary_count: usize,
    /// Addresses reported as not disposable.
    pub clean_count: usize,
    /// Addresses the service could not classify.
    pub failed_count: usize,
    /// Batch duration in seconds.
    pub duration_secs: f64,
}

impl CheckReport {
    /// Build a report, deriving the counts from the outcomes.
    pub fn from_results(results: Vec<CheckOutcome>, duration_secs: f64) -> Self {
        let temporary_count = results.iter().filter(|r| r.is_temporary()).count();
        let failed_count = results.iter().filter(|r| r.is_failure()).count();
        let clean_count = results.len() - temporary_count - failed_count;

        Self {
            results,
            temporary_count,
            clean_count,
            failed_count,
            duration_secs,
        }
    }

    /// Process exit status: 2 in strict mode when a disposable address was found.
    pub fn exit_status(&self, strict: bool) -> u8 {
        if strict && self.temporary_count > 0 {
            2
        } else {
            0
        }
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Configuration for the checking service client.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Base URL of the checking service.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_token: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Request timeout; `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl CheckerConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            accept_invalid_certs: false,
            timeout_secs: None,
        }
    }
}
