//! HTTP client for the disposable email checking service.

use crate::checker::log::{FailureLog, TracingLog};
use crate::types::{CheckOutcome, CheckerConfig, Result, TempcheckError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

/// Path of the check endpoint, relative to the service base URL.
pub const CHECK_PATH: &str = "/api/v1/check";

/// Checking service response body.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    is_temporary: bool,
}

/// Resolve the check endpoint for a service base URL.
///
/// Any number of trailing slashes on `base_url` is tolerated.
pub fn endpoint_for(base_url: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return Err(TempcheckError::ConfigError(
            "checker service URL is empty".to_string(),
        ));
    }
    Ok(Url::parse(&format!("{}{}", base, CHECK_PATH))?)
}

/// Asks the checking service whether addresses are disposable.
///
/// Checks fail open: whenever the service does not give a verdict the
/// failure is logged and the address is treated as not disposable, so an
/// outage never blocks the calling flow.
pub struct EmailChecker {
    client: Client,
    endpoint: Url,
    api_token: String,
    log: Arc<dyn FailureLog>,
}

impl EmailChecker {
    /// Create a new checker.
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let endpoint = endpoint_for(&config.base_url)?;

        if config.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                endpoint.host_str().unwrap_or_default()
            );
        }

        let mut builder = Client::builder()
            .user_agent("tempcheck/0.1")
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .pool_idle_timeout(Duration::from_secs(30));

        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            api_token: config.api_token,
            log: Arc::new(TracingLog),
        })
    }

    /// Replace the failure log.
    pub fn with_log(mut self, log: Arc<dyn FailureLog>) -> Self {
        self.log = log;
        self
    }

    /// The resolved check endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Whether `email` belongs to a disposable provider.
    ///
    /// Returns `false` when the service cannot answer.
    pub async fn is_temporary(&self, email: &str) -> bool {
        self.check(email).await.is_temporary()
    }

    /// Ask the service about `email` and classify its reply.
    pub async fn check(&self, email: &str) -> CheckOutcome {
        trace!("Checking {} against {}", email, self.endpoint);

        let response = match self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(&self.api_token)
            .query(&[("email", email)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return self.unexpected(email, None, e.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.unexpected(email, Some(status), e.to_string()),
        };

        if status.is_success() {
            return match serde_json::from_str::<CheckResponse>(&body) {
                Ok(parsed) => {
                    debug!("{} is_temporary={}", email, parsed.is_temporary);
                    CheckOutcome::Checked {
                        email: email.to_string(),
                        is_temporary: parsed.is_temporary,
                    }
                }
                Err(e) => {
                    debug!("Unreadable verdict for {}: {}", email, e);
                    self.unexpected(email, Some(status), body)
                }
            };
        }

        if status.is_client_error() {
            self.log.error(&format!(
                "Checker service returned a client error. Error: {}",
                body
            ));
            return CheckOutcome::ClientError {
                email: email.to_string(),
                status: status.as_u16(),
                body,
            };
        }

        self.unexpected(email, Some(status), body)
    }

    fn unexpected(&self, email: &str, status: Option<StatusCode>, detail: String) -> CheckOutcome {
        self.log.error(&format!(
            "Checker service returned an unexpected response. Response: {}",
            detail
        ));
        CheckOutcome::Unexpected {
            email: email.to_string(),
            status: status.map(|s| s.as_u16()),
            detail,
        }
    }
}
