//! Batch screening of many addresses.

use crate::checker::{EmailChecker, VerdictCache};
use crate::config::ScreenConfig;
use crate::types::{CheckOutcome, CheckReport};
use futures::stream::{self, StreamExt};
use governor::{Quota, RateLimiter};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Runs checks for many addresses with bounded parallelism.
pub struct Screener {
    checker: Arc<EmailChecker>,
    cache: VerdictCache,
    rate_limiter: Arc<DirectLimiter>,
    parallel: usize,
}

impl Screener {
    /// Create a new screener around a checker.
    pub fn new(checker: EmailChecker, config: ScreenConfig) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(config.rate_limit).unwrap_or(NonZeroU32::MIN));

        Self {
            checker: Arc::new(checker),
            cache: VerdictCache::new(config.cache_ttl_secs),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            parallel: config.parallel.max(1),
        }
    }

    /// Check one address, answering from the cache when possible.
    pub async fn screen(&self, email: &str) -> CheckOutcome {
        if let Some(is_temporary) = self.cache.get(email) {
            trace!("Cache hit for {}", email);
            return CheckOutcome::Checked {
                email: email.to_string(),
                is_temporary,
            };
        }

        self.rate_limiter.until_ready().await;

        let outcome = self.checker.check(email).await;

        // Failures stay uncached so a recovering service is asked again.
        if let CheckOutcome::Checked { is_temporary, .. } = outcome {
            self.cache.set(email, is_temporary);
        }

        outcome
    }

    /// Check every address and summarize. Results keep input order.
    ///
    /// Each distinct address is sent to the service at most once per batch;
    /// repeats share the first occurrence's outcome.
    pub async fn screen_many(&self, emails: Vec<String>) -> CheckReport {
        let start = Instant::now();

        let mut seen = HashSet::new();
        let distinct: Vec<&str> = emails
            .iter()
            .map(String::as_str)
            .filter(|email| seen.insert(*email))
            .collect();
        debug!(
            "Screening {} addresses ({} distinct, {} in parallel)",
            emails.len(),
            distinct.len(),
            self.parallel
        );

        let outcomes: HashMap<&str, CheckOutcome> = stream::iter(distinct)
            .map(|email| async move { (email, self.screen(email).await) })
            .buffer_unordered(self.parallel)
            .collect()
            .await;

        let results = emails
            .iter()
            .filter_map(|email| outcomes.get(email.as_str()).cloned())
            .collect();

        CheckReport::from_results(results, start.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CHECK_PATH;
    use crate::types::CheckerConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verdict(is_temporary: bool) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "is_temporary": is_temporary }))
    }

    fn make_screener(base_url: &str, cache_ttl_secs: u64) -> Screener {
        let checker = EmailChecker::new(CheckerConfig::new(base_url, "token")).unwrap();
        Screener::new(
            checker,
            ScreenConfig {
                parallel: 3,
                rate_limit: 100,
                cache_ttl_secs,
            },
        )
    }

    #[tokio::test]
    async fn test_screen_many_keeps_order_and_counts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .and(query_param("email", "a@mailinator.com"))
            .respond_with(verdict(true))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .and(query_param("email", "b@example.com"))
            .respond_with(verdict(false))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .and(query_param("email", "c@example.com"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let screener = make_screener(&server.uri(), 60);
        let emails = vec![
            "a@mailinator.com".to_string(),
            "b@example.com".to_string(),
            "c@example.com".to_string(),
        ];

        let report = screener.screen_many(emails.clone()).await;

        let order: Vec<&str> = report.results.iter().map(|r| r.email()).collect();
        assert_eq!(order, emails);
        assert_eq!(report.temporary_count, 1);
        assert_eq!(report.clean_count, 1);
        assert_eq!(report.failed_count, 1);
    }

    #[tokio::test]
    async fn test_repeated_address_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .respond_with(verdict(true))
            .expect(1)
            .mount(&server)
            .await;

        let screener = make_screener(&server.uri(), 60);

        assert!(screener.screen("a@mailinator.com").await.is_temporary());
        assert!(screener.screen("a@mailinator.com").await.is_temporary());
    }

    #[tokio::test]
    async fn test_duplicates_in_batch_checked_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .and(query_param("email", "a@mailinator.com"))
            .respond_with(verdict(true).set_delay(std::time::Duration::from_millis(50)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .and(query_param("email", "b@example.com"))
            .respond_with(verdict(false))
            .expect(1)
            .mount(&server)
            .await;

        let screener = make_screener(&server.uri(), 60);
        let emails = vec![
            "a@mailinator.com".to_string(),
            "b@example.com".to_string(),
            "a@mailinator.com".to_string(),
            "a@mailinator.com".to_string(),
        ];

        let report = screener.screen_many(emails.clone()).await;

        let order: Vec<&str> = report.results.iter().map(|r| r.email()).collect();
        assert_eq!(order, emails);
        assert_eq!(report.temporary_count, 3);
        assert_eq!(report.clean_count, 1);
    }

    #[tokio::test]
    async fn test_duplicate_failures_checked_once_per_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        // Dedup does not depend on the cache.
        let screener = make_screener(&server.uri(), 0);
        let report = screener
            .screen_many(vec!["a@mailinator.com".to_string(); 3])
            .await;

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.failed_count, 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHECK_PATH))
            .respond_with(ResponseTemplate::new(502))
            .expect(2)
            .mount(&server)
            .await;

        let screener = make_screener(&server.uri(), 60);

        assert!(screener.screen("a@mailinator.com").await.is_failure());
        assert!(screener.screen("a@mailinator.com").await.is_failure());
    }
}
