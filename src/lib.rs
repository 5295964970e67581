//! tempcheck - Disposable email checker.
//!
//! Asks a remote checking service whether email addresses belong to
//! disposable (temporary) providers. Checks fail open: if the service
//! cannot answer, the failure is logged and the address is reported as
//! not disposable.
//!
//! # Example
//!
//! ```no_run
//! use tempcheck::{CheckerConfig, EmailChecker};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CheckerConfig::new("https://checker.example.com", "api-token");
//!     let checker = EmailChecker::new(config).unwrap();
//!     if checker.is_temporary("someone@mailinator.com").await {
//!         println!("disposable address");
//!     }
//! }
//! ```

pub mod checker;
pub mod config;
pub mod notify;
pub mod screener;
pub mod types;

pub use checker::{EmailChecker, FailureLog, TracingLog, VerdictCache};
pub use config::{Config, ScreenConfig};
pub use screener::Screener;
pub use types::{CheckOutcome, CheckReport, CheckerConfig, Result, TempcheckError};
