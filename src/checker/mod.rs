//! Disposable email checking.
//!
//! Asks the remote checking service whether an address is disposable,
//! logs service failures, and caches verdicts for batch runs.

mod cache;
pub mod client;
pub mod log;

pub use cache::VerdictCache;
pub use client::{endpoint_for, EmailChecker, CHECK_PATH};
pub use self::log::{FailureLog, TracingLog};
