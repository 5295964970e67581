//! Output for check results.
//!
//! Colored console lines, a progress spinner, and JSON reports.

pub mod console;

pub use console::ConsoleOutput;
