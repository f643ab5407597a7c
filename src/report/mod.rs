//! Result Reporting: Log entry rendering and the append-only result log
//!
//! # Components
//! - `entry.rs`: SessionReport snapshot and its key-value text rendering
//! - `log.rs`: Best-effort append of finished sessions to a text file

pub mod entry;
pub mod log;

pub use entry::SessionReport;
pub use log::{LogError, ResultLog, DEFAULT_LOG_FILE};
