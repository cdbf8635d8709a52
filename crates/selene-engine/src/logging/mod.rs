//! Logging utilities.
//!
//! This module centralizes logger initialization and the runtime threshold.
//! Everything else logs through the standard `log` facade.

mod init;

pub use init::{init_logging, set_threshold, LoggingConfig};
