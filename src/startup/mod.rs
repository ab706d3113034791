//! Process startup: configuration and logging.
//!
//! - [`config`] - endpoints and delays, from the environment
//! - [`logging`] - tracing subscriber writing to a log file

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::{init_logging, log_file_path};
