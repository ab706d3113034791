//! Runtime configuration.
//!
//! Endpoints come from the environment with fixed fallbacks; delays are
//! compiled in and only overridden by tests.

use std::time::Duration;

/// Environment variable naming the remote service address.
pub const RPC_ADDR_ENV: &str = "CODEK7_RPC_ADDR";

/// Environment variable naming the push endpoint base URL.
pub const NOTIFY_ADDR_ENV: &str = "CODEK7_NOTIFY_ADDR";

pub const DEFAULT_RPC_ADDR: &str = "http://localhost:50051";
pub const DEFAULT_NOTIFY_ADDR: &str = "ws://localhost:8080/ws";

/// How long the upload success message stays before returning to the dashboard.
pub const DEFAULT_SUMMARY_DELAY: Duration = Duration::from_secs(2);

/// How long the refresh message stays before returning to the dashboard.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Configuration for the client runtime.
///
/// # Example
///
/// ```
/// use codek7::startup::AppConfig;
/// use std::time::Duration;
///
/// let config = AppConfig::default()
///     .with_rpc_addr("http://10.0.0.5:50051")
///     .with_refresh_delay(Duration::ZERO);
/// assert_eq!(config.rpc_addr, "http://10.0.0.5:50051");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the remote service
    pub rpc_addr: String,
    /// Base URL of the push endpoint; the user id is appended per connection
    pub notify_addr: String,
    pub summary_delay: Duration,
    pub refresh_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_addr: DEFAULT_RPC_ADDR.to_string(),
            notify_addr: DEFAULT_NOTIFY_ADDR.to_string(),
            summary_delay: DEFAULT_SUMMARY_DELAY,
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

impl AppConfig {
    /// Build from the environment. Unset or blank variables use the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(addr) = env_non_empty(RPC_ADDR_ENV) {
            config.rpc_addr = addr;
        }
        if let Some(addr) = env_non_empty(NOTIFY_ADDR_ENV) {
            config.notify_addr = addr;
        }
        config
    }

    pub fn with_rpc_addr(mut self, addr: impl Into<String>) -> Self {
        self.rpc_addr = addr.into();
        self
    }

    pub fn with_notify_addr(mut self, addr: impl Into<String>) -> Self {
        self.notify_addr = addr.into();
        self
    }

    pub fn with_summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = delay;
        self
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
