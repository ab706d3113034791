//! Log file setup.
//!
//! The terminal belongs to the TUI, so tracing output goes to
//! `<data dir>/codek7/codek7.log`. `RUST_LOG` overrides the default filter.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "codek7=info";

/// Path of the log file, if a data directory exists on this platform.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("codek7").join("codek7.log"))
}

fn open_log_file(path: &PathBuf) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// When the log file cannot be opened, events go to a sink instead of
/// stdout. Returns the path that is being written, if any. Calling this
/// twice is harmless; the second subscriber is ignored.
pub fn init_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file = log_file_path().and_then(|path| match open_log_file(&path) {
        Ok(file) => Some((path, file)),
        Err(_) => None,
    });

    match file {
        Some((path, file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .try_init();
            Some(path)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .try_init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("codek7/codek7.log"));
        }
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("codek7.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
