//! Runtime tunables for the advisor binary.
//!
//! Every value has a compile-time default and can be overridden through an
//! environment variable. Command-line flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::orchestrator::DEFAULT_DEPTH;

/// Default directory for the rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// File name prefix of the rolling log files.
pub const LOG_FILE_PREFIX: &str = "chess-advisor";

/// Get the engine executable to launch.
///
/// Priority:
/// 1. `CHESS_ADVISOR_ENGINE_PATH` env variable if set
/// 2. `None`, meaning the usual install locations are searched
pub fn get_engine_path() -> Option<PathBuf> {
    std::env::var_os("CHESS_ADVISOR_ENGINE_PATH").map(PathBuf::from)
}

/// Get the default search depth.
///
/// Priority:
/// 1. `CHESS_ADVISOR_DEPTH` env variable if set (falls back to the default if
///    the value cannot be parsed as a `u32`)
/// 2. `15` as fallback
///
/// The value is not range-checked here; the advisor rejects bad depths.
pub fn get_default_depth() -> u32 {
    if let Ok(depth) = std::env::var("CHESS_ADVISOR_DEPTH") {
        return depth.trim().parse().unwrap_or(DEFAULT_DEPTH);
    }

    DEFAULT_DEPTH
}

/// Get the log directory.
///
/// Priority:
/// 1. `CHESS_ADVISOR_LOG_DIR` env variable if set
/// 2. `./logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHESS_ADVISOR_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Create the log directory if it is missing.
pub fn prepare_log_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: these assume the variables are not set in the test environment.
    // If they are, the overrides are returned (which is correct behavior).

    #[test]
    fn test_default_depth_in_range() {
        if std::env::var_os("CHESS_ADVISOR_DEPTH").is_none() {
            assert_eq!(get_default_depth(), DEFAULT_DEPTH);
        }
    }

    #[test]
    fn test_prepare_log_dir_reports_failure() {
        let base = std::env::temp_dir().join(format!("chess-advisor-logs-{}", std::process::id()));
        prepare_log_dir(&base.join("nested")).unwrap();
        assert!(base.join("nested").is_dir());

        // A regular file where a directory is needed
        let blocker = base.join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = prepare_log_dir(&blocker.join("logs")).unwrap_err();
        assert!(err.to_string().contains("Failed to create log directory"));

        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
