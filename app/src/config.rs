//! Configuration for the todo shell.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Filter used when neither `TODO_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,todo_runtime=warn";

/// Shell configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `tracing` filter directive
    pub log_filter: String,
    /// Print each item's id next to its text
    pub show_ids: bool,
    /// Pretty-print the `json` command's output
    pub json_pretty: bool,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            show_ids: false,
            json_pretty: true,
            shutdown_timeout: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            log_filter: lookup("TODO_LOG")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            show_ids: lookup("TODO_SHOW_IDS")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.show_ids),
            json_pretty: lookup("TODO_JSON_PRETTY")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.json_pretty),
            shutdown_timeout: lookup("TODO_SHUTDOWN_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.shutdown_timeout),
        }
    }

    /// Shutdown timeout as a `Duration`
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
