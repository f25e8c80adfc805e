//! Demo configuration
//!
//! Loaded from `.modux-counter.toml` in the current directory, then from the
//! home directory, falling back to defaults.

use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::PathBuf};

const CONFIG_FILE: &str = ".modux-counter.toml";

/// Configuration for the counter demo
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CounterConfig {
    /// Count the counter module starts from
    #[serde(default)]
    pub initial_count: i64,

    /// Increments dispatched in order
    #[serde(default = "default_steps")]
    pub steps: Vec<i64>,

    /// Crossing this count records an audit entry
    #[serde(default = "default_audit_threshold")]
    pub audit_threshold: i64,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_steps() -> Vec<i64> {
    vec![5, 3]
}

fn default_audit_threshold() -> i64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial_count: 0,
            steps: default_steps(),
            audit_threshold: default_audit_threshold(),
            log_level: default_log_level(),
        }
    }
}

/// Problem met while looking for a config file
///
/// Collected during [`CounterConfig::load`], which runs before the logger is
/// up, and logged by the caller once it is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigIssue {
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse {}, using defaults: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigIssue {
    pub fn log(&self) {
        match self {
            Self::Unreadable { .. } => log::debug!("{}", self),
            Self::Invalid { .. } => log::warn!("{}", self),
        }
    }
}

impl CounterConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> (Self, Vec<ConfigIssue>) {
        Self::load_from(&config_candidates())
    }

    /// First readable file among `candidates` wins
    ///
    /// Missing files are skipped silently. A file that fails to parse yields
    /// the defaults rather than falling through to the next candidate.
    pub fn load_from(candidates: &[PathBuf]) -> (Self, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        for path in candidates {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => {
                    issues.push(ConfigIssue::Unreadable {
                        path: path.clone(),
                        source,
                    });
                    continue;
                }
            };

            return match toml::from_str(&content) {
                Ok(config) => (config, issues),
                Err(source) => {
                    issues.push(ConfigIssue::Invalid {
                        path: path.clone(),
                        source,
                    });
                    (Self::default(), issues)
                }
            };
        }

        (Self::default(), issues)
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(CONFIG_FILE));
    }
    candidates
}
