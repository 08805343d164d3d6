use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use buckle_util::errors::BuckleError;

/// Global user configuration loaded from `~/.buckle/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Resolver settings from `[resolver]` in global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Upper bound on fetches in flight for one project's dependencies.
    #[serde(default = "default_fetch_concurrency", rename = "fetch-concurrency")]
    pub fetch_concurrency: usize,
    /// Keep a record of edges skipped because their target was already visited.
    #[serde(default = "default_record_skipped", rename = "record-skipped")]
    pub record_skipped: bool,
}

impl ResolverConfig {
    /// Concurrency clamped to at least one fetch at a time.
    pub fn effective_concurrency(&self) -> usize {
        self.fetch_concurrency.max(1)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: default_fetch_concurrency(),
            record_skipped: default_record_skipped(),
        }
    }
}

fn default_fetch_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_record_skipped() -> bool {
    true
}

impl GlobalConfig {
    /// Load the global configuration from `~/.buckle/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        let path = Self::default_path();
        if path.is_file() {
            Self::from_path(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and parse a config file from an explicit path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuckleError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| {
            BuckleError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the Buckle data directory (`~/.buckle/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".buckle")
}
