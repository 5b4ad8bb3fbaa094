use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub offload: OffloadConfig,
}

/// Target filesystem configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base directory for offloaded artifacts. When unset, artifact paths
    /// are relative and driver metadata reports the "null" sentinel.
    #[serde(default = "default_base_path")]
    pub base_path: Option<PathBuf>,
    /// Extra resource profile files merged into the filesystem setup
    #[serde(default)]
    pub profiles: Vec<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            profiles: Vec::new(),
        }
    }
}

fn default_base_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/coldstore"))
}

/// Worker pool sizing for the offload engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OffloadConfig {
    /// Lanes in the orchestration pool (one job per ledger id at a time)
    #[serde(default = "default_orchestration_workers")]
    pub orchestration_workers: usize,
    /// Lanes in the append-assignment pool
    #[serde(default = "default_append_workers")]
    pub append_workers: usize,
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            orchestration_workers: default_orchestration_workers(),
            append_workers: default_append_workers(),
        }
    }
}

fn default_orchestration_workers() -> usize {
    2
}

fn default_append_workers() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.storage.base_path,
            Some(PathBuf::from("data/coldstore"))
        );
        assert!(config.storage.profiles.is_empty());
        assert_eq!(config.offload.orchestration_workers, 2);
        assert_eq!(config.offload.append_workers, 4);
    }
}
