//! Configuration loading.
//!
//! Settings live in `config.json` inside the data directory (`~/.tt` unless
//! `--dir` is given). Every key is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::FormSettings;

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config {0}: agents list must not be empty")]
    NoAgents(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity stamped on tasks created from the form.
    pub created_by: String,
    /// Agents offered by the "Assigned To" selector.
    pub agents: Vec<String>,
    /// Where CSV exports are written. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
    /// Seed file. Defaults to the built-in sample data.
    pub seed: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            created_by: "Mohamed Rifthy".to_string(),
            agents: vec!["Agent A".to_string(), "Agent B".to_string()],
            export_dir: None,
            seed: None,
        }
    }
}

impl Config {
    /// Load config from a JSON file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let buf = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&buf).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        if config.agents.is_empty() {
            return Err(ConfigError::NoAgents(path.display().to_string()));
        }
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            created_by: self.created_by.clone(),
            agents: self.agents.clone(),
        }
    }

    /// Directory CSV exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolve the data directory: an explicit path wins, otherwise `$HOME/.tt`.
/// The directory is created if missing.
pub fn resolve_data_dir(explicit: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tt")
        }
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"created_by": "Dana", "export_dir": "/tmp/exports"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.created_by, "Dana");
        assert_eq!(config.agents, vec!["Agent A", "Agent B"]);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
        assert_eq!(config.form_settings().created_by, "Dana");
    }

    #[test]
    fn test_empty_agent_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"agents": []}"#).unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::NoAgents(_))));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_resolve_data_dir_creates_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("tt");
        let resolved = resolve_data_dir(Some(&target)).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }
}
