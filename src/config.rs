//! Triage configuration stored in ~/.canvas-triage/config.json
//!
//! Everything the engine needs is passed in explicitly through
//! [`TriageConfig`]; nothing is read from ambient globals after load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TriageError;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageConfig {
    /// Node kinds treated as tactical (compared case-insensitively).
    #[serde(default = "default_tactical_kinds")]
    pub tactical_kinds: Vec<String>,
    /// Keep tasks with no kind tag (the caller pre-filtered them).
    #[serde(default = "default_true")]
    pub include_untagged: bool,
    /// Chat agents that run deadline triage. Other agents never do.
    #[serde(default = "default_deadline_agents")]
    pub deadline_agents: Vec<String>,
}

fn default_tactical_kinds() -> Vec<String> {
    vec!["tactical".to_string()]
}

fn default_deadline_agents() -> Vec<String> {
    vec!["deadline-tracker".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            tactical_kinds: default_tactical_kinds(),
            include_untagged: true,
            deadline_agents: default_deadline_agents(),
        }
    }
}

impl TriageConfig {
    /// True if `kind` is one of the configured tactical kinds.
    pub fn is_tactical_kind(&self, kind: &str) -> bool {
        let kind = kind.trim();
        self.tactical_kinds
            .iter()
            .any(|k| k.eq_ignore_ascii_case(kind))
    }

    /// Validate the config has usable values.
    pub fn validate(&self) -> Result<(), TriageError> {
        if self.tactical_kinds.iter().all(|k| k.trim().is_empty()) {
            return Err(TriageError::ConfigurationError(
                "tacticalKinds must name at least one kind".into(),
            ));
        }
        Ok(())
    }
}

/// Default config location.
pub fn config_path() -> Result<PathBuf, TriageError> {
    let home = dirs::home_dir()
        .ok_or_else(|| TriageError::ConfigurationError("Could not find home directory".into()))?;
    Ok(home.join(".canvas-triage").join("config.json"))
}

/// Load the config from the default location, or defaults if there is none.
pub fn load_config() -> Result<TriageConfig, TriageError> {
    let path = config_path()?;
    if !path.exists() {
        log::info!("No config at {}; using defaults", path.display());
        return Ok(TriageConfig::default());
    }
    load_config_from(&path)
}

/// Load and validate a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<TriageConfig, TriageError> {
    if !path.exists() {
        return Err(TriageError::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: TriageConfig = serde_json::from_str(&content)
        .map_err(|e| TriageError::ConfigurationError(format!("Failed to parse config: {}", e)))?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "deadlineAgents": ["planner"] }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.deadline_agents, vec!["planner"]);
        assert_eq!(config.tactical_kinds, vec!["tactical"]);
        assert!(config.include_untagged);
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(TriageError::ConfigNotFound(_))));
    }

    #[test]
    fn malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(TriageError::ConfigurationError(_))
        ));
    }

    #[test]
    fn empty_tactical_kinds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tacticalKinds": [] }"#).unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn kind_match_ignores_case() {
        let config = TriageConfig::default();
        assert!(config.is_tactical_kind("Tactical"));
        assert!(!config.is_tactical_kind("strategic"));
    }
}
