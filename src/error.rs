//! Error types for deadline triage
//!
//! The triage pipeline itself never fails: unreadable dates simply drop a
//! task from the buckets. Errors only come from the edges:
//! - UserFixable: bad config file, malformed task list, bad reference time
//! - Environment: missing files, unreadable paths

use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading configuration and triage inputs
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid reference time: {0}")]
    InvalidReferenceTime(String),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl TriageError {
    /// Returns true if the caller can fix this by correcting their input
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            TriageError::ConfigurationError(_)
                | TriageError::InvalidReferenceTime(_)
                | TriageError::ParseError(_)
        )
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TriageError::ConfigNotFound(_) => {
                "Create ~/.canvas-triage/config.json or pass an explicit config path."
            }
            TriageError::ConfigurationError(_) => {
                "Check your configuration in ~/.canvas-triage/config.json"
            }
            TriageError::InvalidReferenceTime(_) => {
                "Send the reference time as ISO-8601, e.g. 2024-01-01T09:00:00+02:00."
            }
            TriageError::ParseError(_) => "Check the task list is valid JSON.",
            TriageError::IoError(_) => "Check file permissions and the path.",
        }
    }
}

impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::ParseError(err.to_string())
    }
}

/// Serializable error representation for IPC
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageErrorPayload {
    pub message: String,
    pub user_fixable: bool,
    pub recovery_suggestion: String,
}

impl From<&TriageError> for TriageErrorPayload {
    fn from(err: &TriageError) -> Self {
        TriageErrorPayload {
            message: err.to_string(),
            user_fixable: err.is_user_fixable(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}
