//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys take the built-in defaults.

mod backend;
mod execution;
mod models;
mod storage;

pub use backend::FileBackendConfig;
pub use execution::FileExecutionConfig;
pub use models::FileModelsConfig;
pub use storage::{FileDataConfig, FileLoggingConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generative backend endpoint and credentials
    pub backend: FileBackendConfig,
    /// Profile-to-model mapping
    pub models: FileModelsConfig,
    /// Timeouts and history window
    pub execution: FileExecutionConfig,
    /// JSON record store
    pub data: FileDataConfig,
    /// Log file
    pub logging: FileLoggingConfig,
}

/// A problem found in a loaded configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("{field} must name a model")]
    EmptyModel { field: &'static str },

    #[error("backend.base_url is empty")]
    EmptyBaseUrl,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let timeouts = [
            (
                "execution.primary_timeout_seconds",
                self.execution.primary_timeout_seconds,
            ),
            (
                "execution.secondary_floor_seconds",
                self.execution.secondary_floor_seconds,
            ),
            (
                "execution.classifier_timeout_seconds",
                self.execution.classifier_timeout_seconds,
            ),
            (
                "execution.provider_timeout_seconds",
                self.execution.provider_timeout_seconds,
            ),
        ];
        for (field, seconds) in timeouts {
            if seconds == 0 {
                issues.push(ConfigValidationError::ZeroTimeout { field });
            }
        }

        let models = [
            ("models.full", &self.models.full),
            ("models.light", &self.models.light),
            ("models.classifier", &self.models.classifier),
        ];
        for (field, model) in models {
            if model.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyModel { field });
            }
        }

        if self.backend.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        }

        issues
    }
}
