//! Execution budgets from TOML (`[execution]` section)

use lattice_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Budget of the full-capability tier
    pub primary_timeout_seconds: u64,
    /// Lower bound of the degraded tier's budget
    pub secondary_floor_seconds: u64,
    /// Budget of the router's generative pass
    pub classifier_timeout_seconds: u64,
    /// Budget of each record-provider call
    pub provider_timeout_seconds: u64,
    /// Prior messages given to the conversational capability
    pub history_limit: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            primary_timeout_seconds: 60,
            secondary_floor_seconds: 15,
            classifier_timeout_seconds: 15,
            provider_timeout_seconds: 10,
            history_limit: 6,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_primary_timeout(Duration::from_secs(self.primary_timeout_seconds))
            .with_secondary_floor(Duration::from_secs(self.secondary_floor_seconds))
            .with_classifier_timeout(Duration::from_secs(self.classifier_timeout_seconds))
            .with_provider_timeout(Duration::from_secs(self.provider_timeout_seconds))
            .with_history_limit(self.history_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        assert_eq!(FileExecutionConfig::default().to_params(), ExecutionParams::default());
    }

    #[test]
    fn test_custom_budget() {
        let config = FileExecutionConfig {
            primary_timeout_seconds: 20,
            ..Default::default()
        };
        let params = config.to_params();
        assert_eq!(params.primary_timeout, Duration::from_secs(20));
        assert_eq!(params.secondary_timeout(), Duration::from_secs(15));
        assert_eq!(params.provider_timeout, Duration::from_secs(10));
    }
}
