//! Model configuration from TOML (`[models]` section)
//!
//! Maps each capability profile to a concrete model id.

use lattice_domain::CapabilityProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Full-capability tier
    pub full: String,
    /// Degraded tier
    pub light: String,
    /// Router classification
    pub classifier: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            full: "openai/gpt-5".to_string(),
            light: "openai/gpt-4.1-mini".to_string(),
            classifier: "openai/gpt-4.1-mini".to_string(),
        }
    }
}

impl FileModelsConfig {
    pub fn model_for(&self, profile: CapabilityProfile) -> &str {
        match profile {
            CapabilityProfile::Full => &self.full,
            CapabilityProfile::Light => &self.light,
            CapabilityProfile::Classifier => &self.classifier,
        }
    }
}
