//! Execution parameters: time budgets and context limits.
//!
//! [`ExecutionParams`] groups the static parameters that control the tier
//! ladder in [`HandlerExecutor`](crate::use_cases::execute_capability::HandlerExecutor)
//! and the router's generative pass. These are application-layer concerns,
//! not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time budgets and context limits.
///
/// | Budget | Used by |
/// |--------|---------|
/// | `primary_timeout` | Tier 1 (full capability) |
/// | `secondary_timeout()` | Tier 2 (degraded capability) |
/// | `classifier_timeout` | Router generative pass |
/// | `provider_timeout` | Each record-provider call during context assembly |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Budget of the full-capability tier.
    pub primary_timeout: Duration,
    /// Lower bound of the degraded tier's budget.
    pub secondary_floor: Duration,
    /// Budget of the router's generative classification call.
    pub classifier_timeout: Duration,
    /// Budget of one record-provider call; expiry means "no records".
    pub provider_timeout: Duration,
    /// Number of prior messages handed to the conversational capability.
    pub history_limit: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(60),
            secondary_floor: Duration::from_secs(15),
            classifier_timeout: Duration::from_secs(15),
            provider_timeout: Duration::from_secs(10),
            history_limit: 6,
        }
    }
}

impl ExecutionParams {
    /// Degraded-tier budget: half the primary budget, never below the floor
    pub fn secondary_timeout(&self) -> Duration {
        (self.primary_timeout / 2).max(self.secondary_floor)
    }

    // ==================== Builder Methods ====================

    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_secondary_floor(mut self, floor: Duration) -> Self {
        self.secondary_floor = floor;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
