//! Per-capability execution results

use super::invocation::{HandlerInvocation, Tier};
use crate::core::capability::CapabilityTag;
use serde::{Deserialize, Serialize};

/// Why a capability produced no answer of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerErrorKind {
    /// The last attempted tier exceeded its budget
    Timeout,
    /// The backend or handler returned an error
    InvocationFailed,
    /// The deterministic tier broke its never-fail contract
    ContractViolation,
    /// The handler panicked
    Panicked,
    /// The invocation never reported back
    Missing,
}

impl HandlerErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerErrorKind::Timeout => "timeout",
            HandlerErrorKind::InvocationFailed => "invocation_failed",
            HandlerErrorKind::ContractViolation => "contract_violation",
            HandlerErrorKind::Panicked => "panicked",
            HandlerErrorKind::Missing => "missing",
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short apology substituted for a capability that could not answer
pub fn apology_for(tag: CapabilityTag) -> String {
    format!(
        "Sorry, I couldn't put together the {} part of this answer right now. Please try again shortly.",
        tag.label().to_lowercase()
    )
}

/// Outcome of executing one capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerResult {
    pub tag: CapabilityTag,
    /// Answer text, or the apology when `succeeded` is false
    pub text: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HandlerErrorKind>,
    /// Tier that produced `text`, if any did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    /// Every attempt made, in execution order
    #[serde(default)]
    pub attempts: Vec<HandlerInvocation>,
}

impl HandlerResult {
    /// Creates a result answered by the given tier.
    pub fn success(tag: CapabilityTag, text: impl Into<String>, tier: Tier) -> Self {
        Self {
            tag,
            text: text.into(),
            succeeded: true,
            error: None,
            tier: Some(tier),
            attempts: Vec::new(),
        }
    }

    /// Creates a failed result carrying the standard apology text.
    pub fn failure(tag: CapabilityTag, error: HandlerErrorKind) -> Self {
        Self {
            tag,
            text: apology_for(tag),
            succeeded: false,
            error: Some(error),
            tier: None,
            attempts: Vec::new(),
        }
    }

    pub fn with_attempts(mut self, attempts: Vec<HandlerInvocation>) -> Self {
        self.attempts = attempts;
        self
    }

    /// Whether the answer came from a lower tier than the first one tried
    pub fn degraded(&self) -> bool {
        match (self.tier, self.attempts.first()) {
            (Some(tier), Some(first)) => tier > first.tier,
            _ => false,
        }
    }
}
