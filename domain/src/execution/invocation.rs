//! Handler invocation state machine
//!
//! Each capability is executed through a ladder of at most three tiers.
//! Every attempt is recorded as a [`HandlerInvocation`] whose status moves
//! from `Pending` to exactly one terminal state.
//!
//! ```text
//!  Tier 1 (Full) ──timeout/error──▶ Tier 2 (Degraded) ──timeout/error──▶ Tier 3 (Deterministic)
//!       │                                │                                     │
//!    success                          success                           never fails
//! ```

use crate::core::capability::{CapabilityProfile, CapabilityTag};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One attempt configuration in a handler's degradation ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Generative path, full model profile, auxiliary tools allowed
    Full,
    /// Generative path, light model profile, no tools, reduced budget
    Degraded,
    /// Pure computation over local data; never suspends, never fails
    Deterministic,
}

impl Tier {
    /// 1-based position in the ladder
    pub fn number(&self) -> u8 {
        match self {
            Tier::Full => 1,
            Tier::Degraded => 2,
            Tier::Deterministic => 3,
        }
    }

    /// The tier entered after this one terminates non-successfully
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Full => Some(Tier::Degraded),
            Tier::Degraded => Some(Tier::Deterministic),
            Tier::Deterministic => None,
        }
    }

    /// Whether this tier calls the generative backend
    pub fn is_generative(&self) -> bool {
        !matches!(self, Tier::Deterministic)
    }

    /// Model profile requested from the backend, if generative
    pub fn profile(&self) -> Option<CapabilityProfile> {
        match self {
            Tier::Full => Some(CapabilityProfile::Full),
            Tier::Degraded => Some(CapabilityProfile::Light),
            Tier::Deterministic => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

/// Status of one invocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStatus {
    Pending,
    Success,
    Failed,
    TimedOut,
}

impl InvocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationStatus::Pending => "pending",
            InvocationStatus::Success => "success",
            InvocationStatus::Failed => "failed",
            InvocationStatus::TimedOut => "timed_out",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvocationStatus::Pending)
    }
}

/// A single attempt of one capability at one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerInvocation {
    pub tag: CapabilityTag,
    pub tier: Tier,
    /// Wall-clock budget for this attempt; `None` for the deterministic tier
    pub budget: Option<Duration>,
    status: InvocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl HandlerInvocation {
    /// Start a new attempt in the `Pending` state
    pub fn pending(tag: CapabilityTag, tier: Tier, budget: Option<Duration>) -> Self {
        Self {
            tag,
            tier,
            budget,
            status: InvocationStatus::Pending,
            detail: None,
        }
    }

    pub fn status(&self) -> InvocationStatus {
        self.status
    }

    /// Failure or timeout description, if any
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn succeed(&mut self) -> Result<(), DomainError> {
        self.terminate(InvocationStatus::Success, None)
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.terminate(InvocationStatus::Failed, Some(reason.into()))
    }

    pub fn time_out(&mut self) -> Result<(), DomainError> {
        let detail = self
            .budget
            .map(|b| format!("exceeded {}ms budget", b.as_millis()));
        self.terminate(InvocationStatus::TimedOut, detail)
    }

    fn terminate(
        &mut self,
        status: InvocationStatus,
        detail: Option<String>,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidTransition(
                self.status.as_str().to_string(),
            ));
        }
        self.status = status;
        self.detail = detail;
        Ok(())
    }
}
