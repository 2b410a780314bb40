//! Uniform capability interface

use super::context::HandlerContext;
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use async_trait::async_trait;
use lattice_domain::{CapabilityProfile, CapabilityTag};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors raised by a handler's generative path
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{expected} handler received {actual} context")]
    ContextMismatch {
        expected: CapabilityTag,
        actual: CapabilityTag,
    },

    #[error("{0} has no generative path")]
    NotGenerative(CapabilityTag),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Configuration of one generative attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerativeAttempt {
    pub profile: CapabilityProfile,
    pub use_tools: bool,
    pub timeout: Duration,
}

/// A specialist capability
///
/// The executor drives the tiers: [`invoke`](Self::invoke) for the
/// generative ones, [`fallback`](Self::fallback) for the deterministic one.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    fn tag(&self) -> CapabilityTag;

    /// Whether a generative backend is available to this handler
    fn is_generative(&self) -> bool;

    /// Whether the full tier should be given auxiliary tools
    fn wants_tools(&self) -> bool {
        false
    }

    /// Generative path
    async fn invoke(
        &self,
        context: &HandlerContext,
        attempt: &GenerativeAttempt,
    ) -> Result<String, HandlerError>;

    /// Deterministic answer; must not fail
    fn fallback(&self, context: &HandlerContext) -> String;
}

pub(crate) fn mismatch(expected: CapabilityTag, context: &HandlerContext) -> HandlerError {
    HandlerError::ContextMismatch {
        expected,
        actual: context.tag(),
    }
}

/// Send one prompt through the gateway with the attempt's profile and budget
pub(crate) async fn generate(
    gateway: Option<&Arc<dyn LlmGateway>>,
    tag: CapabilityTag,
    prompt: String,
    attempt: &GenerativeAttempt,
) -> Result<String, HandlerError> {
    let gateway = gateway.ok_or(HandlerError::NotGenerative(tag))?;
    debug!(
        "{} prompt: {} chars, profile {}, tools {}",
        tag,
        prompt.len(),
        attempt.profile,
        attempt.use_tools
    );

    let request = GenerationRequest::new(prompt, attempt.profile, attempt.timeout)
        .with_tools(attempt.use_tools);
    let text = gateway.generate(&request).await?;
    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse.into());
    }
    Ok(text)
}
