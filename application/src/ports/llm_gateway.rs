//! LLM Gateway port
//!
//! Defines the interface for invoking a generative backend.

use async_trait::async_trait;
use lattice_domain::CapabilityProfile;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    #[error("No generative backend configured")]
    NotConfigured,

    #[error("Other error: {0}")]
    Other(String),
}

/// One generative call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub profile: CapabilityProfile,
    /// Whether auxiliary tools (web search servers) may be used
    pub use_tools: bool,
    pub timeout: Duration,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, profile: CapabilityProfile, timeout: Duration) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            profile,
            use_tools: false,
            timeout,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_tools(mut self, use_tools: bool) -> Self {
        self.use_tools = use_tools;
        self
    }
}

/// Gateway for generative calls
///
/// This port defines how the application layer talks to a generative backend.
/// Implementations (adapters) live in the infrastructure layer. Callers
/// enforce their own deadline as well; `request.timeout` lets the adapter
/// abort the transport early.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one prompt and return the final text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
