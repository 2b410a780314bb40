//! OpenAI-compatible chat completions gateway
//!
//! Implements [`LlmGateway`] over `POST {base_url}/v1/chat/completions`.
//! The capability profile of each request picks the model; tool servers are
//! attached only when the request asks for tools.

use crate::config::{FileBackendConfig, FileModelsConfig};
use async_trait::async_trait;
use lattice_application::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use lattice_domain::util::truncate_str;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mcp_servers: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Gateway for any backend speaking the OpenAI chat completions protocol
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    models: FileModelsConfig,
    tool_servers: Vec<String>,
}

impl OpenAiCompatibleGateway {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        models: FileModelsConfig,
        tool_servers: Vec<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH),
            api_key: api_key.into(),
            models,
            tool_servers,
        }
    }

    /// Build from configuration; `None` when no API key is resolvable.
    pub fn from_config(backend: &FileBackendConfig, models: &FileModelsConfig) -> Option<Self> {
        let Some(api_key) = backend.resolve_api_key() else {
            info!(
                "No API key in config or ${}; generative backend disabled",
                backend.api_key_env
            );
            return None;
        };
        Some(Self::new(
            &backend.base_url,
            api_key,
            models.clone(),
            backend.tool_servers.clone(),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let mcp_servers = (request.use_tools && !self.tool_servers.is_empty())
            .then_some(self.tool_servers.as_slice());

        ChatRequest {
            model: self.models.model_for(request.profile),
            messages,
            mcp_servers,
        }
    }
}

/// Pull the first choice's text out of a completions response body
fn extract_content(body: &str) -> Result<String, GatewayError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("unreadable response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GatewayError::EmptyResponse)
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = self.request_body(request);
        debug!(
            "POST {} model={} tools={}",
            self.endpoint,
            body.model,
            body.mcp_servers.is_some()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "backend returned {}: {}",
                status,
                truncate_str(&text, 200)
            )));
        }

        extract_content(&text)
    }
}
