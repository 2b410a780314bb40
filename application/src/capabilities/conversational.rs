//! Conversational capability: greetings and small talk.

use super::context::HandlerContext;
use super::handler::{CapabilityHandler, GenerativeAttempt, HandlerError, generate, mismatch};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use lattice_domain::fallback::render_greeting;
use lattice_domain::{CapabilityTag, PromptTemplate};
use std::sync::Arc;

pub struct ConversationalHandler {
    gateway: Option<Arc<dyn LlmGateway>>,
}

impl ConversationalHandler {
    pub fn new(gateway: Option<Arc<dyn LlmGateway>>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CapabilityHandler for ConversationalHandler {
    fn tag(&self) -> CapabilityTag {
        CapabilityTag::Conversational
    }

    fn is_generative(&self) -> bool {
        self.gateway.is_some()
    }

    async fn invoke(
        &self,
        context: &HandlerContext,
        attempt: &GenerativeAttempt,
    ) -> Result<String, HandlerError> {
        let HandlerContext::Conversational(ctx) = context else {
            return Err(mismatch(self.tag(), context));
        };

        let prompt = PromptTemplate::conversational(
            &ctx.today.date_naive().to_string(),
            &ctx.query,
            ctx.user_name.as_deref(),
            &ctx.history,
        );
        generate(self.gateway.as_ref(), self.tag(), prompt, attempt).await
    }

    fn fallback(&self, context: &HandlerContext) -> String {
        match context {
            HandlerContext::Conversational(ctx) => render_greeting(ctx.user_name.as_deref()),
            _ => render_greeting(None),
        }
    }
}
