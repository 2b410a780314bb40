//! Personal-finance capability: buy / wait / avoid advice for one user.

use super::context::HandlerContext;
use super::handler::{CapabilityHandler, GenerativeAttempt, HandlerError, generate, mismatch};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use lattice_domain::fallback::render_purchase_advice;
use lattice_domain::{CapabilityTag, PromptTemplate, SpendingSummary};
use std::sync::Arc;

pub struct PersonalFinanceHandler {
    gateway: Option<Arc<dyn LlmGateway>>,
}

impl PersonalFinanceHandler {
    pub fn new(gateway: Option<Arc<dyn LlmGateway>>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CapabilityHandler for PersonalFinanceHandler {
    fn tag(&self) -> CapabilityTag {
        CapabilityTag::PersonalFinance
    }

    fn is_generative(&self) -> bool {
        self.gateway.is_some()
    }

    fn wants_tools(&self) -> bool {
        true
    }

    async fn invoke(
        &self,
        context: &HandlerContext,
        attempt: &GenerativeAttempt,
    ) -> Result<String, HandlerError> {
        let HandlerContext::PersonalFinance(ctx) = context else {
            return Err(mismatch(self.tag(), context));
        };

        let summary = SpendingSummary::compute(&ctx.records, ctx.today);
        let prompt = PromptTemplate::personal_finance(
            &ctx.today.date_naive().to_string(),
            &ctx.query,
            &summary,
            &ctx.records,
        );
        generate(self.gateway.as_ref(), self.tag(), prompt, attempt).await
    }

    fn fallback(&self, context: &HandlerContext) -> String {
        match context {
            HandlerContext::PersonalFinance(ctx) => {
                render_purchase_advice(&ctx.records, ctx.today, &ctx.query)
            }
            other => render_purchase_advice(&[], other.today(), other.query()),
        }
    }
}
