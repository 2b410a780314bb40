//! Group-coordination capability: splits, settle-ups and shared purchases.

use super::context::HandlerContext;
use super::handler::{CapabilityHandler, GenerativeAttempt, HandlerError, generate, mismatch};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use lattice_domain::fallback::render_split_plan;
use lattice_domain::{
    CapabilityTag, PromptTemplate, SplitEstimate, extract_amount, resolve_participants,
};
use std::sync::Arc;

pub struct GroupCoordinationHandler {
    gateway: Option<Arc<dyn LlmGateway>>,
}

impl GroupCoordinationHandler {
    pub fn new(gateway: Option<Arc<dyn LlmGateway>>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CapabilityHandler for GroupCoordinationHandler {
    fn tag(&self) -> CapabilityTag {
        CapabilityTag::GroupCoordination
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
        let HandlerContext::GroupCoordination(ctx) = context else {
            return Err(mismatch(self.tag(), context));
        };

        // Precompute the arithmetic so the model only has to phrase it
        let participants = resolve_participants(ctx.roster.len(), ctx.chat.participant_count);
        let split = extract_amount(&ctx.query)
            .zip(participants)
            .and_then(|(amount, n)| SplitEstimate::compute(amount, n));

        let prompt = PromptTemplate::group_coordination(
            &ctx.today.date_naive().to_string(),
            &ctx.query,
            &ctx.chat,
            &ctx.roster,
            participants,
            split.as_ref(),
        );
        generate(self.gateway.as_ref(), self.tag(), prompt, attempt).await
    }

    fn fallback(&self, context: &HandlerContext) -> String {
        match context {
            HandlerContext::GroupCoordination(ctx) => {
                render_split_plan(&ctx.query, &ctx.roster, ctx.chat.participant_count)
            }
            other => render_split_plan(other.query(), &[], None),
        }
    }
}
