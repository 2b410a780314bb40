//! Credit-advisory capability.
//!
//! Purely deterministic: the answer comes from the static card table, so the
//! executor goes straight to the deterministic tier.

use super::context::HandlerContext;
use super::handler::{CapabilityHandler, GenerativeAttempt, HandlerError};
use async_trait::async_trait;
use lattice_domain::CapabilityTag;
use lattice_domain::fallback::render_card_advice;

pub struct CreditAdvisoryHandler;

#[async_trait]
impl CapabilityHandler for CreditAdvisoryHandler {
    fn tag(&self) -> CapabilityTag {
        CapabilityTag::CreditAdvisory
    }

    fn is_generative(&self) -> bool {
        false
    }

    async fn invoke(
        &self,
        _context: &HandlerContext,
        _attempt: &GenerativeAttempt,
    ) -> Result<String, HandlerError> {
        Err(HandlerError::NotGenerative(self.tag()))
    }

    fn fallback(&self, context: &HandlerContext) -> String {
        render_card_advice(context.query())
    }
}
