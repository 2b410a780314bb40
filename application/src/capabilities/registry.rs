//! Capability Registry
//!
//! Static, read-only mapping from a [`CapabilityTag`] to its handler. Built
//! once at startup and shared by every concurrent invocation.

use super::conversational::ConversationalHandler;
use super::credit_advisory::CreditAdvisoryHandler;
use super::group_coordination::GroupCoordinationHandler;
use super::handler::CapabilityHandler;
use super::personal_finance::PersonalFinanceHandler;
use crate::ports::llm_gateway::LlmGateway;
use lattice_domain::CapabilityTag;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    handlers: HashMap<CapabilityTag, Arc<dyn CapabilityHandler>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All four capabilities, sharing one optional generative backend
    pub fn standard(gateway: Option<Arc<dyn LlmGateway>>) -> Self {
        Self::new()
            .register(PersonalFinanceHandler::new(gateway.clone()))
            .register(CreditAdvisoryHandler)
            .register(GroupCoordinationHandler::new(gateway.clone()))
            .register(ConversationalHandler::new(gateway))
    }

    /// Register a handler under its own tag, replacing any previous one
    pub fn register(mut self, handler: impl CapabilityHandler + 'static) -> Self {
        self.handlers.insert(handler.tag(), Arc::new(handler));
        self
    }

    pub fn get(&self, tag: CapabilityTag) -> Option<Arc<dyn CapabilityHandler>> {
        self.handlers.get(&tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().copied().collect();
        tags.sort();
        f.debug_struct("CapabilityRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::context::{
        ConversationalContext, CreditAdvisoryContext, GroupCoordinationContext, HandlerContext,
    };
    use crate::capabilities::handler::{GenerativeAttempt, HandlerError};
    use crate::ports::llm_gateway::{GatewayError, GenerationRequest};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use lattice_domain::{CapabilityProfile, ChatMetadata, GroupMember};
    use std::sync::Mutex;
    use std::time::Duration;

    struct RecordingGateway {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl LlmGateway for RecordingGateway {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("generated".to_string())
        }
    }

    fn attempt() -> GenerativeAttempt {
        GenerativeAttempt {
            profile: CapabilityProfile::Full,
            use_tools: true,
            timeout: Duration::from_secs(1),
        }
    }

    fn group_context(query: &str) -> HandlerContext {
        HandlerContext::GroupCoordination(GroupCoordinationContext {
            query: query.to_string(),
            today: Utc.with_ymd_and_hms(2025, 11, 9, 0, 0, 0).unwrap(),
            chat: ChatMetadata::default(),
            roster: vec![
                GroupMember::new("Alice"),
                GroupMember::new("Bob"),
                GroupMember::new("Charlie"),
            ],
        })
    }

    #[test]
    fn test_standard_registry_covers_every_tag() {
        let registry = CapabilityRegistry::standard(None);
        assert_eq!(registry.len(), 4);
        for tag in CapabilityTag::ALL {
            let handler = registry.get(tag).unwrap();
            assert_eq!(handler.tag(), tag);
            assert!(!handler.is_generative());
        }
    }

    #[test]
    fn test_credit_advisory_is_never_generative() {
        let gateway: Arc<dyn LlmGateway> = Arc::new(RecordingGateway {
            requests: Mutex::new(Vec::new()),
        });
        let registry = CapabilityRegistry::standard(Some(gateway));
        assert!(!registry.get(CapabilityTag::CreditAdvisory).unwrap().is_generative());
        assert!(registry.get(CapabilityTag::GroupCoordination).unwrap().is_generative());
    }

    #[tokio::test]
    async fn test_group_prompt_carries_precomputed_split() {
        let gateway = Arc::new(RecordingGateway {
            requests: Mutex::new(Vec::new()),
        });
        let handler = GroupCoordinationHandler::new(Some(gateway.clone() as Arc<dyn LlmGateway>));

        let text = handler
            .invoke(&group_context("split $120 dinner"), &attempt())
            .await
            .unwrap();
        assert_eq!(text, "generated");

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].use_tools);
        assert!(requests[0].prompt.contains("$40.00"));
        assert!(requests[0].prompt.contains("Alice, Bob, Charlie"));
    }

    #[tokio::test]
    async fn test_context_mismatch_is_an_error() {
        let handler = ConversationalHandler::new(None);
        let result = handler.invoke(&group_context("hi"), &attempt()).await;
        assert!(matches!(result, Err(HandlerError::ContextMismatch { .. })));
    }

    #[tokio::test]
    async fn test_no_gateway_is_not_generative() {
        let handler = ConversationalHandler::new(None);
        let ctx = HandlerContext::Conversational(ConversationalContext {
            query: "hi".to_string(),
            today: Utc::now(),
            user_name: Some("Alex".to_string()),
            history: Vec::new(),
        });
        let result = handler.invoke(&ctx, &attempt()).await;
        assert!(matches!(result, Err(HandlerError::NotGenerative(_))));
        assert!(handler.fallback(&ctx).starts_with("Hey Alex!"));
    }

    #[test]
    fn test_fallbacks_tolerate_foreign_context() {
        let credit = HandlerContext::CreditAdvisory(CreditAdvisoryContext {
            query: "split $90".to_string(),
            today: Utc::now(),
        });
        let registry = CapabilityRegistry::standard(None);
        for tag in CapabilityTag::ALL {
            let text = registry.get(tag).unwrap().fallback(&credit);
            assert!(!text.trim().is_empty(), "{} fallback was empty", tag);
        }
    }

    #[test]
    fn test_group_fallback_uses_roster() {
        let handler = GroupCoordinationHandler::new(None);
        let text = handler.fallback(&group_context("split $120 dinner"));
        assert!(text.contains("÷ 3 = $40.00"));
    }
}
