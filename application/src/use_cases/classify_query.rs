//! Router use case
//!
//! Deterministic keyword pass first; the generative classifier only runs when
//! no keyword set matched and a backend is configured. Never fails: any
//! classifier problem yields the `{conversational}` default.

use crate::ports::llm_gateway::{GenerationRequest, LlmGateway};
use lattice_domain::{
    CapabilityProfile, PromptTemplate, Query, RoutingDecision, RoutingSource,
    parse_classifier_output, route_by_keywords,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct QueryRouter {
    classifier: Option<Arc<dyn LlmGateway>>,
    timeout: Duration,
}

impl QueryRouter {
    pub fn new(classifier: Option<Arc<dyn LlmGateway>>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Keyword pass only
    pub fn deterministic() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub async fn classify(&self, query: &Query) -> RoutingDecision {
        let decision = match route_by_keywords(query.text()) {
            Some(decision) => decision,
            None => self.classify_generative(query).await,
        };

        info!(
            "Routed to [{}] ({})",
            decision
                .tags()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            decision.rationale()
        );
        decision
    }

    async fn classify_generative(&self, query: &Query) -> RoutingDecision {
        let Some(classifier) = &self.classifier else {
            return RoutingDecision::conversational("no keyword match; no classifier configured");
        };

        let today = query.issued_at().date_naive().to_string();
        let prompt = PromptTemplate::router_prompt(&today, &query.context().chat, query.text());
        let request = GenerationRequest::new(prompt, CapabilityProfile::Classifier, self.timeout)
            .with_system_prompt(PromptTemplate::router_system());

        let raw = match tokio::time::timeout(self.timeout, classifier.generate(&request)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("Classifier call failed: {}", e);
                return RoutingDecision::conversational(format!("classifier failed: {}", e));
            }
            Err(_) => {
                warn!("Classifier exceeded {:?}", self.timeout);
                return RoutingDecision::conversational("classifier timed out");
            }
        };

        match parse_classifier_output(&raw) {
            Ok(tags) => RoutingDecision::new(
                tags,
                format!("classifier output {:?}", raw.trim()),
                RoutingSource::Classifier,
            ),
            Err(e) => {
                debug!("Unusable classifier output {:?}: {}", raw, e);
                RoutingDecision::conversational(format!("unusable classifier output: {}", e))
            }
        }
    }
}
