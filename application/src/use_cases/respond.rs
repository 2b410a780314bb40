//! Respond use case (the Orchestrator)
//!
//! Router, then up to three concurrent Handler Executor invocations, then the
//! Aggregator. This is the single entry point the message layer calls.
//! Each capability's context is assembled inside its own task, so a slow or
//! broken record provider only affects that capability's section.

use super::assemble_context::ContextAssembler;
use super::classify_query::QueryRouter;
use super::execute_capability::HandlerExecutor;
use crate::capabilities::CapabilityRegistry;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use lattice_domain::fallback::EMPTY_QUERY_HELP;
use lattice_domain::{
    CapabilityTag, CompositeResponse, HandlerErrorKind, HandlerResult, Query, RoutingDecision,
    Tier,
};
use futures::FutureExt;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Result of answering one query
#[derive(Debug, Clone, Serialize)]
pub struct RespondOutput {
    pub decision: RoutingDecision,
    pub response: CompositeResponse,
}

impl RespondOutput {
    /// Rendered composite answer; never empty
    pub fn text(&self) -> String {
        self.response.render()
    }
}

/// Use case for answering a query
pub struct RespondUseCase {
    router: QueryRouter,
    registry: CapabilityRegistry,
    assembler: ContextAssembler,
    executor: HandlerExecutor,
}

impl RespondUseCase {
    pub fn new(
        router: QueryRouter,
        registry: CapabilityRegistry,
        assembler: ContextAssembler,
        executor: HandlerExecutor,
    ) -> Self {
        Self {
            router,
            registry,
            assembler,
            executor,
        }
    }

    /// Answer `query` and return the rendered composite text
    pub async fn classify_and_respond(&self, query: &Query) -> String {
        self.execute(query).await.text()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, query: &Query) -> RespondOutput {
        self.execute_with_progress(query, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> RespondOutput {
        if query.is_blank() {
            return Self::blank_query_output();
        }

        let decision = self.router.classify(query).await;
        progress.on_routed(&decision);

        let mut join_set = JoinSet::new();
        let shared_query = Arc::new(query.clone());

        for &tag in decision.tags() {
            let Some(handler) = self.registry.get(tag) else {
                warn!("No handler registered for {}", tag);
                continue;
            };
            let assembler = self.assembler.clone();
            let executor = self.executor.clone();
            let query = Arc::clone(&shared_query);

            progress.on_capability_start(tag);
            join_set.spawn(async move {
                let assembled = AssertUnwindSafe(assembler.assemble(tag, &query))
                    .catch_unwind()
                    .await;
                let result = match assembled {
                    Ok(context) => executor.execute(handler.as_ref(), &context).await,
                    Err(_panic) => {
                        warn!("{} context assembly panicked", tag);
                        HandlerResult::failure(tag, HandlerErrorKind::Panicked)
                    }
                };
                (tag, result)
            });
        }

        let mut results: HashMap<CapabilityTag, HandlerResult> = HashMap::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((tag, result)) => {
                    info!(
                        "{} finished: succeeded={}, tier={}",
                        tag,
                        result.succeeded,
                        result
                            .tier
                            .map(|t| t.number().to_string())
                            .unwrap_or_else(|| "-".to_string())
                    );
                    progress.on_capability_complete(&result);
                    results.insert(tag, result);
                }
                Err(e) => {
                    // The aggregator substitutes an apology for the missing tag
                    warn!("Capability task join error: {}", e);
                }
            }
        }

        for &tag in decision.tags() {
            if !results.contains_key(&tag) {
                progress.on_capability_complete(&HandlerResult::failure(
                    tag,
                    HandlerErrorKind::Missing,
                ));
            }
        }
        progress.on_complete();

        let response = CompositeResponse::aggregate(decision.tags(), results);
        RespondOutput { decision, response }
    }

    fn blank_query_output() -> RespondOutput {
        let decision = RoutingDecision::conversational("blank query");
        let mut results = HashMap::new();
        results.insert(
            CapabilityTag::Conversational,
            HandlerResult::success(CapabilityTag::Conversational, EMPTY_QUERY_HELP, Tier::Deterministic),
        );
        let response = CompositeResponse::aggregate(decision.tags(), results);
        RespondOutput { decision, response }
    }
}
