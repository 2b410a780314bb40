//! Handler Executor: the tiered degradation ladder.
//!
//! One capability runs through at most three strictly sequential tiers:
//!
//! | Tier | Profile | Tools | Budget |
//! |------|---------|-------|--------|
//! | 1 full | `Full` | if the handler wants them | primary |
//! | 2 degraded | `Light` | never | max(primary / 2, floor) |
//! | 3 deterministic | n/a | n/a | unbounded, never suspends |
//!
//! Tier 2 only starts after tier 1 terminates unsuccessfully. Handlers with
//! no generative backend go straight to tier 3. A timed-out attempt is
//! dropped, so its eventual result is discarded. Panics anywhere in a
//! handler are caught here and turned into an apology for that capability
//! alone; [`HandlerExecutor::execute`] itself never fails.

use crate::capabilities::{CapabilityHandler, GenerativeAttempt, HandlerContext};
use crate::config::ExecutionParams;
use futures::FutureExt;
use lattice_domain::{HandlerErrorKind, HandlerInvocation, HandlerResult, Tier};
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one generative tier
enum TierOutcome {
    Answered(String),
    Failed(HandlerErrorKind),
}

#[derive(Debug, Clone, Default)]
pub struct HandlerExecutor {
    params: ExecutionParams,
}

impl HandlerExecutor {
    pub fn new(params: ExecutionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    fn budget(&self, tier: Tier) -> Option<Duration> {
        match tier {
            Tier::Full => Some(self.params.primary_timeout),
            Tier::Degraded => Some(self.params.secondary_timeout()),
            Tier::Deterministic => None,
        }
    }

    /// Run `handler` through the tier ladder
    pub async fn execute(
        &self,
        handler: &dyn CapabilityHandler,
        context: &HandlerContext,
    ) -> HandlerResult {
        let tag = handler.tag();
        let mut attempts = Vec::new();

        let mut tier = if handler.is_generative() {
            Tier::Full
        } else {
            debug!("{} has no generative backend, using deterministic tier", tag);
            Tier::Deterministic
        };

        while tier.is_generative() {
            let budget = self.budget(tier).unwrap_or(self.params.primary_timeout);
            let mut invocation = HandlerInvocation::pending(tag, tier, Some(budget));

            match self.run_generative(handler, context, tier, budget, &mut invocation).await {
                TierOutcome::Answered(text) => {
                    attempts.push(invocation);
                    info!("{} answered at {}", tag, tier);
                    return HandlerResult::success(tag, text, tier).with_attempts(attempts);
                }
                TierOutcome::Failed(kind) => {
                    warn!(
                        "{} {} {}: {}",
                        tag,
                        tier,
                        invocation.status().as_str(),
                        invocation.detail().unwrap_or("no detail")
                    );
                    debug!("{} {} failure kind: {}", tag, tier, kind);
                    attempts.push(invocation);
                }
            }

            match tier.next() {
                Some(next) => tier = next,
                None => break,
            }
        }

        self.run_deterministic(handler, context, attempts)
    }

    async fn run_generative(
        &self,
        handler: &dyn CapabilityHandler,
        context: &HandlerContext,
        tier: Tier,
        budget: Duration,
        invocation: &mut HandlerInvocation,
    ) -> TierOutcome {
        let Some(profile) = tier.profile() else {
            return TierOutcome::Failed(HandlerErrorKind::ContractViolation);
        };
        let attempt = GenerativeAttempt {
            profile,
            use_tools: tier == Tier::Full && handler.wants_tools(),
            timeout: budget,
        };

        let call = AssertUnwindSafe(handler.invoke(context, &attempt)).catch_unwind();
        let (outcome, transition) = match tokio::time::timeout(budget, call).await {
            Err(_) => (
                TierOutcome::Failed(HandlerErrorKind::Timeout),
                invocation.time_out(),
            ),
            Ok(Err(_panic)) => (
                TierOutcome::Failed(HandlerErrorKind::Panicked),
                invocation.fail("handler panicked"),
            ),
            Ok(Ok(Err(e))) => {
                let transition = invocation.fail(e.to_string());
                (TierOutcome::Failed(HandlerErrorKind::InvocationFailed), transition)
            }
            Ok(Ok(Ok(text))) if text.trim().is_empty() => (
                TierOutcome::Failed(HandlerErrorKind::InvocationFailed),
                invocation.fail("empty answer"),
            ),
            Ok(Ok(Ok(text))) => {
                let transition = invocation.succeed();
                (TierOutcome::Answered(text), transition)
            }
        };

        if let Err(e) = transition {
            warn!("{} {}: {}", handler.tag(), tier, e);
        }
        outcome
    }

    fn run_deterministic(
        &self,
        handler: &dyn CapabilityHandler,
        context: &HandlerContext,
        mut attempts: Vec<HandlerInvocation>,
    ) -> HandlerResult {
        let tag = handler.tag();
        let mut invocation = HandlerInvocation::pending(tag, Tier::Deterministic, None);

        let rendered = std::panic::catch_unwind(AssertUnwindSafe(|| handler.fallback(context)));
        let (result, transition) = match rendered {
            Ok(text) if !text.trim().is_empty() => (
                HandlerResult::success(tag, text, Tier::Deterministic),
                invocation.succeed(),
            ),
            Ok(_) => {
                warn!("{} deterministic tier returned no text", tag);
                (
                    HandlerResult::failure(tag, HandlerErrorKind::ContractViolation),
                    invocation.fail("empty answer"),
                )
            }
            Err(_) => {
                warn!("{} deterministic tier panicked", tag);
                (
                    HandlerResult::failure(tag, HandlerErrorKind::Panicked),
                    invocation.fail("handler panicked"),
                )
            }
        };

        if let Err(e) = transition {
            warn!("{} {}: {}", tag, Tier::Deterministic, e);
        }

        attempts.push(invocation);
        result.with_attempts(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{CreditAdvisoryContext, HandlerError};
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use chrono::Utc;
    use lattice_domain::{CapabilityProfile, CapabilityTag, InvocationStatus};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// What a fake handler does on one generative attempt
    #[derive(Debug, Clone)]
    enum Script {
        Answer(&'static str),
        Fail,
        Hang,
        Panic,
        Empty,
    }

    /// Fake capability driven by a per-attempt script
    struct ScriptedHandler {
        generative: bool,
        tools: bool,
        script: Mutex<VecDeque<Script>>,
        seen: Mutex<Vec<GenerativeAttempt>>,
        fallback_panics: bool,
    }

    impl ScriptedHandler {
        fn new(script: Vec<Script>) -> Self {
            Self {
                generative: true,
                tools: true,
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
                fallback_panics: false,
            }
        }

        fn deterministic_only() -> Self {
            Self {
                generative: false,
                ..Self::new(Vec::new())
            }
        }
    }

    #[async_trait]
    impl CapabilityHandler for ScriptedHandler {
        fn tag(&self) -> CapabilityTag {
            CapabilityTag::PersonalFinance
        }

        fn is_generative(&self) -> bool {
            self.generative
        }

        fn wants_tools(&self) -> bool {
            self.tools
        }

        async fn invoke(
            &self,
            _context: &HandlerContext,
            attempt: &GenerativeAttempt,
        ) -> Result<String, HandlerError> {
            self.seen.lock().unwrap().push(*attempt);
            let step = self.script.lock().unwrap().pop_front().unwrap_or(Script::Fail);
            match step {
                Script::Answer(text) => Ok(text.to_string()),
                Script::Fail => Err(HandlerError::Gateway(GatewayError::RequestFailed(
                    "boom".to_string(),
                ))),
                Script::Hang => std::future::pending().await,
                Script::Panic => panic!("handler bug"),
                Script::Empty => Ok("   ".to_string()),
            }
        }

        fn fallback(&self, _context: &HandlerContext) -> String {
            if self.fallback_panics {
                panic!("fallback bug");
            }
            "deterministic answer".to_string()
        }
    }

    fn context() -> HandlerContext {
        HandlerContext::CreditAdvisory(CreditAdvisoryContext {
            query: "anything".to_string(),
            today: Utc::now(),
        })
    }

    fn fast_executor() -> HandlerExecutor {
        HandlerExecutor::new(
            ExecutionParams::default()
                .with_primary_timeout(Duration::from_millis(40))
                .with_secondary_floor(Duration::from_millis(20)),
        )
    }

    fn statuses(result: &HandlerResult) -> Vec<(Tier, InvocationStatus)> {
        result.attempts.iter().map(|a| (a.tier, a.status())).collect()
    }

    #[tokio::test]
    async fn test_tier1_success() {
        let handler = ScriptedHandler::new(vec![Script::Answer("full answer")]);
        let result = fast_executor().execute(&handler, &context()).await;

        assert!(result.succeeded);
        assert_eq!(result.text, "full answer");
        assert_eq!(result.tier, Some(Tier::Full));
        assert_eq!(statuses(&result), vec![(Tier::Full, InvocationStatus::Success)]);

        let seen = handler.seen.lock().unwrap();
        assert_eq!(seen[0].profile, CapabilityProfile::Full);
        assert!(seen[0].use_tools);
    }

    #[tokio::test]
    async fn test_tier1_failure_degrades_to_tier2() {
        let handler = ScriptedHandler::new(vec![Script::Fail, Script::Answer("light answer")]);
        let result = fast_executor().execute(&handler, &context()).await;

        assert_eq!(result.text, "light answer");
        assert_eq!(result.tier, Some(Tier::Degraded));
        assert!(result.degraded());
        assert_eq!(
            statuses(&result),
            vec![
                (Tier::Full, InvocationStatus::Failed),
                (Tier::Degraded, InvocationStatus::Success)
            ]
        );

        let seen = handler.seen.lock().unwrap();
        assert_eq!(seen[1].profile, CapabilityProfile::Light);
        assert!(!seen[1].use_tools);
        assert_eq!(seen[1].timeout, Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_timeouts_fall_through_to_deterministic() {
        let handler = ScriptedHandler::new(vec![Script::Hang, Script::Hang]);
        let result = fast_executor().execute(&handler, &context()).await;

        assert!(result.succeeded);
        assert_eq!(result.text, "deterministic answer");
        assert_eq!(result.tier, Some(Tier::Deterministic));
        assert_eq!(
            statuses(&result),
            vec![
                (Tier::Full, InvocationStatus::TimedOut),
                (Tier::Degraded, InvocationStatus::TimedOut),
                (Tier::Deterministic, InvocationStatus::Success)
            ]
        );
    }

    #[tokio::test]
    async fn test_panics_and_empty_answers_escalate() {
        let handler = ScriptedHandler::new(vec![Script::Panic, Script::Empty]);
        let result = fast_executor().execute(&handler, &context()).await;

        assert_eq!(result.tier, Some(Tier::Deterministic));
        assert_eq!(result.attempts[0].detail(), Some("handler panicked"));
        assert_eq!(result.attempts[1].detail(), Some("empty answer"));
    }

    #[tokio::test]
    async fn test_non_generative_skips_to_deterministic() {
        let handler = ScriptedHandler::deterministic_only();
        let result = fast_executor().execute(&handler, &context()).await;

        assert_eq!(result.tier, Some(Tier::Deterministic));
        assert!(handler.seen.lock().unwrap().is_empty());
        assert_eq!(result.attempts.len(), 1);
    }

    #[tokio::test]
    async fn test_tools_only_when_handler_wants_them() {
        let mut handler = ScriptedHandler::new(vec![Script::Answer("ok")]);
        handler.tools = false;
        fast_executor().execute(&handler, &context()).await;
        assert!(!handler.seen.lock().unwrap()[0].use_tools);
    }

    #[tokio::test]
    async fn test_deterministic_panic_becomes_apology() {
        let mut handler = ScriptedHandler::deterministic_only();
        handler.fallback_panics = true;
        let result = fast_executor().execute(&handler, &context()).await;

        assert!(!result.succeeded);
        assert_eq!(result.error, Some(HandlerErrorKind::Panicked));
        assert!(result.text.starts_with("Sorry"));
        assert_eq!(
            statuses(&result),
            vec![(Tier::Deterministic, InvocationStatus::Failed)]
        );
        assert_eq!(result.attempts[0].detail(), Some("handler panicked"));
    }

    #[tokio::test]
    async fn test_deterministic_attempt_is_recorded_terminal() {
        let handler = ScriptedHandler::deterministic_only();
        let result = fast_executor().execute(&handler, &context()).await;

        assert_eq!(
            statuses(&result),
            vec![(Tier::Deterministic, InvocationStatus::Success)]
        );
        assert!(result.attempts.iter().all(|a| a.status() != InvocationStatus::Pending));
    }
}
