//! Context assembly
//!
//! Builds the [`HandlerContext`] for one capability, fetching only what that
//! capability needs. Every provider call runs under the provider budget with
//! a panic boundary. An error, expiry or panic is logged and the input
//! degrades to empty, which every handler's deterministic tier can answer
//! from.

use crate::capabilities::{
    ConversationalContext, CreditAdvisoryContext, GroupCoordinationContext, HandlerContext,
    PersonalFinanceContext,
};
use crate::config::ExecutionParams;
use crate::ports::record_providers::{
    ConversationHistoryProvider, GroupRosterProvider, NoRecords, ProviderError,
    TransactionHistoryProvider,
};
use futures::FutureExt;
use lattice_domain::{CapabilityTag, GroupMember, HistoryEntry, MerchantRecords, Query};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ContextAssembler {
    transactions: Arc<dyn TransactionHistoryProvider>,
    rosters: Arc<dyn GroupRosterProvider>,
    history: Arc<dyn ConversationHistoryProvider>,
    history_limit: usize,
    provider_timeout: Duration,
}

impl ContextAssembler {
    pub fn new(
        transactions: Arc<dyn TransactionHistoryProvider>,
        rosters: Arc<dyn GroupRosterProvider>,
        history: Arc<dyn ConversationHistoryProvider>,
        params: &ExecutionParams,
    ) -> Self {
        Self {
            transactions,
            rosters,
            history,
            history_limit: params.history_limit,
            provider_timeout: params.provider_timeout,
        }
    }

    /// Assembler with no record sources; only the query itself is used
    pub fn empty(params: &ExecutionParams) -> Self {
        let none = Arc::new(NoRecords);
        Self::new(none.clone(), none.clone(), none, params)
    }

    pub async fn assemble(&self, tag: CapabilityTag, query: &Query) -> HandlerContext {
        let text = query.text().to_string();
        let today = query.issued_at();

        match tag {
            CapabilityTag::PersonalFinance => {
                HandlerContext::PersonalFinance(PersonalFinanceContext {
                    query: text,
                    today,
                    records: self.merchant_records(query).await,
                })
            }
            CapabilityTag::CreditAdvisory => {
                HandlerContext::CreditAdvisory(CreditAdvisoryContext { query: text, today })
            }
            CapabilityTag::GroupCoordination => {
                HandlerContext::GroupCoordination(GroupCoordinationContext {
                    query: text,
                    today,
                    chat: query.context().chat.clone(),
                    roster: self.roster(query).await,
                })
            }
            CapabilityTag::Conversational => {
                HandlerContext::Conversational(ConversationalContext {
                    query: text,
                    today,
                    user_name: query.context().chat.user_name.clone(),
                    history: self.recent_history(query).await,
                })
            }
        }
    }

    /// Run one provider call; anything but a timely `Ok` yields no records
    async fn fetch<T>(
        &self,
        what: String,
        call: impl Future<Output = Result<Vec<T>, ProviderError>>,
    ) -> Vec<T> {
        let guarded = AssertUnwindSafe(call).catch_unwind();
        match tokio::time::timeout(self.provider_timeout, guarded).await {
            Ok(Ok(Ok(items))) => items,
            Ok(Ok(Err(e))) => {
                warn!("{} unavailable: {}", what, e);
                Vec::new()
            }
            Ok(Err(_panic)) => {
                warn!("{} provider panicked", what);
                Vec::new()
            }
            Err(_) => {
                warn!("{} timed out after {:?}", what, self.provider_timeout);
                Vec::new()
            }
        }
    }

    async fn merchant_records(&self, query: &Query) -> Vec<MerchantRecords> {
        let Some(user_id) = query.context().chat.user_id.as_deref() else {
            debug!("No user id on query, personal finance gets no history");
            return Vec::new();
        };
        self.fetch(
            format!("Transaction history for user {}", user_id),
            self.transactions.merchant_records(user_id),
        )
        .await
    }

    async fn roster(&self, query: &Query) -> Vec<GroupMember> {
        let ctx = query.context();
        if !ctx.roster.is_empty() {
            return ctx.roster.clone();
        }
        let Some(group_id) = ctx.chat.group_id.as_deref() else {
            return Vec::new();
        };
        self.fetch(
            format!("Roster for group {}", group_id),
            self.rosters.members(group_id),
        )
        .await
    }

    async fn recent_history(&self, query: &Query) -> Vec<HistoryEntry> {
        let ctx = query.context();
        let mut history = if !ctx.history.is_empty() {
            ctx.history.clone()
        } else if let Some(chat_id) = ctx.chat.chat_id.as_deref() {
            self.fetch(
                format!("History for chat {}", chat_id),
                self.history.recent_messages(chat_id, self.history_limit),
            )
            .await
        } else {
            Vec::new()
        };

        // Keep only the most recent entries
        if history.len() > self.history_limit {
            history.drain(..history.len() - self.history_limit);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use lattice_domain::{ChatMetadata, ConversationContext, TransactionRecord};

    struct FailingProvider;

    #[async_trait]
    impl TransactionHistoryProvider for FailingProvider {
        async fn merchant_records(&self, _user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError> {
            Err(ProviderError::Io("disk on fire".to_string()))
        }
    }

    #[async_trait]
    impl GroupRosterProvider for FailingProvider {
        async fn members(&self, _group_id: &str) -> Result<Vec<GroupMember>, ProviderError> {
            Err(ProviderError::NotFound("g1".to_string()))
        }
    }

    #[async_trait]
    impl ConversationHistoryProvider for FailingProvider {
        async fn recent_messages(
            &self,
            _chat_id: &str,
            _limit: usize,
        ) -> Result<Vec<HistoryEntry>, ProviderError> {
            Err(ProviderError::Io("gone".to_string()))
        }
    }

    struct StaticProvider;

    #[async_trait]
    impl TransactionHistoryProvider for StaticProvider {
        async fn merchant_records(&self, user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError> {
            Ok(vec![MerchantRecords::new(
                format!("shop-of-{}", user_id),
                vec![TransactionRecord::new(10.0, Utc::now())],
            )])
        }
    }

    #[async_trait]
    impl GroupRosterProvider for StaticProvider {
        async fn members(&self, _group_id: &str) -> Result<Vec<GroupMember>, ProviderError> {
            Ok(vec![GroupMember::new("Sam"), GroupMember::new("Priya")])
        }
    }

    #[async_trait]
    impl ConversationHistoryProvider for StaticProvider {
        async fn recent_messages(
            &self,
            _chat_id: &str,
            limit: usize,
        ) -> Result<Vec<HistoryEntry>, ProviderError> {
            Ok((0..10).map(|i| HistoryEntry::user(format!("m{}", i))).take(limit).collect())
        }
    }

    fn query(text: &str) -> Query {
        let chat = ChatMetadata {
            chat_id: Some("c1".to_string()),
            user_id: Some("u1".to_string()),
            user_name: Some("Alex".to_string()),
            group_id: Some("g1".to_string()),
            ..Default::default()
        };
        Query::new(text, ConversationContext::new(chat), Utc::now())
    }

    fn params(history_limit: usize) -> ExecutionParams {
        ExecutionParams::default()
            .with_history_limit(history_limit)
            .with_provider_timeout(Duration::from_millis(30))
    }

    fn static_assembler() -> ContextAssembler {
        let p = Arc::new(StaticProvider);
        ContextAssembler::new(p.clone(), p.clone(), p, &params(6))
    }

    #[tokio::test]
    async fn test_each_tag_gets_only_its_inputs() {
        let assembler = static_assembler();
        let q = query("anything");

        let HandlerContext::PersonalFinance(pf) =
            assembler.assemble(CapabilityTag::PersonalFinance, &q).await
        else {
            panic!("wrong variant");
        };
        assert_eq!(pf.records[0].merchant, "shop-of-u1");

        let HandlerContext::GroupCoordination(group) =
            assembler.assemble(CapabilityTag::GroupCoordination, &q).await
        else {
            panic!("wrong variant");
        };
        assert_eq!(group.roster.len(), 2);

        let HandlerContext::Conversational(conv) =
            assembler.assemble(CapabilityTag::Conversational, &q).await
        else {
            panic!("wrong variant");
        };
        assert_eq!(conv.user_name.as_deref(), Some("Alex"));
        assert_eq!(conv.history.len(), 6);

        let ctx = assembler.assemble(CapabilityTag::CreditAdvisory, &q).await;
        assert_eq!(ctx.tag(), CapabilityTag::CreditAdvisory);
    }

    #[tokio::test]
    async fn test_provider_failures_degrade_to_empty() {
        let p = Arc::new(FailingProvider);
        let assembler = ContextAssembler::new(p.clone(), p.clone(), p, &params(6));
        let q = query("anything");

        let HandlerContext::PersonalFinance(pf) =
            assembler.assemble(CapabilityTag::PersonalFinance, &q).await
        else {
            panic!("wrong variant");
        };
        assert!(pf.records.is_empty());

        let HandlerContext::GroupCoordination(group) =
            assembler.assemble(CapabilityTag::GroupCoordination, &q).await
        else {
            panic!("wrong variant");
        };
        assert!(group.roster.is_empty());
    }

    #[tokio::test]
    async fn test_inline_context_wins_and_is_truncated() {
        let chat = ChatMetadata::default();
        let history: Vec<_> = (0..9).map(|i| HistoryEntry::user(format!("h{}", i))).collect();
        let q = Query::new(
            "hi",
            ConversationContext::new(chat)
                .with_history(history)
                .with_roster(vec![GroupMember::new("Ken")]),
            Utc::now(),
        );
        let assembler = ContextAssembler::new(
            Arc::new(StaticProvider),
            Arc::new(StaticProvider),
            Arc::new(StaticProvider),
            &params(3),
        );

        let HandlerContext::Conversational(conv) =
            assembler.assemble(CapabilityTag::Conversational, &q).await
        else {
            panic!("wrong variant");
        };
        let contents: Vec<_> = conv.history.iter().map(|h| h.content.as_str()).collect();
        assert_eq!(contents, vec!["h6", "h7", "h8"]);

        let HandlerContext::GroupCoordination(group) =
            assembler.assemble(CapabilityTag::GroupCoordination, &q).await
        else {
            panic!("wrong variant");
        };
        assert_eq!(group.roster, vec![GroupMember::new("Ken")]);
    }

    /// Provider that never answers
    struct StalledProvider;

    #[async_trait]
    impl TransactionHistoryProvider for StalledProvider {
        async fn merchant_records(&self, _user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError> {
            std::future::pending().await
        }
    }

    #[async_trait]
    impl GroupRosterProvider for StalledProvider {
        async fn members(&self, _group_id: &str) -> Result<Vec<GroupMember>, ProviderError> {
            panic!("roster index corrupted");
        }
    }

    #[async_trait]
    impl ConversationHistoryProvider for StalledProvider {
        async fn recent_messages(
            &self,
            _chat_id: &str,
            _limit: usize,
        ) -> Result<Vec<HistoryEntry>, ProviderError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_or_panicking_provider_degrades_to_empty() {
        let p = Arc::new(StalledProvider);
        let assembler = ContextAssembler::new(p.clone(), p.clone(), p, &params(6));
        let q = query("anything");

        let assembled = tokio::time::timeout(Duration::from_secs(2), async {
            let personal = assembler.assemble(CapabilityTag::PersonalFinance, &q).await;
            let group = assembler.assemble(CapabilityTag::GroupCoordination, &q).await;
            let conv = assembler.assemble(CapabilityTag::Conversational, &q).await;
            (personal, group, conv)
        })
        .await
        .expect("assembly must respect the provider budget");

        let (
            HandlerContext::PersonalFinance(pf),
            HandlerContext::GroupCoordination(group),
            HandlerContext::Conversational(conv),
        ) = assembled
        else {
            panic!("wrong variants");
        };
        assert!(pf.records.is_empty());
        assert!(group.roster.is_empty());
        assert!(conv.history.is_empty());
    }
}
