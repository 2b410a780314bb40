//! Record provider ports
//!
//! Read-only access to the structured records the capabilities work from.
//! Every provider may legitimately return nothing.

use async_trait::async_trait;
use lattice_domain::{GroupMember, HistoryEntry, MerchantRecords};
use thiserror::Error;

/// Errors from record providers
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed record {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Transaction history grouped by merchant
#[async_trait]
pub trait TransactionHistoryProvider: Send + Sync {
    async fn merchant_records(&self, user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError>;
}

/// Members of a group chat
#[async_trait]
pub trait GroupRosterProvider: Send + Sync {
    async fn members(&self, group_id: &str) -> Result<Vec<GroupMember>, ProviderError>;
}

/// Recent messages of a chat, oldest first
#[async_trait]
pub trait ConversationHistoryProvider: Send + Sync {
    async fn recent_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, ProviderError>;
}

/// Provider with no records at all
pub struct NoRecords;

#[async_trait]
impl TransactionHistoryProvider for NoRecords {
    async fn merchant_records(&self, _user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl GroupRosterProvider for NoRecords {
    async fn members(&self, _group_id: &str) -> Result<Vec<GroupMember>, ProviderError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ConversationHistoryProvider for NoRecords {
    async fn recent_messages(
        &self,
        _chat_id: &str,
        _limit: usize,
    ) -> Result<Vec<HistoryEntry>, ProviderError> {
        Ok(Vec::new())
    }
}
