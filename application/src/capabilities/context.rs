//! Per-capability handler inputs.
//!
//! Each capability receives only what it needs: the personal-finance handler
//! never sees a group roster, and the group handler never sees transaction
//! history.

use chrono::{DateTime, Utc};
use lattice_domain::{CapabilityTag, ChatMetadata, GroupMember, HistoryEntry, MerchantRecords};

#[derive(Debug, Clone)]
pub struct PersonalFinanceContext {
    pub query: String,
    pub today: DateTime<Utc>,
    pub records: Vec<MerchantRecords>,
}

#[derive(Debug, Clone)]
pub struct CreditAdvisoryContext {
    pub query: String,
    pub today: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GroupCoordinationContext {
    pub query: String,
    pub today: DateTime<Utc>,
    pub chat: ChatMetadata,
    pub roster: Vec<GroupMember>,
}

#[derive(Debug, Clone)]
pub struct ConversationalContext {
    pub query: String,
    pub today: DateTime<Utc>,
    pub user_name: Option<String>,
    pub history: Vec<HistoryEntry>,
}

/// Input handed to one capability handler
#[derive(Debug, Clone)]
pub enum HandlerContext {
    PersonalFinance(PersonalFinanceContext),
    CreditAdvisory(CreditAdvisoryContext),
    GroupCoordination(GroupCoordinationContext),
    Conversational(ConversationalContext),
}

impl HandlerContext {
    pub fn tag(&self) -> CapabilityTag {
        match self {
            HandlerContext::PersonalFinance(_) => CapabilityTag::PersonalFinance,
            HandlerContext::CreditAdvisory(_) => CapabilityTag::CreditAdvisory,
            HandlerContext::GroupCoordination(_) => CapabilityTag::GroupCoordination,
            HandlerContext::Conversational(_) => CapabilityTag::Conversational,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            HandlerContext::PersonalFinance(c) => &c.query,
            HandlerContext::CreditAdvisory(c) => &c.query,
            HandlerContext::GroupCoordination(c) => &c.query,
            HandlerContext::Conversational(c) => &c.query,
        }
    }

    pub fn today(&self) -> DateTime<Utc> {
        match self {
            HandlerContext::PersonalFinance(c) => c.today,
            HandlerContext::CreditAdvisory(c) => c.today,
            HandlerContext::GroupCoordination(c) => c.today,
            HandlerContext::Conversational(c) => c.today,
        }
    }
}
