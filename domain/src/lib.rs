//! Domain layer for lattice
//!
//! This crate contains the core types and pure computation of the assistant.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! A [`Query`] is routed to an ordered, deduplicated set of at most three
//! [`CapabilityTag`]s. The deterministic keyword pass lives in [`routing`];
//! the generative pass only needs [`parse_classifier_output`] from here.
//!
//! ## Tiered execution
//!
//! Each capability runs through a ladder of [`Tier`]s: full generative,
//! degraded generative, then the deterministic [`fallback`] renderers which
//! never fail.
//!
//! ## Aggregation
//!
//! [`CompositeResponse`] renders per-capability results in routing order,
//! regardless of the order they completed in.

pub mod core;
pub mod execution;
pub mod fallback;
pub mod finance;
pub mod prompt;
pub mod response;
pub mod routing;
pub mod util;

// Re-export commonly used types
pub use core::{
    capability::{CapabilityProfile, CapabilityTag},
    error::DomainError,
    query::{ChatKind, ChatMetadata, ConversationContext, GroupMember, HistoryEntry, Query, SenderType},
};
pub use execution::{
    HandlerErrorKind, HandlerInvocation, HandlerResult, InvocationStatus, Tier, apology_for,
};
pub use finance::{
    MerchantRecords, SpendCategory, SpendingSummary, SplitEstimate, TransactionRecord,
    extract_amount, resolve_participants,
};
pub use prompt::PromptTemplate;
pub use response::{CompositeResponse, GENERIC_APOLOGY};
pub use routing::{
    ClassificationParseError, MAX_ROUTED_TAGS, RoutingDecision, RoutingSource, match_keywords,
    parse_classifier_output, route_by_keywords,
};
