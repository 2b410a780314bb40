//! Application layer for lattice
//!
//! This crate contains use cases, port definitions, capability handlers and
//! application configuration. It depends only on the domain layer.

pub mod capabilities;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use capabilities::{CapabilityHandler, CapabilityRegistry, HandlerContext, HandlerError};
pub use config::ExecutionParams;
pub use ports::{
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    record_providers::{
        ConversationHistoryProvider, GroupRosterProvider, NoRecords, ProviderError,
        TransactionHistoryProvider,
    },
};
pub use use_cases::assemble_context::ContextAssembler;
pub use use_cases::classify_query::QueryRouter;
pub use use_cases::execute_capability::HandlerExecutor;
pub use use_cases::respond::{RespondOutput, RespondUseCase};
