//! Capability handlers and their registry
//!
//! One handler per [`CapabilityTag`](lattice_domain::CapabilityTag), all
//! behind the uniform [`CapabilityHandler`] interface.

pub mod context;
pub mod conversational;
pub mod credit_advisory;
pub mod group_coordination;
pub mod handler;
pub mod personal_finance;
pub mod registry;

pub use context::{
    ConversationalContext, CreditAdvisoryContext, GroupCoordinationContext, HandlerContext,
    PersonalFinanceContext,
};
pub use conversational::ConversationalHandler;
pub use credit_advisory::CreditAdvisoryHandler;
pub use group_coordination::GroupCoordinationHandler;
pub use handler::{CapabilityHandler, GenerativeAttempt, HandlerError};
pub use personal_finance::PersonalFinanceHandler;
pub use registry::CapabilityRegistry;
