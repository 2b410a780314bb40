//! Core domain concepts shared across all subdomains.
//!
//! - [`capability::CapabilityTag`]: the closed set of specialist capabilities
//! - [`query::Query`]: an immutable user query with its conversational context
//! - [`error::DomainError`]: domain-level errors

pub mod capability;
pub mod error;
pub mod query;
