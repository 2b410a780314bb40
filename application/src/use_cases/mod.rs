//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assemble_context;
pub mod classify_query;
pub mod execute_capability;
pub mod respond;
