//! Application-level configuration.
//!
//! - [`ExecutionParams`]: time budgets for the tier ladder and the router

pub mod execution_params;

pub use execution_params::ExecutionParams;
