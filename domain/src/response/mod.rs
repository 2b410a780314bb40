//! Response assembly
//!
//! - [`composite::CompositeResponse`]: order-preserving aggregation of
//!   per-capability results into one labeled text answer

pub mod composite;

pub use composite::{CompositeResponse, GENERIC_APOLOGY};
