//! Deterministic Fallback Engine
//!
//! Pure renderers that answer from local structured data or static tables
//! without any generative call. They are the last degradation tier and never
//! fail: every empty or unresolvable input has an explicit rendering.
//! Identical input always yields byte-identical output.

pub mod conversational;
pub mod credit;
pub mod group;
pub mod spending;

pub use conversational::{EMPTY_QUERY_HELP, render_greeting};
pub use credit::render_card_advice;
pub use group::render_split_plan;
pub use spending::{render_purchase_advice, render_summary};
