//! Prompt domain
//!
//! Templates for the router's classification call and for each specialist's
//! generative tier.

mod template;

pub use template::PromptTemplate;
