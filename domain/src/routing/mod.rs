//! Query routing domain
//!
//! The router maps a query to an ordered set of at most three capabilities.
//! This module holds the pure parts of that decision:
//!
//! - [`keywords`]: the deterministic keyword pass (no network access)
//! - [`parsing`]: defensive parsing of the generative classifier's output
//! - [`decision`]: the [`RoutingDecision`] value object and its invariants
//!
//! The generative pass itself lives in the application layer, since it
//! needs a backend port.

pub mod decision;
pub mod keywords;
pub mod parsing;

pub use decision::{MAX_ROUTED_TAGS, RoutingDecision, RoutingSource};
pub use keywords::{KeywordMatch, match_keywords, route_by_keywords};
pub use parsing::{ClassificationParseError, parse_classifier_output};
