//! Progress notification port
//!
//! Defines the interface for reporting progress while a query is answered.

use lattice_domain::{CapabilityTag, HandlerResult, RoutingDecision};

/// Callback for progress updates during query handling
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once the router has picked the capabilities
    fn on_routed(&self, decision: &RoutingDecision);

    /// Called when a capability's execution is started
    fn on_capability_start(&self, tag: CapabilityTag);

    /// Called when a capability's result is collected
    fn on_capability_complete(&self, result: &HandlerResult);

    /// Called after every capability has reported back
    fn on_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_routed(&self, _decision: &RoutingDecision) {}
    fn on_capability_start(&self, _tag: CapabilityTag) {}
    fn on_capability_complete(&self, _result: &HandlerResult) {}
}
