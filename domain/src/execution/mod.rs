//! Capability execution domain: the tier ladder, invocation records and
//! per-capability results.

pub mod invocation;
pub mod result;

pub use invocation::{HandlerInvocation, InvocationStatus, Tier};
pub use result::{HandlerErrorKind, HandlerResult, apology_for};
