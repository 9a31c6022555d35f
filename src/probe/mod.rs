//! Smoke-test probe for a deployed picks backend.
//!
//! Issues a fixed sweep of GET requests and reports status codes with a
//! truncated body. Nothing is asserted about the remote responses.

pub mod runner;
pub mod targets;

pub use runner::{render_body, ProbeOutcome, ProbeResult, ProbeRunner, ProbeSummary};
pub use targets::{default_targets, ProbeTarget};
