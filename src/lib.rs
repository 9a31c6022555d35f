//! Frontend and model-status service for a sports-betting picks product.
//!
//! The service serves a single-page frontend, a liveness check, and a
//! `/model-status` report describing which upstream data sources are
//! configured:
//!
//! ```text
//! BETSTACK_API_KEY  ─┐
//! ODDS_API_KEY      ─┤  all set   → "operational"
//! ROSTER_API_KEY    ─┤  otherwise → "degraded"
//! AI_API_KEY        ─┘
//! ```
//!
//! Performance figures in the report are fixed placeholders and are tagged
//! with `"source": "placeholder"`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`status`]: Capability flags and the status report
//! - [`api`]: HTTP routes and handlers
//! - [`probe`]: Smoke-test client for a remote deployment
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod status;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
