//! Model status aggregation.
//!
//! Credential presence is read fresh on every report; nothing here is cached.

pub mod capability;
pub mod report;

pub use capability::{
    Capability, CapabilityFlags, CredentialSource, EnvCredentials, StaticCredentials,
};
pub use report::{HealthState, OverallStatus, Performance, StatusReport};
