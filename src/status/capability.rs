//! Upstream capabilities and how their credentials are looked up.

use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// An upstream data source the model depends on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Betting-data platform (player props).
    Betstack,
    /// Odds feed.
    OddsApi,
    /// Team roster data.
    RosterApi,
    /// AI analysis provider.
    AiApi,
}

impl Capability {
    /// Environment variable holding this capability's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Capability::Betstack => "BETSTACK_API_KEY",
            Capability::OddsApi => "ODDS_API_KEY",
            Capability::RosterApi => "ROSTER_API_KEY",
            Capability::AiApi => "AI_API_KEY",
        }
    }

    /// Name of the product feature this capability unlocks.
    pub fn feature_name(&self) -> &'static str {
        match self {
            Capability::Betstack => "player_props",
            Capability::OddsApi => "real_time_odds",
            Capability::RosterApi => "roster_data",
            Capability::AiApi => "ai_analysis",
        }
    }
}

/// Where API credentials are read from.
pub trait CredentialSource: std::fmt::Debug + Send + Sync {
    /// Look up a raw credential value by variable name.
    fn lookup(&self, name: &str) -> Option<String>;

    /// A capability is configured iff its credential is a non-empty string.
    fn is_configured(&self, capability: Capability) -> bool {
        self.lookup(capability.env_var())
            .is_some_and(|value| !value.is_empty())
    }
}

/// Reads credentials from the process environment on every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn is_configured(&self, capability: Capability) -> bool {
        // Non-UTF-8 values still count as set.
        std::env::var_os(capability.env_var()).is_some_and(|value| !value.is_empty())
    }
}

/// Fixed in-memory credentials, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials with every capability set to a dummy key.
    pub fn all_configured() -> Self {
        Capability::iter().fold(Self::new(), |creds, cap| creds.with(cap, "test-key"))
    }

    /// Set the credential for a capability.
    pub fn with(mut self, capability: Capability, value: impl Into<String>) -> Self {
        self.values
            .insert(capability.env_var().to_string(), value.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Presence of each capability's credential at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityFlags {
    /// Betting-data key present.
    pub betstack: bool,
    /// Odds key present.
    pub odds_api: bool,
    /// Roster key present.
    pub roster_api: bool,
    /// AI key present.
    pub ai_api: bool,
}

impl CapabilityFlags {
    /// Read every flag from a credential source.
    pub fn read(source: &dyn CredentialSource) -> Self {
        Self {
            betstack: source.is_configured(Capability::Betstack),
            odds_api: source.is_configured(Capability::OddsApi),
            roster_api: source.is_configured(Capability::RosterApi),
            ai_api: source.is_configured(Capability::AiApi),
        }
    }

    /// Flag for a single capability.
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::Betstack => self.betstack,
            Capability::OddsApi => self.odds_api,
            Capability::RosterApi => self.roster_api,
            Capability::AiApi => self.ai_api,
        }
    }

    /// True iff every capability is configured.
    pub fn all_configured(&self) -> bool {
        Capability::iter().all(|cap| self.get(cap))
    }
}
