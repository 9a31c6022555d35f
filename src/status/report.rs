//! The model status report returned by `/model-status`.

use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::utils::format_rfc3339;

use super::capability::CapabilityFlags;

/// Model version advertised in every report.
pub const MODEL_VERSION: &str = "v2.1.0";

/// Uptime advertised in every report.
pub const UPTIME: &str = "99.9%";

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every upstream credential is configured.
    Operational,
    /// At least one upstream credential is missing.
    Degraded,
}

impl OverallStatus {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Operational => "operational",
            OverallStatus::Degraded => "degraded",
        }
    }
}

/// Health of a single upstream dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// Configured.
    Healthy,
    /// Credential missing.
    NotConfigured,
}

impl From<bool> for HealthState {
    fn from(configured: bool) -> Self {
        if configured {
            HealthState::Healthy
        } else {
            HealthState::NotConfigured
        }
    }
}

/// Where performance figures come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MetricsSource {
    /// Hand-authored constants, not measured from graded picks.
    Placeholder,
}

/// Model performance figures.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Performance {
    /// Fraction of graded picks that won.
    pub hit_rate: f64,
    /// Average expected value per pick.
    pub avg_ev: f64,
    /// Average closing-line value.
    pub clv: f64,
    /// Return on investment.
    pub roi: f64,
    /// Picks issued.
    pub total_picks: u32,
    /// Picks with a settled result.
    pub graded_picks: u32,
    /// Picks awaiting a result.
    pub pending_picks: u32,
    /// Provenance of the figures above.
    pub source: MetricsSource,
}

impl Performance {
    /// Static figures reported until graded pick history is wired in.
    pub const PLACEHOLDER: Performance = Performance {
        hit_rate: 0.54,
        avg_ev: 0.032,
        clv: 0.021,
        roi: 0.045,
        total_picks: 150,
        graded_picks: 120,
        pending_picks: 30,
        source: MetricsSource::Placeholder,
    };
}

/// Per-dependency health. `database` is always reported healthy; it is not probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiHealth {
    pub betstack: HealthState,
    pub odds_api: HealthState,
    pub roster_api: HealthState,
    pub ai_api: HealthState,
    pub database: HealthState,
}

/// Raw credential presence per dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiKeysConfigured {
    pub betstack: bool,
    pub odds_api: bool,
    pub roster_api: bool,
    pub ai_api: bool,
}

/// Product features available given the configured credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Capabilities {
    pub real_time_odds: bool,
    pub player_props: bool,
    pub roster_data: bool,
    pub ai_analysis: bool,
}

/// Response body of `/model-status`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusReport {
    pub status: OverallStatus,
    pub model_version: String,
    /// RFC 3339 time the report was built.
    pub last_updated: String,
    pub performance: Performance,
    pub uptime: String,
    pub api_health: ApiHealth,
    pub api_keys_configured: ApiKeysConfigured,
    pub capabilities: Capabilities,
}

impl StatusReport {
    /// Assemble a report from capability flags at the given instant.
    pub fn build(flags: CapabilityFlags, now: OffsetDateTime) -> Self {
        let status = if flags.all_configured() {
            OverallStatus::Operational
        } else {
            OverallStatus::Degraded
        };

        Self {
            status,
            model_version: MODEL_VERSION.to_string(),
            last_updated: format_rfc3339(now),
            performance: Performance::PLACEHOLDER,
            uptime: UPTIME.to_string(),
            api_health: ApiHealth {
                betstack: flags.betstack.into(),
                odds_api: flags.odds_api.into(),
                roster_api: flags.roster_api.into(),
                ai_api: flags.ai_api.into(),
                database: HealthState::Healthy,
            },
            api_keys_configured: ApiKeysConfigured {
                betstack: flags.betstack,
                odds_api: flags.odds_api,
                roster_api: flags.roster_api,
                ai_api: flags.ai_api,
            },
            capabilities: Capabilities {
                real_time_odds: flags.odds_api,
                player_props: flags.betstack,
                roster_data: flags.roster_api,
                ai_analysis: flags.ai_api,
            },
        }
    }
}
