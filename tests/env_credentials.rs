//! Credential presence read from the real process environment.
//!
//! Kept as the only test in this binary because it mutates environment
//! variables.

use pickdesk::status::{
    Capability, CapabilityFlags, CredentialSource, EnvCredentials, OverallStatus, StatusReport,
};
use strum::IntoEnumIterator;
use time::OffsetDateTime;

#[test]
fn environment_changes_are_seen_on_next_read() {
    for capability in Capability::iter() {
        std::env::remove_var(capability.env_var());
    }
    let report = StatusReport::build(CapabilityFlags::read(&EnvCredentials), OffsetDateTime::now_utc());
    assert_eq!(report.status, OverallStatus::Degraded);

    for capability in Capability::iter() {
        std::env::set_var(capability.env_var(), "configured");
    }
    let report = StatusReport::build(CapabilityFlags::read(&EnvCredentials), OffsetDateTime::now_utc());
    assert_eq!(report.status, OverallStatus::Operational);

    std::env::set_var(Capability::RosterApi.env_var(), "");
    let flags = CapabilityFlags::read(&EnvCredentials);
    assert!(!flags.roster_api);
    assert!(flags.betstack && flags.odds_api && flags.ai_api);

    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var(Capability::AiApi.env_var(), OsStr::from_bytes(b"k\xff"));
        assert!(EnvCredentials.is_configured(Capability::AiApi));
        assert!(CapabilityFlags::read(&EnvCredentials).ai_api);
    }

    for capability in Capability::iter() {
        std::env::remove_var(capability.env_var());
    }
}
