//! Sequential GET sweep against a remote deployment.

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::ProbeError;
use crate::utils::truncate_chars;

use super::targets::ProbeTarget;

/// Response captured for one target.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Full URL requested.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Round-trip time.
    pub elapsed: Duration,
    /// Body, pretty-printed if JSON, truncated for display.
    pub body: String,
}

/// Result for one target: a response, or a transport failure.
#[derive(Debug)]
pub struct ProbeResult {
    /// Target that was requested.
    pub target: ProbeTarget,
    /// What came back.
    pub outcome: Result<ProbeOutcome, ProbeError>,
}

/// Results of one sweep, in request order.
#[derive(Debug, Default)]
pub struct ProbeSummary {
    /// One entry per target.
    pub results: Vec<ProbeResult>,
}

impl ProbeSummary {
    /// Targets that returned any HTTP response.
    pub fn responded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    /// True if there were targets and none of them responded.
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.responded() == 0
    }

    /// `AllFailed` when nothing responded, for callers that report first and fail after.
    pub fn into_result(self) -> Result<Self, ProbeError> {
        if self.all_failed() {
            return Err(ProbeError::AllFailed(self.results.len()));
        }
        Ok(self)
    }
}

/// Issues probe requests one at a time.
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    http: reqwest::Client,
    base_url: Url,
    max_chars: usize,
}

impl ProbeRunner {
    /// Create a runner against `base_url`.
    pub fn new(base_url: &str, timeout: Duration, max_chars: usize) -> Result<Self, ProbeError> {
        let mut base = Url::parse(base_url).map_err(|source| ProbeError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        // Keep any path prefix when joining target paths.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: base,
            max_chars,
        })
    }

    /// Absolute URL for a target.
    pub fn target_url(&self, target: &ProbeTarget) -> Result<Url, ProbeError> {
        let relative = target.path.trim_start_matches('/');
        let mut url = self
            .base_url
            .join(relative)
            .map_err(|source| ProbeError::InvalidUrl {
                url: target.path.clone(),
                source,
            })?;

        if !target.query.is_empty() {
            url.query_pairs_mut().extend_pairs(target.query.iter());
        }

        Ok(url)
    }

    /// Request a single target.
    #[instrument(skip_all, fields(path = %target.display()))]
    pub async fn probe(&self, target: &ProbeTarget) -> Result<ProbeOutcome, ProbeError> {
        let url = self.target_url(target)?;
        let start = Instant::now();

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;
        let elapsed = start.elapsed();

        debug!(status, elapsed_ms = elapsed.as_millis() as u64, "Probe response");

        Ok(ProbeOutcome {
            url: url.to_string(),
            status,
            elapsed,
            body: render_body(&raw, self.max_chars),
        })
    }

    /// Request every target in order. Transport failures are kept per target.
    pub async fn run(&self, targets: &[ProbeTarget]) -> ProbeSummary {
        let mut results = Vec::with_capacity(targets.len());

        for target in targets {
            let outcome = self.probe(target).await;
            if let Err(e) = &outcome {
                warn!("Probe {} failed: {}", target.display(), e);
            }
            results.push(ProbeResult {
                target: target.clone(),
                outcome,
            });
        }

        ProbeSummary { results }
    }
}

/// Pretty-print JSON bodies, pass anything else through, then truncate.
pub fn render_body(raw: &str, max_chars: usize) -> String {
    let text = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string());
    truncate_chars(&text, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(base: &str) -> ProbeRunner {
        ProbeRunner::new(base, Duration::from_secs(1), 100).unwrap()
    }

    #[test]
    fn joins_paths_without_double_slash() {
        let target = ProbeTarget::new("/api/health");
        assert_eq!(
            runner("https://picks.example.com").target_url(&target).unwrap().as_str(),
            "https://picks.example.com/api/health"
        );
        assert_eq!(
            runner("https://picks.example.com/").target_url(&target).unwrap().as_str(),
            "https://picks.example.com/api/health"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let target = ProbeTarget::new("/parlays/working-parlays").param("limit", 5);
        assert_eq!(
            runner("http://localhost:8000/v1").target_url(&target).unwrap().as_str(),
            "http://localhost:8000/v1/parlays/working-parlays?limit=5"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ProbeRunner::new("not a url", Duration::from_secs(1), 10).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl { .. }));
    }

    #[test]
    fn render_body_pretty_prints_and_truncates() {
        assert_eq!(render_body(r#"{"a":1}"#, 100), "{\n  \"a\": 1\n}");
        assert_eq!(render_body("plain text body", 5), "plain...");
    }
}
