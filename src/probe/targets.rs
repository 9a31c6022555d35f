//! Endpoints the probe checks on a remote deployment.

/// One GET request issued by the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Path relative to the base URL, with a leading slash.
    pub path: String,
    /// Query parameters appended in order.
    pub query: Vec<(String, String)>,
}

impl ProbeTarget {
    /// Target with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Path plus query string, for display.
    pub fn display(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// The standard smoke-test sweep over the picks backend.
pub fn default_targets(game_id: &str) -> Vec<ProbeTarget> {
    vec![
        ProbeTarget::new("/api/health"),
        ProbeTarget::new("/immediate/games").param("sport_key", "baseball_mlb"),
        ProbeTarget::new("/immediate/working-player-props").param("game_id", game_id),
        ProbeTarget::new("/parlays/working-parlays").param("limit", 5),
        ProbeTarget::new("/parlays/monte-carlo-simulation").param("simulations", 1000),
        ProbeTarget::new("/api/sports/30/picks/player-props").param("limit", 10),
        ProbeTarget::new("/admin/sql"),
    ]
}
