//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the discovery pipeline.
///
/// The whole struct is serde-deserializable, so deployments can ship the
/// placeholder-marker list (and the rest of the knobs) as data instead of
/// recompiling. The built-in defaults are a starting point, not an
/// authoritative list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Hard cap on supervisor iterations.
    ///
    /// The loop normally needs one iteration per stage plus the terminal
    /// check; hitting this cap means a stage violated its set-your-slot
    /// contract and the session is failed.
    pub max_iterations: usize,

    /// Per-source time budget in seconds. `None` disables the timeout and
    /// trusts collaborators to bound themselves.
    pub source_timeout_secs: Option<u64>,

    /// How many leading characters of the (case-folded) name participate in
    /// the exact dedup key.
    pub dedup_name_prefix: usize,

    /// Case-insensitive markers that flag a candidate as placeholder/fake
    /// data. Matched as substrings against city, name, and address.
    #[serde(default = "default_placeholder_markers")]
    pub placeholder_markers: Vec<String>,
}

fn default_placeholder_markers() -> Vec<String> {
    [
        "location search attempted",
        "no results",
        "various sources checked",
        "search performed",
        "unknown location",
        "test location",
        "example location",
        "sample location",
        "dummy location",
        "mock location",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            source_timeout_secs: None,
            dedup_name_prefix: 30,
            placeholder_markers: default_placeholder_markers(),
        }
    }
}

impl DiscoveryConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the supervisor iteration cap.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the per-source timeout.
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    /// Set the dedup key name-prefix length.
    pub fn with_dedup_name_prefix(mut self, chars: usize) -> Self {
        self.dedup_name_prefix = chars;
        self
    }

    /// Replace the placeholder-marker list.
    pub fn with_placeholder_markers(
        mut self,
        markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.placeholder_markers = markers.into_iter().map(|m| m.into()).collect();
        self
    }

    /// Per-source timeout as a `Duration`, if configured.
    pub fn source_timeout(&self) -> Option<Duration> {
        self.source_timeout_secs.map(Duration::from_secs)
    }
}
