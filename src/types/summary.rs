//! Derived per-run report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::candidate::SourceKind;
use super::session::SessionStatus;

/// A compact report over a finished (or failed) session.
///
/// Computed on demand by [`DiscoverySession::summary`]; it is not a pipeline
/// slot and holds no state of its own.
///
/// [`DiscoverySession::summary`]: super::session::DiscoverySession::summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySummary {
    /// Company the run was for.
    pub company_name: String,

    /// Normalized company URL ("" when none was usable).
    pub company_url: String,

    /// Whether a usable URL was available to URL-driven sources.
    pub url_provided: bool,

    /// Session status at the time the summary was built.
    pub status: SessionStatus,

    /// Number of locations in the final list.
    pub total_locations: usize,

    /// Raw candidate counts per source stage that ran.
    pub candidates_per_source: IndexMap<SourceKind, usize>,

    /// Number of non-fatal error notes recorded.
    pub error_count: usize,
}
