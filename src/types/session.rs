//! The shared state for one company's discovery run.
//!
//! A [`DiscoverySession`] is threaded explicitly through every stage: each
//! stage takes the session mutably, transitions exactly one slot from
//! absent to present, and hands it back. There are no ambient globals, and
//! no stage ever rewrites another stage's slot.
//!
//! Slot presence is the scheduling signal. A source slot holding an empty
//! list means "this stage ran and found nothing"; a missing key means "not
//! attempted yet". That distinction is what makes the supervisor resumable:
//! routing is a pure function of which slots exist.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::candidate::{LocationCandidate, SourceKind};
use super::summary::DiscoverySummary;
use crate::normalize::clean_company_url;

/// Lifecycle status of a discovery session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created, supervisor loop not started.
    Pending,
    /// Supervisor loop in progress.
    Running,
    /// Loop finished normally. An empty `final_locations` is still a
    /// legitimate "nothing found" answer.
    Completed,
    /// An internal fault aborted the loop. Distinct from "completed with
    /// zero locations"; consumers must branch on status, not emptiness.
    Failed,
}

/// Mutable state for one discovery request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySession {
    /// Unique id for this run.
    pub id: Uuid,

    /// The company being investigated.
    pub company_name: String,

    /// Cleaned company URL, or empty when none was usable. Normalized once
    /// at construction and immutable afterwards.
    pub company_url: String,

    /// Per-source output slots. Key presence means the stage ran; the list
    /// may legitimately be empty.
    pub source_results: IndexMap<SourceKind, Vec<LocationCandidate>>,

    /// Lossless concatenation of all source slots.
    pub aggregated: Option<Vec<LocationCandidate>>,

    /// Validated and deduplicated candidates.
    pub deduplicated: Option<Vec<LocationCandidate>>,

    /// Terminal output consumers read.
    pub final_locations: Option<Vec<LocationCandidate>>,

    /// Append-only human-readable progress notices.
    pub log: Vec<String>,

    /// Append-only non-fatal error notes (one per failed stage).
    pub errors: Vec<String>,

    /// Lifecycle status.
    pub status: SessionStatus,

    /// When the session was created.
    pub started_at: DateTime<Utc>,
}

impl DiscoverySession {
    /// Create a session for a company. The URL is cleaned exactly once
    /// here; a sentinel or unparseable value becomes the empty string.
    pub fn new(company_name: impl Into<String>, company_url: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            company_url: clean_company_url(company_url.unwrap_or_default()),
            source_results: IndexMap::new(),
            aggregated: None,
            deduplicated: None,
            final_locations: None,
            log: Vec::new(),
            errors: Vec::new(),
            status: SessionStatus::Pending,
            started_at: Utc::now(),
        }
    }

    /// Append a progress notice.
    pub fn note(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }

    /// Append a non-fatal error note.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Whether a source stage has already run (its slot exists).
    pub fn source_ran(&self, kind: SourceKind) -> bool {
        self.source_results.contains_key(&kind)
    }

    /// Total candidates currently sitting in source slots.
    pub fn source_candidate_count(&self) -> usize {
        self.source_results.values().map(Vec::len).sum()
    }

    /// Build the derived per-run report.
    pub fn summary(&self) -> DiscoverySummary {
        DiscoverySummary {
            company_name: self.company_name.clone(),
            company_url: self.company_url.clone(),
            url_provided: !self.company_url.is_empty(),
            status: self.status,
            total_locations: self
                .final_locations
                .as_ref()
                .map(Vec::len)
                .unwrap_or_default(),
            candidates_per_source: self
                .source_results
                .iter()
                .map(|(kind, candidates)| (*kind, candidates.len()))
                .collect(),
            error_count: self.errors.len(),
        }
    }
}
