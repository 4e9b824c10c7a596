//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Note that most failures in this library are *not* errors in the Rust
//! sense: a collaborator that times out or returns nothing is recorded on
//! the session (`errors` + empty slot) and the pipeline keeps going. Only
//! contract violations inside the pipeline itself surface as
//! [`DiscoveryError`].

use thiserror::Error;

/// Errors that can occur while driving a discovery session.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The supervisor loop exceeded its iteration cap.
    ///
    /// This means a stage failed to set its owned slot, which is a
    /// programming-contract violation, not a data problem.
    #[error("supervisor iteration limit reached after {iterations} iterations")]
    IterationLimit { iterations: usize },

    /// A stage was routed to but no handler owns it.
    #[error("no source registered for stage: {kind}")]
    UnknownStage { kind: String },

    /// JSON parsing error (config data, seed tables).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Errors a source collaborator can report.
///
/// Source stages convert every variant into an empty slot plus an error
/// note on the session; none of these abort a run.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required credentials or configuration are missing.
    #[error("source not configured: {reason}")]
    NotConfigured { reason: String },

    /// HTTP or network failure.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The collaborator exceeded its time budget.
    #[error("source timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The collaborator returned data the source could not interpret.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Anything else the collaborator wants to surface.
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    /// Convenience constructor for missing-configuration failures.
    pub fn not_configured(reason: impl Into<String>) -> Self {
        Self::NotConfigured {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed collaborator output.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for source collaborators.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
