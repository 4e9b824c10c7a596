//! The source collaborator seam.
//!
//! Each external data source (maps API, web search, site crawler, filings,
//! directory) implements [`LocationSource`]. The pipeline treats every
//! implementation as an opaque `(company identity) -> candidates` function:
//! how a source finds candidates is its own business.
//!
//! Implementations should convert *expected* failure modes (missing
//! credentials, network trouble, zero results) into `Ok(vec![])` or a
//! [`SourceError`] rather than panicking; the stage wrapper records any
//! error on the session and keeps the run alive either way.
//!
//! [`SourceError`]: crate::error::SourceError

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::candidate::{LocationCandidate, SourceKind};

/// An external collaborator that can surface location candidates for a
/// company.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Which provenance tag (and session slot) this source owns.
    fn kind(&self) -> SourceKind;

    /// Look up candidates for a company.
    ///
    /// `company_url` is the session's normalized URL and may be empty;
    /// URL-driven sources should return an empty list in that case rather
    /// than erroring.
    async fn discover(
        &self,
        company_name: &str,
        company_url: &str,
    ) -> SourceResult<Vec<LocationCandidate>>;
}
