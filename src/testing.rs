//! Testing utilities including mock sources.
//!
//! These are useful for testing applications that drive the discovery
//! pipeline without making real network calls.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};
use crate::traits::source::LocationSource;
use crate::types::candidate::{LocationCandidate, SourceKind};

/// A scripted source that returns fixed candidates.
///
/// Tracks calls so tests can assert a stage ran exactly once.
pub struct MockSource {
    kind: SourceKind,
    candidates: Vec<LocationCandidate>,
    calls: RwLock<Vec<(String, String)>>,
}

impl MockSource {
    /// Create a mock source that returns nothing.
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            candidates: Vec::new(),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Add one candidate to the scripted result.
    pub fn with_candidate(mut self, candidate: LocationCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Add several candidates to the scripted result.
    pub fn with_candidates(
        mut self,
        candidates: impl IntoIterator<Item = LocationCandidate>,
    ) -> Self {
        self.candidates.extend(candidates);
        self
    }

    /// How many times `discover` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The `(company_name, company_url)` pairs this source was called with.
    pub fn called_with(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LocationSource for MockSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn discover(
        &self,
        company_name: &str,
        company_url: &str,
    ) -> SourceResult<Vec<LocationCandidate>> {
        self.calls
            .write()
            .unwrap()
            .push((company_name.to_string(), company_url.to_string()));
        Ok(self.candidates.clone())
    }
}

/// A source that always fails, for exercising failure isolation.
pub struct FailingSource {
    kind: SourceKind,
    message: String,
}

impl FailingSource {
    /// Create a failing source with the given error message.
    pub fn new(kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[async_trait]
impl LocationSource for FailingSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn discover(
        &self,
        _company_name: &str,
        _company_url: &str,
    ) -> SourceResult<Vec<LocationCandidate>> {
        Err(SourceError::Other(self.message.clone()))
    }
}

/// A source that sleeps before answering, for exercising timeouts.
pub struct SlowSource {
    kind: SourceKind,
    delay: Duration,
}

impl SlowSource {
    /// Create a slow source with the given delay.
    pub fn new(kind: SourceKind, delay: Duration) -> Self {
        Self { kind, delay }
    }
}

#[async_trait]
impl LocationSource for SlowSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn discover(
        &self,
        _company_name: &str,
        _company_url: &str,
    ) -> SourceResult<Vec<LocationCandidate>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![])
    }
}
