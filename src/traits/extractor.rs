//! The natural-language extraction seam.
//!
//! Search hits and crawled pages arrive as unstructured text. Turning that
//! text into [`LocationCandidate`]s is a non-deterministic language-model
//! problem the library deliberately does not solve; callers plug in their
//! own implementation (an LLM prompt, a regex battery, a human, whatever).
//!
//! The contract is loose on purpose: an extractor may return an empty list
//! for text it cannot interpret, and should reserve errors for transport
//! failures (the model endpoint being down, not the text being unhelpful).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::SourceResult;
use crate::types::candidate::LocationCandidate;

/// Turns raw text about a company into structured location candidates.
#[async_trait]
pub trait CandidateExtractor: Send + Sync {
    /// Extract candidates for `company_name` from a blob of text.
    async fn extract(
        &self,
        company_name: &str,
        text: &str,
    ) -> SourceResult<Vec<LocationCandidate>>;
}

/// Mock extractor for testing.
///
/// Returns scripted candidates when the input text contains a configured
/// trigger substring; empty otherwise.
#[derive(Default)]
pub struct MockCandidateExtractor {
    scripted: RwLock<HashMap<String, Vec<LocationCandidate>>>,
}

impl MockCandidateExtractor {
    /// Create a new mock extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `candidates` whenever the input text contains `trigger`.
    pub fn with_candidates(self, trigger: &str, candidates: Vec<LocationCandidate>) -> Self {
        self.scripted
            .write()
            .unwrap()
            .insert(trigger.to_string(), candidates);
        self
    }
}

#[async_trait]
impl CandidateExtractor for MockCandidateExtractor {
    async fn extract(
        &self,
        _company_name: &str,
        text: &str,
    ) -> SourceResult<Vec<LocationCandidate>> {
        let scripted = self.scripted.read().unwrap();
        let mut out = Vec::new();
        for (trigger, candidates) in scripted.iter() {
            if text.contains(trigger.as_str()) {
                out.extend(candidates.iter().cloned());
            }
        }
        Ok(out)
    }
}
