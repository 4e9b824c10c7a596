//! Reference search-driven source.
//!
//! `WebSearchSource` is the mechanical half of a "search the web, read the
//! snippets" source: it issues a location-focused query through a
//! [`WebSearcher`], then hands each snippet to a [`CandidateExtractor`].
//! Provider choice and the language-model step both stay behind their
//! seams, so the same source works against Tavily in production and mocks
//! in tests.

use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceResult;
use crate::traits::extractor::CandidateExtractor;
use crate::traits::searcher::WebSearcher;
use crate::traits::source::LocationSource;
use crate::types::candidate::{LocationCandidate, SourceKind};

/// Heuristic trust assigned to candidates found via web search.
const WEB_SEARCH_CONFIDENCE: f64 = 0.75;

/// A [`LocationSource`] built from a web searcher and a snippet extractor.
pub struct WebSearchSource<W, E> {
    searcher: W,
    extractor: E,
    /// How many search hits to read per company.
    pub max_hits: usize,
}

impl<W: WebSearcher, E: CandidateExtractor> WebSearchSource<W, E> {
    /// Create a new web-search source.
    pub fn new(searcher: W, extractor: E) -> Self {
        Self {
            searcher,
            extractor,
            max_hits: 3,
        }
    }

    /// Set how many search hits to read.
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    fn query_for(company_name: &str) -> String {
        format!("{company_name} office locations addresses")
    }
}

#[async_trait]
impl<W: WebSearcher, E: CandidateExtractor> LocationSource for WebSearchSource<W, E> {
    fn kind(&self) -> SourceKind {
        SourceKind::WebSearch
    }

    async fn discover(
        &self,
        company_name: &str,
        _company_url: &str,
    ) -> SourceResult<Vec<LocationCandidate>> {
        let query = Self::query_for(company_name);
        let hits = self.searcher.search_with_limit(&query, self.max_hits).await?;

        let mut candidates = Vec::new();
        for hit in hits {
            let Some(snippet) = hit.snippet.as_deref() else {
                continue;
            };

            // One unreadable snippet should not sink the others.
            match self.extractor.extract(company_name, snippet).await {
                Ok(extracted) => {
                    for candidate in extracted {
                        if !candidate.has_city() {
                            continue;
                        }
                        candidates.push(
                            LocationCandidate {
                                source: SourceKind::WebSearch,
                                ..candidate
                            }
                            .with_confidence(WEB_SEARCH_CONFIDENCE)
                            .with_source_url(hit.url.as_str()),
                        );
                    }
                }
                Err(err) => {
                    debug!(url = %hit.url, error = %err, "snippet extraction failed");
                }
            }
        }

        Ok(candidates)
    }
}
