//! Web searcher trait for open-world discovery.
//!
//! Search-driven sources need a way to turn "Acme Corp office locations"
//! into pages worth reading. This trait abstracts over search providers
//! (Tavily, SerpAPI, Google Custom Search, etc.) so the
//! [`WebSearchSource`] stays provider-agnostic.
//!
//! The searcher only *finds* text; turning snippets into structured
//! candidates is the [`CandidateExtractor`]'s job.
//!
//! [`WebSearchSource`]: crate::sources::WebSearchSource
//! [`CandidateExtractor`]: super::extractor::CandidateExtractor

use async_trait::async_trait;
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::security::SecretString;

/// A hit from a web search with metadata.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The discovered URL.
    pub url: Url,

    /// Title of the page, if the provider returned one.
    pub title: Option<String>,

    /// Snippet/content excerpt from the search results.
    pub snippet: Option<String>,

    /// Relevance score (0.0-1.0, if provided by the search API).
    pub score: Option<f32>,
}

impl SearchHit {
    /// Create a new hit from a URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            snippet: None,
            score: None,
        }
    }

    /// Create from a URL string.
    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url).ok().map(Self::new)
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Add a relevance score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Web search seam for search-driven sources.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for pages relevant to the query.
    async fn search(&self, query: &str) -> SourceResult<Vec<SearchHit>>;

    /// Search with a specific result limit.
    async fn search_with_limit(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>> {
        let mut hits = self.search(query).await?;
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    results: std::sync::RwLock<std::collections::HashMap<String, Vec<SearchHit>>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add hits for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().insert(query.to_string(), hits);
        self
    }

    /// Add URL strings as hits, each carrying the given snippet.
    pub fn with_pages(self, query: &str, pages: &[(&str, &str)]) -> Self {
        let hits: Vec<_> = pages
            .iter()
            .filter_map(|(url, snippet)| {
                SearchHit::from_url(url).map(|h| h.with_snippet(*snippet))
            })
            .collect();
        self.with_hits(query, hits)
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> SourceResult<Vec<SearchHit>> {
        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Tavily-backed web searcher.
pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    /// Default number of results to return.
    pub default_limit: usize,
}

impl TavilyWebSearcher {
    /// Create a new Tavily web searcher.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            client: reqwest::Client::new(),
            default_limit: 5,
        }
    }

    /// Set the default result limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    async fn search(&self, query: &str) -> SourceResult<Vec<SearchHit>> {
        self.search_with_limit(query, self.default_limit).await
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>> {
        #[derive(serde::Serialize)]
        struct Request {
            query: String,
            search_depth: String,
            max_results: usize,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            results: Vec<TavilyResult>,
        }

        #[derive(serde::Deserialize)]
        struct TavilyResult {
            url: String,
            title: Option<String>,
            content: Option<String>,
            score: Option<f32>,
        }

        let request = Request {
            query: query.to_string(),
            search_depth: "basic".to_string(),
            max_results: limit,
        };

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Other(format!(
                "Tavily API error: {}",
                response.status()
            )));
        }

        let tavily_response: Response = response
            .json()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        let hits = tavily_response
            .results
            .into_iter()
            .filter_map(|r| {
                let url = Url::parse(&r.url).ok()?;
                let mut hit = SearchHit::new(url);
                if let Some(title) = r.title {
                    hit = hit.with_title(title);
                }
                if let Some(content) = r.content {
                    hit = hit.with_snippet(content);
                }
                if let Some(score) = r.score {
                    hit = hit.with_score(score);
                }
                Some(hit)
            })
            .collect();

        Ok(hits)
    }
}
