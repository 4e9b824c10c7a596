//! Trait seams for external collaborators.
//!
//! Everything the pipeline does not own lives behind a trait here: where
//! candidates come from ([`LocationSource`]), how the web is searched
//! ([`WebSearcher`]), how raw text becomes structured candidates
//! ([`CandidateExtractor`]), and the headquarters fallback
//! ([`HeadquartersLookup`]).

pub mod extractor;
pub mod headquarters;
pub mod searcher;
pub mod source;

pub use extractor::{CandidateExtractor, MockCandidateExtractor};
pub use headquarters::{HeadquartersEntry, HeadquartersLookup, StaticHeadquarters};
pub use searcher::{MockWebSearcher, SearchHit, TavilyWebSearcher, WebSearcher};
pub use source::LocationSource;
