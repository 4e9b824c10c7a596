//! Multi-Source Company Location Discovery
//!
//! A pipeline that fans a company query out to several independent data
//! sources (maps APIs, web search, site crawling, filings, directories)
//! and reconciles their heterogeneous, unreliable outputs into one
//! trustworthy location list.
//!
//! # Design Philosophy
//!
//! **"Sources lie; the pipeline doesn't"**
//!
//! - Every source is an opaque collaborator behind a trait; its failures
//!   are isolated, recorded, and never abort a run
//! - All shared state lives in one explicit [`DiscoverySession`] value
//!   threaded through the stages, with no ambient globals
//! - Scheduling is completion-driven: the supervisor routes to the first
//!   stage whose slot is absent, which makes runs resumable and idempotent
//! - Heuristics (placeholder markers, fuzzy merging, headquarters seeds)
//!   are injectable data/policies, not baked-in constants
//!
//! # Usage
//!
//! ```rust,ignore
//! use discovery::{DiscoveryPipeline, SessionStatus, StaticHeadquarters};
//!
//! let pipeline = DiscoveryPipeline::new()
//!     .with_source(maps_source)
//!     .with_source(web_search_source)
//!     .with_headquarters(StaticHeadquarters::default());
//!
//! let session = pipeline.run("ADP GROUP", Some("adp.com")).await;
//!
//! match session.status {
//!     SessionStatus::Completed => {
//!         for location in session.final_locations.unwrap_or_default() {
//!             println!("{}: {}, {}", location.id.unwrap(), location.name, location.city);
//!         }
//!     }
//!     SessionStatus::Failed => eprintln!("internal fault: {:?}", session.errors),
//!     _ => unreachable!("run() always finishes the session"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (LocationSource, WebSearcher,
//!   CandidateExtractor, HeadquartersLookup)
//! - [`types`] - Candidate/session/config data types
//! - [`pipeline`] - Supervisor routing and the stage handlers
//! - [`sources`] - Reference source implementations
//! - [`normalize`] - Company URL cleaning
//! - [`security`] - Credential handling
//! - [`testing`] - Mock sources for testing

pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{DiscoveryError, SourceError};
pub use traits::{
    extractor::{CandidateExtractor, MockCandidateExtractor},
    headquarters::{HeadquartersEntry, HeadquartersLookup, StaticHeadquarters},
    searcher::{MockWebSearcher, SearchHit, TavilyWebSearcher, WebSearcher},
    source::LocationSource,
};
pub use types::{
    candidate::{LocationCandidate, SourceKind},
    config::DiscoveryConfig,
    session::{DiscoverySession, SessionStatus},
    summary::DiscoverySummary,
};

// Re-export the pipeline surface
pub use pipeline::{
    next_step, run_aggregate, run_enrich, run_source_stage, run_validate, ContainmentPolicy,
    DiscoveryPipeline, NextStep, SimilarityPolicy,
};

// Re-export sources
pub use sources::WebSearchSource;

// Re-export normalization
pub use normalize::clean_company_url;

// Re-export testing utilities
pub use testing::{FailingSource, MockSource, SlowSource};
