//! Source implementations.
//!
//! Most sources are expected to live in the application, implemented
//! against [`LocationSource`]. The library ships one reference
//! implementation, [`WebSearchSource`], because search-driven discovery is
//! the common case and its mechanics (query templating, snippet handling,
//! provenance stamping) are provider-independent.
//!
//! [`LocationSource`]: crate::traits::LocationSource

pub mod web_search;

pub use web_search::WebSearchSource;
