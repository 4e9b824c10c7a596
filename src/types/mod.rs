//! Data types for the discovery pipeline.

pub mod candidate;
pub mod config;
pub mod session;
pub mod summary;

pub use candidate::{LocationCandidate, SourceKind};
pub use config::DiscoveryConfig;
pub use session::{DiscoverySession, SessionStatus};
pub use summary::DiscoverySummary;
