//! The discovery pipeline: supervisor loop plus stage handlers.
//!
//! [`DiscoveryPipeline`] owns the registered sources (in priority order),
//! the config, and the two injectable policies (similarity matching and
//! the headquarters fallback). Running a session is strictly sequential:
//! the supervisor picks a stage, the stage runs to completion and fills
//! its slot, control returns to the supervisor. Sessions share no mutable
//! state, so callers are free to run many sessions concurrently.

pub mod aggregate;
pub mod enrich;
pub mod similarity;
pub mod stage;
pub mod supervisor;
pub mod validate;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{DiscoveryError, Result};
use crate::traits::headquarters::HeadquartersLookup;
use crate::traits::source::LocationSource;
use crate::types::candidate::SourceKind;
use crate::types::config::DiscoveryConfig;
use crate::types::session::{DiscoverySession, SessionStatus};

pub use aggregate::run_aggregate;
pub use enrich::run_enrich;
pub use similarity::{ContainmentPolicy, SimilarityPolicy};
pub use stage::run_source_stage;
pub use supervisor::{next_step, NextStep};
pub use validate::run_validate;

/// The orchestration pipeline for company location discovery.
pub struct DiscoveryPipeline {
    sources: Vec<Arc<dyn LocationSource>>,
    config: DiscoveryConfig,
    headquarters: Option<Arc<dyn HeadquartersLookup>>,
    similarity: Arc<dyn SimilarityPolicy>,
}

impl DiscoveryPipeline {
    /// Create an empty pipeline with default config and containment-based
    /// fuzzy matching.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            config: DiscoveryConfig::default(),
            headquarters: None,
            similarity: Arc::new(ContainmentPolicy),
        }
    }

    /// Register a source. Registration order is priority order: it decides
    /// which stage runs first and how the aggregate is ordered.
    ///
    /// One source per [`SourceKind`]: a duplicate registration is ignored
    /// (the slot it would write is already owned), as is the reserved
    /// `KnownHeadquarters` tag.
    pub fn with_source(mut self, source: impl LocationSource + 'static) -> Self {
        let kind = source.kind();
        if kind == SourceKind::KnownHeadquarters {
            warn!(source = %kind, "ignoring source with reserved kind");
            return self;
        }
        if self.sources.iter().any(|s| s.kind() == kind) {
            warn!(source = %kind, "ignoring duplicate source registration");
            return self;
        }
        self.sources.push(Arc::new(source));
        self
    }

    /// Set the pipeline configuration.
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the known-headquarters fallback used by the enricher.
    pub fn with_headquarters(mut self, lookup: impl HeadquartersLookup + 'static) -> Self {
        self.headquarters = Some(Arc::new(lookup));
        self
    }

    /// Replace the fuzzy-merge policy.
    pub fn with_similarity(mut self, policy: impl SimilarityPolicy + 'static) -> Self {
        self.similarity = Arc::new(policy);
        self
    }

    /// The declared source priority order.
    pub fn declared_order(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Run discovery for one company.
    ///
    /// Always returns the session: an internal fault marks it `Failed`
    /// with the cause in `errors`, while "nothing found" is a `Completed`
    /// session with an empty final list. Consumers branch on `status`.
    pub async fn run(&self, company_name: &str, company_url: Option<&str>) -> DiscoverySession {
        let mut session = DiscoverySession::new(company_name, company_url);
        info!(
            company = company_name,
            url = %session.company_url,
            session_id = %session.id,
            "starting discovery"
        );

        if let Err(err) = self.run_to_completion(&mut session).await {
            error!(
                company = company_name,
                session_id = %session.id,
                error = %err,
                "discovery failed"
            );
            session.status = SessionStatus::Failed;
            session.record_error(err.to_string());
        }

        session
    }

    /// Drive a session until the supervisor reports `End`.
    ///
    /// Safe to call on a partially completed session (it resumes at the
    /// first absent slot) and on a finished one (immediate no-op). The
    /// iteration cap bounds pathological cycles; hitting it means a stage
    /// failed to set its slot.
    pub async fn run_to_completion(&self, session: &mut DiscoverySession) -> Result<()> {
        let order = self.declared_order();
        let mut iterations = 0usize;

        loop {
            let step = next_step(session, &order);

            if step == NextStep::End {
                if session.status != SessionStatus::Completed {
                    session.status = SessionStatus::Completed;
                    session.note(format!(
                        "discovery completed with {} locations",
                        session.final_locations.as_ref().map(Vec::len).unwrap_or(0)
                    ));
                }
                return Ok(());
            }

            iterations += 1;
            if iterations > self.config.max_iterations {
                return Err(DiscoveryError::IterationLimit {
                    iterations: self.config.max_iterations,
                });
            }
            session.status = SessionStatus::Running;

            match step {
                NextStep::Source(kind) => {
                    let source = self
                        .sources
                        .iter()
                        .find(|s| s.kind() == kind)
                        .ok_or_else(|| DiscoveryError::UnknownStage {
                            kind: kind.to_string(),
                        })?;
                    run_source_stage(session, source.as_ref(), self.config.source_timeout()).await;
                }
                NextStep::Aggregate => run_aggregate(session, &order),
                NextStep::Dedupe => {
                    run_validate(session, &self.config, self.similarity.as_ref())
                }
                NextStep::Enrich => run_enrich(session, self.headquarters.as_deref()),
                NextStep::End => unreachable!("handled above"),
            }
        }
    }
}

impl Default for DiscoveryPipeline {
    fn default() -> Self {
        Self::new()
    }
}
