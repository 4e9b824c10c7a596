//! The source stage wrapper.
//!
//! Every source stage follows the same contract, so there is exactly one
//! wrapper: presence-check for idempotence, optional time budget, and
//! total failure isolation. A collaborator failure becomes an empty slot
//! plus an error note; absence is reserved for "not attempted".

use std::time::Duration;

use tracing::{info, warn};

use crate::error::SourceError;
use crate::traits::source::LocationSource;
use crate::types::session::DiscoverySession;

/// Run one source stage to completion.
///
/// No-op when the stage's slot already exists. Never returns an error:
/// collaborator failures are recorded on the session and the slot is set
/// to an empty list so the supervisor moves on.
pub async fn run_source_stage(
    session: &mut DiscoverySession,
    source: &dyn LocationSource,
    timeout: Option<Duration>,
) {
    let kind = source.kind();
    if session.source_ran(kind) {
        return;
    }

    let outcome = match timeout {
        Some(budget) => {
            match tokio::time::timeout(
                budget,
                source.discover(&session.company_name, &session.company_url),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout {
                    seconds: budget.as_secs(),
                }),
            }
        }
        None => {
            source
                .discover(&session.company_name, &session.company_url)
                .await
        }
    };

    match outcome {
        Ok(candidates) => {
            info!(
                source = %kind,
                company = %session.company_name,
                found = candidates.len(),
                "source stage completed"
            );
            session.note(format!("{kind} found {} locations", candidates.len()));
            session.source_results.insert(kind, candidates);
        }
        Err(err) => {
            warn!(
                source = %kind,
                company = %session.company_name,
                error = %err,
                "source stage failed"
            );
            session.record_error(format!("{kind}: {err}"));
            session.note(format!("{kind} failed, continuing without it"));
            session.source_results.insert(kind, vec![]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingSource, MockSource, SlowSource};
    use crate::types::candidate::{LocationCandidate, SourceKind};

    #[tokio::test]
    async fn test_success_sets_slot_and_notes() {
        let mut session = DiscoverySession::new("Acme", None);
        let source = MockSource::new(SourceKind::Maps)
            .with_candidate(LocationCandidate::new(SourceKind::Maps, "Austin"));

        run_source_stage(&mut session, &source, None).await;

        assert_eq!(session.source_results[&SourceKind::Maps].len(), 1);
        assert!(session.log.iter().any(|l| l.contains("found 1")));
        assert!(session.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failure_sets_empty_slot_and_error() {
        let mut session = DiscoverySession::new("Acme", None);
        let source = FailingSource::new(SourceKind::Filings, "registry unavailable");

        run_source_stage(&mut session, &source, None).await;

        assert!(session.source_ran(SourceKind::Filings));
        assert!(session.source_results[&SourceKind::Filings].is_empty());
        assert_eq!(session.errors.len(), 1);
        assert!(session.errors[0].contains("registry unavailable"));
    }

    #[tokio::test]
    async fn test_rerun_is_noop() {
        let mut session = DiscoverySession::new("Acme", None);
        let source = MockSource::new(SourceKind::Maps)
            .with_candidate(LocationCandidate::new(SourceKind::Maps, "Austin"));

        run_source_stage(&mut session, &source, None).await;
        run_source_stage(&mut session, &source, None).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(session.log.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_isolated() {
        let mut session = DiscoverySession::new("Acme", None);
        let source = SlowSource::new(SourceKind::Directory, Duration::from_secs(60));

        run_source_stage(&mut session, &source, Some(Duration::from_secs(1))).await;

        assert!(session.source_ran(SourceKind::Directory));
        assert!(session.source_results[&SourceKind::Directory].is_empty());
        assert!(session.errors[0].contains("timed out"));
    }
}
