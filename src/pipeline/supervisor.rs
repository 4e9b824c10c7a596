//! Completion-driven routing.
//!
//! The supervisor is a pure function of session state: it scans the slots
//! in a fixed priority order (declared source order, then aggregate, then
//! dedupe, then enrich) and routes to the first stage whose slot is still
//! absent. No hidden counters, no "current stage" field. That makes the
//! loop resumable: hand the supervisor a half-finished session and it
//! always picks the correct next step, and hand it a finished one and it
//! says [`NextStep::End`] without touching anything.

use crate::types::candidate::SourceKind;
use crate::types::session::DiscoverySession;

/// Where the pipeline should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Run the source stage that owns this slot.
    Source(SourceKind),
    /// Concatenate all source slots.
    Aggregate,
    /// Validate and deduplicate the aggregate.
    Dedupe,
    /// Assign ids, backfill names, apply the headquarters fallback.
    Enrich,
    /// Every slot is present; halt.
    End,
}

/// Select the next stage for a session.
///
/// `declared_order` is the pipeline's source priority order; it decides
/// both which source runs first and the order candidates appear in the
/// aggregate.
pub fn next_step(session: &DiscoverySession, declared_order: &[SourceKind]) -> NextStep {
    for kind in declared_order {
        if !session.source_ran(*kind) {
            return NextStep::Source(*kind);
        }
    }

    if session.aggregated.is_none() {
        return NextStep::Aggregate;
    }
    if session.deduplicated.is_none() {
        return NextStep::Dedupe;
    }
    if session.final_locations.is_none() {
        return NextStep::Enrich;
    }

    NextStep::End
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &[SourceKind] = &[SourceKind::Maps, SourceKind::WebSearch];

    #[test]
    fn test_routes_sources_in_declared_order() {
        let mut session = DiscoverySession::new("Acme", None);
        assert_eq!(
            next_step(&session, ORDER),
            NextStep::Source(SourceKind::Maps)
        );

        session.source_results.insert(SourceKind::Maps, vec![]);
        assert_eq!(
            next_step(&session, ORDER),
            NextStep::Source(SourceKind::WebSearch)
        );
    }

    #[test]
    fn test_processing_stages_after_sources() {
        let mut session = DiscoverySession::new("Acme", None);
        session.source_results.insert(SourceKind::Maps, vec![]);
        session.source_results.insert(SourceKind::WebSearch, vec![]);

        assert_eq!(next_step(&session, ORDER), NextStep::Aggregate);

        session.aggregated = Some(vec![]);
        assert_eq!(next_step(&session, ORDER), NextStep::Dedupe);

        session.deduplicated = Some(vec![]);
        assert_eq!(next_step(&session, ORDER), NextStep::Enrich);
    }

    #[test]
    fn test_end_when_every_slot_present() {
        let mut session = DiscoverySession::new("Acme", None);
        session.source_results.insert(SourceKind::Maps, vec![]);
        session.source_results.insert(SourceKind::WebSearch, vec![]);
        session.aggregated = Some(vec![]);
        session.deduplicated = Some(vec![]);
        session.final_locations = Some(vec![]);

        assert_eq!(next_step(&session, ORDER), NextStep::End);
    }

    #[test]
    fn test_routing_is_pure() {
        let session = DiscoverySession::new("Acme", None);
        let first = next_step(&session, ORDER);
        let second = next_step(&session, ORDER);
        assert_eq!(first, second);
    }
}
