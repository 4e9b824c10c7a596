//! Lossless aggregation of source slots.

use tracing::info;

use crate::types::candidate::SourceKind;
use crate::types::session::DiscoverySession;

/// Concatenate every source slot into `aggregated`.
///
/// Order is the declared source priority order; candidates keep their
/// provenance tags. No filtering happens here, that is the validator's
/// job. No-op when the slot already exists.
pub fn run_aggregate(session: &mut DiscoverySession, declared_order: &[SourceKind]) {
    if session.aggregated.is_some() {
        return;
    }

    let mut all = Vec::with_capacity(session.source_candidate_count());
    for kind in declared_order {
        if let Some(candidates) = session.source_results.get(kind) {
            all.extend(candidates.iter().cloned());
        }
    }

    info!(
        company = %session.company_name,
        total = all.len(),
        "aggregated source results"
    );
    session.note(format!("aggregated {} candidates", all.len()));
    session.aggregated = Some(all);
}
