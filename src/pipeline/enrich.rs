//! Enrichment and the headquarters fallback.

use tracing::info;

use crate::traits::headquarters::HeadquartersLookup;
use crate::types::session::DiscoverySession;

/// Enrich `deduplicated` into `final_locations`.
///
/// Assigns stable `LOC_NNN` identifiers in final order and backfills
/// missing names as `"{company} - {city}"`. When nothing survived
/// validation, a headquarters lookup (if provided) may seed a single
/// well-known record; otherwise the final list is legitimately empty.
/// No-op when the slot already exists.
pub fn run_enrich(session: &mut DiscoverySession, headquarters: Option<&dyn HeadquartersLookup>) {
    if session.final_locations.is_some() {
        return;
    }

    let mut locations = session.deduplicated.clone().unwrap_or_default();

    if locations.is_empty() {
        if let Some(seed) = headquarters.and_then(|hq| hq.lookup(&session.company_name)) {
            info!(
                company = %session.company_name,
                city = %seed.city,
                "seeding final list from known-headquarters table"
            );
            session.note(format!(
                "no source data; using known headquarters in {}",
                seed.city
            ));
            locations.push(seed);
        } else {
            info!(
                company = %session.company_name,
                "no source produced usable locations"
            );
            session.note("no locations found by any source");
        }
    }

    for (index, location) in locations.iter_mut().enumerate() {
        location.id = Some(format!("LOC_{:03}", index + 1));
        if location.name.trim().is_empty() {
            location.name = format!("{} - {}", session.company_name, location.city);
        }
    }

    if !locations.is_empty() {
        session.note(format!("enriched {} locations", locations.len()));
    }
    session.final_locations = Some(locations);
}
