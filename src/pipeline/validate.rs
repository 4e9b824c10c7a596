//! Validation and deduplication.
//!
//! Three passes over the aggregate, in order:
//!
//! 1. **Plausibility filter**: drop candidates with no usable city and
//!    candidates whose city/name/address carries a placeholder marker
//!    (sources occasionally emit "unknown location"-style filler instead
//!    of admitting they found nothing).
//! 2. **Exact-key dedup**: composite key of case-folded city plus the
//!    first N characters of the case-folded name; first seen wins. The
//!    key is deterministic, so the output depends only on aggregate order.
//! 3. **Fuzzy merge**: within one city, candidates the
//!    [`SimilarityPolicy`] considers the same location collapse into the
//!    first one seen.
//!
//! Output candidates have every textual field trimmed and the city
//! title-cased for display. This stage cannot fail on valid input.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::similarity::SimilarityPolicy;
use crate::types::candidate::LocationCandidate;
use crate::types::config::DiscoveryConfig;
use crate::types::session::DiscoverySession;

/// Validate and deduplicate `aggregated` into `deduplicated`.
///
/// No-op when the slot already exists.
pub fn run_validate(
    session: &mut DiscoverySession,
    config: &DiscoveryConfig,
    similarity: &dyn SimilarityPolicy,
) {
    if session.deduplicated.is_some() {
        return;
    }

    let aggregated = session.aggregated.clone().unwrap_or_default();
    let total = aggregated.len();

    // Pass 1: plausibility.
    let mut dropped = 0usize;
    let plausible: Vec<LocationCandidate> = aggregated
        .into_iter()
        .filter(|candidate| {
            if !candidate.has_city() {
                debug!(
                    company = %session.company_name,
                    name = %candidate.name,
                    "dropped candidate without city"
                );
                dropped += 1;
                return false;
            }
            if let Some(marker) = placeholder_marker(candidate, &config.placeholder_markers) {
                info!(
                    company = %session.company_name,
                    name = %candidate.name,
                    city = %candidate.city,
                    marker,
                    "dropped placeholder candidate"
                );
                dropped += 1;
                return false;
            }
            true
        })
        .collect();

    // Pass 2: exact-key dedup, first seen wins.
    let mut by_key: IndexMap<(String, String), LocationCandidate> = IndexMap::new();
    for candidate in plausible {
        let key = dedup_key(&candidate, config.dedup_name_prefix);
        by_key.entry(key).or_insert(candidate);
    }

    // Pass 3: fuzzy merge within a city.
    let mut kept: Vec<LocationCandidate> = Vec::with_capacity(by_key.len());
    for candidate in by_key.into_values() {
        let city_folded = candidate.city.trim().to_lowercase();
        let duplicate = kept.iter().any(|existing| {
            existing.city.trim().to_lowercase() == city_folded
                && similarity.same_location(existing, &candidate)
        });
        if duplicate {
            debug!(
                company = %session.company_name,
                name = %candidate.name,
                city = %candidate.city,
                "fuzzy-merged candidate"
            );
            continue;
        }
        kept.push(normalize_fields(candidate));
    }

    info!(
        company = %session.company_name,
        before = total,
        after = kept.len(),
        dropped,
        "validated and deduplicated candidates"
    );
    session.note(format!(
        "deduplicated {total} candidates to {} unique locations",
        kept.len()
    ));
    session.deduplicated = Some(kept);
}

/// The marker that flags a candidate as placeholder data, if any.
fn placeholder_marker<'a>(
    candidate: &LocationCandidate,
    markers: &'a [String],
) -> Option<&'a str> {
    let city = candidate.city.to_lowercase();
    let name = candidate.name.to_lowercase();
    let address = candidate.address.to_lowercase();

    markers
        .iter()
        .find(|marker| {
            let marker = marker.to_lowercase();
            city.contains(&marker) || name.contains(&marker) || address.contains(&marker)
        })
        .map(String::as_str)
}

/// Composite dedup key: folded city plus a bounded name prefix.
fn dedup_key(candidate: &LocationCandidate, name_prefix: usize) -> (String, String) {
    let city = candidate.city.trim().to_lowercase();
    let name: String = candidate
        .name
        .trim()
        .to_lowercase()
        .chars()
        .take(name_prefix)
        .collect();
    (city, name)
}

/// Trim every textual field and title-case the city for display.
fn normalize_fields(mut candidate: LocationCandidate) -> LocationCandidate {
    candidate.name = candidate.name.trim().to_string();
    candidate.address = candidate.address.trim().to_string();
    candidate.city = title_case(candidate.city.trim());
    candidate.state_province = candidate.state_province.trim().to_string();
    candidate.country = candidate.country.trim().to_string();
    candidate.postal_code = candidate.postal_code.trim().to_string();
    candidate.phone = candidate.phone.trim().to_string();
    candidate.website = candidate.website.trim().to_string();
    candidate.facility_type = candidate.facility_type.trim().to_string();
    candidate.source_url = candidate.source_url.trim().to_string();
    candidate
}

/// Word-wise title casing ("new york" -> "New York").
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
