//! The location candidate model.
//!
//! A [`LocationCandidate`] is one *claimed* physical location surfaced by a
//! single source. Candidates are unverified: sources are allowed to be
//! wrong, vague, or to emit placeholder junk. The validator stage is the
//! only component that decides which claims survive.
//!
//! The one hard rule: a candidate with an empty (or whitespace-only) city
//! never makes it past validation. City is the minimum anchor for a usable
//! location.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collaborator produced a candidate.
///
/// `KnownHeadquarters` is reserved for the enricher's fallback seed and is
/// never a registered pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Maps/places API lookup.
    Maps,
    /// Web search engine discovery.
    WebSearch,
    /// Crawl of the company's own website.
    SiteCrawl,
    /// Regulatory filing lookup (subsidiaries, registered offices).
    Filings,
    /// Business directory lookup.
    Directory,
    /// Static well-known-headquarters seed (enricher fallback only).
    KnownHeadquarters,
}

impl SourceKind {
    /// Stable string form, used in logs and session notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Maps => "maps",
            SourceKind::WebSearch => "web_search",
            SourceKind::SiteCrawl => "site_crawl",
            SourceKind::Filings => "filings",
            SourceKind::Directory => "directory",
            SourceKind::KnownHeadquarters => "known_headquarters",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One claimed physical location from one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// Stable identifier (`LOC_001`, ...), assigned by the enricher.
    pub id: Option<String>,

    /// Location or office name. May be empty; the enricher backfills it.
    #[serde(default)]
    pub name: String,

    /// Street address, if the source had one.
    #[serde(default)]
    pub address: String,

    /// City. Required for a candidate to survive validation.
    pub city: String,

    /// State or province.
    #[serde(default)]
    pub state_province: String,

    /// Country.
    #[serde(default)]
    pub country: String,

    /// Postal/ZIP code.
    #[serde(default)]
    pub postal_code: String,

    /// Phone number.
    #[serde(default)]
    pub phone: String,

    /// Location-specific website.
    #[serde(default)]
    pub website: String,

    /// Latitude, when the source provided coordinates.
    pub latitude: Option<f64>,

    /// Longitude, when the source provided coordinates.
    pub longitude: Option<f64>,

    /// Free-text facility classification ("office", "warehouse", ...).
    #[serde(default)]
    pub facility_type: String,

    /// Which collaborator produced this claim.
    pub source: SourceKind,

    /// Source-assigned heuristic trust in [0, 1].
    pub confidence: f64,

    /// Provenance: page or query the claim came from.
    #[serde(default)]
    pub source_url: String,
}

impl LocationCandidate {
    /// Create a candidate with the minimum usable fields.
    pub fn new(source: SourceKind, city: impl Into<String>) -> Self {
        Self {
            id: None,
            name: String::new(),
            address: String::new(),
            city: city.into(),
            state_province: String::new(),
            country: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            website: String::new(),
            latitude: None,
            longitude: None,
            facility_type: String::new(),
            source,
            confidence: 0.5,
            source_url: String::new(),
        }
    }

    /// Set the location name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the state or province.
    pub fn with_state_province(mut self, state: impl Into<String>) -> Self {
        self.state_province = state.into();
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the postal code.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// Set coordinates.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the facility type.
    pub fn with_facility_type(mut self, facility_type: impl Into<String>) -> Self {
        self.facility_type = facility_type.into();
        self
    }

    /// Set the source-assigned confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set the provenance URL or query string.
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// True when the city field is usable (non-empty after trimming).
    pub fn has_city(&self) -> bool {
        !self.city.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fields() {
        let candidate = LocationCandidate::new(SourceKind::Maps, "Austin")
            .with_name("HQ")
            .with_address("500 W 2nd St")
            .with_coordinates(30.26, -97.74)
            .with_confidence(0.9);

        assert_eq!(candidate.city, "Austin");
        assert_eq!(candidate.name, "HQ");
        assert_eq!(candidate.latitude, Some(30.26));
        assert_eq!(candidate.source, SourceKind::Maps);
        assert!(candidate.id.is_none());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let candidate = LocationCandidate::new(SourceKind::Directory, "Oslo").with_confidence(1.7);
        assert_eq!(candidate.confidence, 1.0);
    }

    #[test]
    fn test_has_city() {
        assert!(LocationCandidate::new(SourceKind::Maps, "Austin").has_city());
        assert!(!LocationCandidate::new(SourceKind::Maps, "   ").has_city());
        assert!(!LocationCandidate::new(SourceKind::Maps, "").has_city());
    }

    #[test]
    fn test_source_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SourceKind::WebSearch).unwrap();
        assert_eq!(json, "\"web_search\"");
    }
}
