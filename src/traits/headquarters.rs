//! Known-headquarters lookup, the enricher's last resort.
//!
//! When every source comes back empty, the enricher consults this seam for
//! a well-known headquarters before giving up. The built-in
//! [`StaticHeadquarters`] table is intentionally small and intentionally
//! replaceable: it is seed data, not a gazetteer, and deployments are
//! expected to load their own table with [`StaticHeadquarters::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::candidate::{LocationCandidate, SourceKind};

/// Fallback lookup of well-known corporate headquarters.
pub trait HeadquartersLookup: Send + Sync {
    /// Return the headquarters for a company, if known.
    fn lookup(&self, company_name: &str) -> Option<LocationCandidate>;
}

/// One row of the static headquarters table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadquartersEntry {
    /// Case-insensitive substring matched against the company name.
    pub pattern: String,

    /// Display name for the synthesized location.
    pub name: String,

    /// Headquarters city.
    pub city: String,

    /// State or province.
    #[serde(default)]
    pub state_province: String,

    /// Country.
    #[serde(default)]
    pub country: String,
}

/// Substring-keyed static headquarters table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticHeadquarters {
    entries: Vec<HeadquartersEntry>,
}

impl StaticHeadquarters {
    /// Build a table from explicit entries.
    pub fn new(entries: Vec<HeadquartersEntry>) -> Self {
        Self { entries }
    }

    /// Load a table from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<HeadquartersEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// An empty table (the lookup never matches).
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }
}

impl Default for StaticHeadquarters {
    fn default() -> Self {
        let seed = [
            ("microsoft", "Microsoft Headquarters", "Redmond", "WA", "USA"),
            ("apple", "Apple Park", "Cupertino", "CA", "USA"),
            ("google", "Googleplex", "Mountain View", "CA", "USA"),
            ("amazon", "Amazon Headquarters", "Seattle", "WA", "USA"),
            ("walmart", "Walmart Home Office", "Bentonville", "AR", "USA"),
            ("adp", "ADP Headquarters", "Roseland", "NJ", "USA"),
        ];
        Self {
            entries: seed
                .iter()
                .map(|(pattern, name, city, state, country)| HeadquartersEntry {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                    city: city.to_string(),
                    state_province: state.to_string(),
                    country: country.to_string(),
                })
                .collect(),
        }
    }
}

impl HeadquartersLookup for StaticHeadquarters {
    fn lookup(&self, company_name: &str) -> Option<LocationCandidate> {
        let normalized = company_name.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| normalized.contains(&entry.pattern.to_lowercase()))
            .map(|entry| {
                LocationCandidate::new(SourceKind::KnownHeadquarters, &entry.city)
                    .with_name(&entry.name)
                    .with_state_province(&entry.state_province)
                    .with_country(&entry.country)
                    .with_facility_type("headquarters")
                    .with_confidence(0.95)
            })
    }
}
