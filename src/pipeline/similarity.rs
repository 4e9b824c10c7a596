//! Swappable same-location matching.
//!
//! The fuzzy-merge step of validation asks "are these two candidates the
//! same physical place?". The default answer, [`ContainmentPolicy`], is a
//! deliberately crude best-effort heuristic: case-folded substring
//! containment between names ("HQ" vs "Headquarters Office" do *not*
//! match; "Acme Austin" vs "Acme Austin Office" do). It is a policy object
//! rather than inline string logic precisely so a deployment can swap in
//! token-set or edit-distance matching without touching the pipeline.

use crate::types::candidate::LocationCandidate;

/// Decides whether two candidates in the same city describe one location.
///
/// Implementations may assume the caller only compares candidates whose
/// (case-folded) cities already match.
pub trait SimilarityPolicy: Send + Sync {
    /// True when `a` and `b` should be merged into one record.
    fn same_location(&self, a: &LocationCandidate, b: &LocationCandidate) -> bool;
}

/// Best-effort containment matching on names.
///
/// Candidates with an empty name never match: an empty string is trivially
/// a substring of everything, which would collapse a whole city into one
/// record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentPolicy;

impl SimilarityPolicy for ContainmentPolicy {
    fn same_location(&self, a: &LocationCandidate, b: &LocationCandidate) -> bool {
        let a_name = a.name.trim().to_lowercase();
        let b_name = b.name.trim().to_lowercase();
        if a_name.is_empty() || b_name.is_empty() {
            return false;
        }
        a_name.contains(&b_name) || b_name.contains(&a_name)
    }
}
