//! Company URL normalization.
//!
//! Company URLs arrive from CSV uploads and form fields, which means they
//! arrive as "adp.com", "  https://adp.com  ", "N/A", "nan", or nothing at
//! all. This runs exactly once per session; the result is immutable for the
//! rest of the run.

use url::Url;

/// Sentinel values that mean "no URL", case-insensitive.
const ABSENT_SENTINELS: &[&str] = &["", "nan", "none", "null", "n/a", "na"];

/// Clean and validate a raw company URL.
///
/// Returns a syntactically valid absolute URL, or the empty string when the
/// input is absent, a sentinel, or unparseable. A schemeless value gets
/// `https://` prepended before validation.
pub fn clean_company_url(raw: &str) -> String {
    let trimmed = raw.trim();

    let lower = trimmed.to_lowercase();
    if ABSENT_SENTINELS.contains(&lower.as_str()) {
        return String::new();
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    match Url::parse(&candidate) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => candidate,
        Ok(_) => {
            tracing::debug!(url = raw, "rejected URL with no host");
            String::new()
        }
        Err(err) => {
            tracing::debug!(url = raw, error = %err, "URL validation failed");
            String::new()
        }
    }
}
