//! Company name heuristic

use esgscope_core::{Error, Result};
use regex::Regex;

/// Returned when no company name can be found
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Pulls a candidate company name out of raw document text.
///
/// Looks for an optional "company name:" label (or the very start of the
/// text) followed by a run of words ending in a corporate suffix such as
/// Inc, Ltd, Corp or Group. Matching is case-insensitive.
pub struct CompanyNameExtractor {
    pattern: Regex,
}

impl CompanyNameExtractor {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(
            r"(?i)(?:company\s*name\s*[:\-]?\s*|^)([a-z][a-z&,\s]+(?:inc|ltd|corporation|corp|llc|group|co\.|limited))",
        )
        .map_err(|e| Error::config(format!("Failed to compile company name regex: {}", e)))?;

        Ok(Self { pattern })
    }

    /// Extract the company name, or [`UNKNOWN_COMPANY`]
    pub fn extract(&self, text: &str) -> String {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|name| name.as_str().trim().to_string())
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
    }
}

impl Default for CompanyNameExtractor {
    fn default() -> Self {
        Self::new().expect("Failed to create company name extractor")
    }
}
