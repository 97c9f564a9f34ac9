//! Core types for esgscope

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// ESG risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    /// All categories in scorecard order
    pub const ALL: [Category; 3] = [Self::Environmental, Self::Social, Self::Governance];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environmental => "Environmental",
            Self::Social => "Social",
            Self::Governance => "Governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk classification derived from the total weighted score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Upper bound (inclusive) of the low band
    pub const LOW_MAX: u64 = 30;
    /// Upper bound (inclusive) of the medium band
    pub const MEDIUM_MAX: u64 = 70;

    /// Classify a total weighted score
    pub fn from_score(total_weighted_score: u64) -> Self {
        if total_weighted_score <= Self::LOW_MAX {
            Self::Low
        } else if total_weighted_score <= Self::MEDIUM_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A lexicon keyword that matched at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub severity: u8,
    pub count: u64,
}

impl KeywordMatch {
    /// Weighted contribution of this keyword (count x severity)
    pub fn contribution(&self) -> u64 {
        self.count * u64::from(self.severity)
    }
}

/// Scoring result for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,

    /// Sum of match counts over all keywords
    pub total_terms_matched: u64,

    /// Sum of count x severity over all keywords
    pub weighted_score: u64,

    /// Number of keywords with at least one match
    pub unique_keywords_matched: u64,

    /// Number of keywords defined for this category
    pub total_keywords_in_dictionary: u64,

    /// Share of all matched terms, 0-100, two decimals
    pub term_percentage: f64,

    /// Share of the total weighted score, 0-100, two decimals
    pub risk_percentage: f64,

    /// Per-keyword breakdown in lexicon order (matched keywords only)
    #[serde(default)]
    pub keyword_matches: Vec<KeywordMatch>,
}

impl CategoryResult {
    /// Create an empty result for a category
    pub fn empty(category: Category, total_keywords_in_dictionary: u64) -> Self {
        Self {
            category,
            total_terms_matched: 0,
            weighted_score: 0,
            unique_keywords_matched: 0,
            total_keywords_in_dictionary,
            term_percentage: 0.0,
            risk_percentage: 0.0,
            keyword_matches: Vec::new(),
        }
    }

    /// Count recorded for a keyword (0 when it did not match)
    pub fn count_for(&self, keyword: &str) -> u64 {
        self.keyword_matches
            .iter()
            .find(|m| m.keyword == keyword)
            .map_or(0, |m| m.count)
    }
}

/// The full numeric result of scoring one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Exactly one entry per category, in `Category::ALL` order
    pub categories: Vec<CategoryResult>,
    pub total_weighted_score: u64,
    pub total_keyword_matches: u64,
    pub risk_level: RiskLevel,
}

impl Scorecard {
    /// Look up the result for a category
    pub fn category(&self, category: Category) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Presentation rows for API consumers
    pub fn rows(&self) -> Vec<CategoryRow> {
        self.categories.iter().map(CategoryRow::from).collect()
    }
}

/// Category result with the field names used at the presentation boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    #[serde(default = "unknown_category")]
    pub category: String,
    #[serde(default)]
    pub risk_percentage: f64,
    #[serde(default)]
    pub term_percentage: f64,
    #[serde(default)]
    pub total_esg_terms_matched: u64,
    #[serde(default)]
    pub unique_keywords_matched: u64,
    #[serde(default)]
    pub total_keywords_in_dictionary: u64,
    #[serde(default)]
    pub score: u64,
}

fn unknown_category() -> String {
    "Unknown Category".to_string()
}

impl From<&CategoryResult> for CategoryRow {
    fn from(result: &CategoryResult) -> Self {
        Self {
            category: result.category.to_string(),
            risk_percentage: result.risk_percentage,
            term_percentage: result.term_percentage,
            total_esg_terms_matched: result.total_terms_matched,
            unique_keywords_matched: result.unique_keywords_matched,
            total_keywords_in_dictionary: result.total_keywords_in_dictionary,
            score: result.weighted_score,
        }
    }
}

/// Risk-flagged sentences and keyword occurrence counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    /// Flagged sentences in document order, trimmed
    pub sentences: Vec<String>,

    /// Whole-word occurrence counts; keywords that never occur are absent
    pub keyword_counts: BTreeMap<String, u64>,
}

impl FlagReport {
    /// Occurrence count for a keyword, treating missing keys as zero
    pub fn count(&self, keyword: &str) -> u64 {
        self.keyword_counts.get(keyword).copied().unwrap_or(0)
    }
}

/// Everything produced by analysing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub analyzed_at: DateTime<Local>,
    pub company_name: String,
    pub scorecard: Scorecard,
    pub flags: FlagReport,
    pub summary: String,
}

impl AnalysisResult {
    pub fn risk_level(&self) -> RiskLevel {
        self.scorecard.risk_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_serializes_as_label() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium Risk\"");
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
    }

    #[test]
    fn test_category_row_defaults() {
        let row: CategoryRow = serde_json::from_str("{}").unwrap();
        assert_eq!(row.category, "Unknown Category");
        assert_eq!(row.score, 0);
        assert_eq!(row.risk_percentage, 0.0);
    }

    #[test]
    fn test_category_row_field_names() {
        let mut result = CategoryResult::empty(Category::Social, 53);
        result.weighted_score = 9;
        result.total_terms_matched = 4;

        let value = serde_json::to_value(CategoryRow::from(&result)).unwrap();
        assert_eq!(value["category"], "Social");
        assert_eq!(value["score"], 9);
        assert_eq!(value["total_esg_terms_matched"], 4);
        assert_eq!(value["total_keywords_in_dictionary"], 53);
    }

    #[test]
    fn test_flag_report_missing_key_is_zero() {
        let mut report = FlagReport::default();
        report.keyword_counts.insert("fraud".to_string(), 2);
        assert_eq!(report.count("fraud"), 2);
        assert_eq!(report.count("bribery"), 0);
    }
}
