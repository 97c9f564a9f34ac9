//! Lexicon-driven ESG risk scorer

use crate::lemmatizer::{Lemmatizer, RuleLemmatizer};
use crate::lexicon::{KeywordMatcher, Lexicon};
use esgscope_core::{CategoryResult, KeywordMatch, Result, RiskLevel, Scorecard};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Scores lowercased text against the ESG lexicon.
///
/// Matching is case-sensitive; callers lowercase the text first. The scorer
/// holds no per-call state, so one instance can serve any number of
/// concurrent analyses.
pub struct RiskScorer {
    lexicon: Arc<Lexicon>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl RiskScorer {
    /// Create a scorer from a compiled lexicon and the lemmatizer it was compiled with
    pub fn new(lexicon: Arc<Lexicon>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self {
            lexicon,
            lemmatizer,
        }
    }

    /// Built-in lexicon with the default rule lemmatizer
    pub fn with_defaults() -> Result<Self> {
        let lemmatizer: Arc<dyn Lemmatizer> = Arc::new(RuleLemmatizer::new()?);
        let lexicon = Arc::new(Lexicon::builtin(lemmatizer.as_ref())?);
        Ok(Self::new(lexicon, lemmatizer))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn lemmatizer(&self) -> &dyn Lemmatizer {
        self.lemmatizer.as_ref()
    }

    /// Score a text, producing one result per category
    pub fn score(&self, text: &str) -> Result<Scorecard> {
        let lemmas = self.lemmatizer.lemmatize(text)?;
        let mut lemma_counts: HashMap<&str, u64> = HashMap::new();
        for lemma in &lemmas {
            *lemma_counts.entry(lemma.as_str()).or_insert(0) += 1;
        }

        let mut categories = Vec::with_capacity(self.lexicon.categories().len());
        for category_lexicon in self.lexicon.categories() {
            let mut result =
                CategoryResult::empty(category_lexicon.category, category_lexicon.len() as u64);

            for entry in &category_lexicon.entries {
                let count = match &entry.matcher {
                    KeywordMatcher::Single { lemma } => {
                        lemma_counts.get(lemma.as_str()).copied().unwrap_or(0)
                    }
                    // Non-overlapping, left to right; hits inside longer words count too
                    KeywordMatcher::Phrase(phrase) => text.matches(phrase.as_str()).count() as u64,
                };
                if count == 0 {
                    continue;
                }

                let matched = KeywordMatch {
                    keyword: entry.keyword.clone(),
                    severity: entry.severity,
                    count,
                };
                result.total_terms_matched += count;
                result.weighted_score += matched.contribution();
                result.unique_keywords_matched += 1;
                result.keyword_matches.push(matched);
            }

            trace!(
                category = %result.category,
                terms = result.total_terms_matched,
                weighted = result.weighted_score,
                "Scored category"
            );
            categories.push(result);
        }

        let total_weighted_score: u64 = categories.iter().map(|c| c.weighted_score).sum();
        let total_keyword_matches: u64 = categories.iter().map(|c| c.total_terms_matched).sum();

        for result in &mut categories {
            result.risk_percentage = percentage(result.weighted_score, total_weighted_score);
            result.term_percentage = percentage(result.total_terms_matched, total_keyword_matches);
        }

        Ok(Scorecard {
            categories,
            total_weighted_score,
            total_keyword_matches,
            risk_level: RiskLevel::from_score(total_weighted_score),
        })
    }
}

/// `part / total` as a percentage rounded to two decimals, 0 when `total` is 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let value = part as f64 / total as f64 * 100.0;
    round_half_even(value * 100.0, value.mul_add(100.0, -(value * 100.0))) / 100.0
}

/// Round `scaled` to an integer, ties to even. `residual` is the error of the
/// multiplication that produced `scaled`; only an exact tie goes to even.
fn round_half_even(scaled: f64, residual: f64) -> f64 {
    let floor = scaled.floor();
    let diff = scaled - floor;
    if diff > 0.5 || (diff == 0.5 && residual > 0.0) {
        floor + 1.0
    } else if diff < 0.5 || (diff == 0.5 && residual < 0.0) {
        floor
    } else if floor % 2.0 == 0.0 {
        floor
    } else {
        floor + 1.0
    }
}
