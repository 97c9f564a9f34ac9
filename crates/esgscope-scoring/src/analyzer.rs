//! End-to-end document analysis
//!
//! Runs every pass over one document and assembles an [`AnalysisResult`]:
//! 1. reject text with no content
//! 2. lowercase the text
//! 3. score it against the lexicon and flag risk sentences
//! 4. extract the company name from the original (un-lowercased) text
//! 5. render the summary report with a timestamp from the injected clock

use crate::company::CompanyNameExtractor;
use crate::flags::FlagExtractor;
use crate::lemmatizer::{Lemmatizer, RuleLemmatizer, DEFAULT_MAX_LENGTH};
use crate::lexicon::Lexicon;
use crate::scorer::RiskScorer;
use crate::summary::{build_summary, Clock, SystemClock};
use esgscope_core::{AnalysisResult, Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Analyzes documents into independent [`AnalysisResult`]s.
///
/// All matchers are compiled once at construction. `analyze` takes `&self`
/// and keeps no state between calls.
pub struct Analyzer {
    scorer: RiskScorer,
    flags: FlagExtractor,
    company: CompanyNameExtractor,
    clock: Arc<dyn Clock>,
}

impl Analyzer {
    /// Analyzer over the built-in lexicon with default limits
    pub fn new() -> Result<Self> {
        Self::with_max_text_chars(DEFAULT_MAX_LENGTH)
    }

    /// Analyzer accepting documents up to `max_text_chars` characters
    pub fn with_max_text_chars(max_text_chars: usize) -> Result<Self> {
        let lemmatizer: Arc<dyn Lemmatizer> =
            Arc::new(RuleLemmatizer::with_max_length(max_text_chars)?);
        let lexicon = Arc::new(Lexicon::builtin(lemmatizer.as_ref())?);
        Self::from_parts(RiskScorer::new(lexicon, lemmatizer), FlagExtractor::new()?)
    }

    /// Assemble an analyzer from a custom scorer and flag extractor
    pub fn from_parts(scorer: RiskScorer, flags: FlagExtractor) -> Result<Self> {
        Ok(Self {
            scorer,
            flags,
            company: CompanyNameExtractor::new()?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for analysis timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn flag_extractor(&self) -> &FlagExtractor {
        &self.flags
    }

    /// Analyze one document's extracted text
    pub fn analyze(&self, raw_text: &str) -> Result<AnalysisResult> {
        if raw_text.trim().is_empty() {
            return Err(Error::NoContent);
        }

        let start = Instant::now();
        let text = raw_text.to_lowercase();
        debug!(bytes = text.len(), "Analyzing document");

        let scorecard = self.scorer.score(&text).map_err(|e| {
            warn!("Scoring failed: {}", e);
            Error::analysis(e.to_string())
        })?;
        let flags = self.flags.flag(&text);
        let company_name = self.company.extract(raw_text);

        let analyzed_at = self.clock.now();
        let summary = build_summary(
            &company_name,
            &analyzed_at,
            scorecard.total_keyword_matches,
            scorecard.total_weighted_score,
            scorecard.risk_level,
        );

        let result = AnalysisResult {
            id: Uuid::new_v4(),
            analyzed_at,
            company_name,
            scorecard,
            flags,
            summary,
        };

        info!(
            id = %result.id,
            company = %result.company_name,
            score = result.scorecard.total_weighted_score,
            risk_level = %result.risk_level(),
            flagged_sentences = result.flags.sentences.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "Analysis complete"
        );

        Ok(result)
    }
}
