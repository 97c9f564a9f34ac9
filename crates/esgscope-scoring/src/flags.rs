//! Risk sentence flagging
//!
//! Two passes over the same text with deliberately different matching
//! rules:
//! - a sentence is flagged when any keyword occurs in it as a plain substring
//! - keyword occurrence counts only include whole-word matches

use crate::lexicon::FLAG_KEYWORDS;
use aho_corasick::AhoCorasick;
use esgscope_core::{Error, FlagReport, Result};
use regex::Regex;
use std::collections::BTreeMap;

/// Flags risk sentences and tallies keyword occurrences
pub struct FlagExtractor {
    sentence_boundary: Regex,
    sentence_matcher: AhoCorasick,
    word_matcher: Regex,
    keyword_count: usize,
}

impl FlagExtractor {
    /// Create an extractor over the built-in flag vocabulary
    pub fn new() -> Result<Self> {
        Self::with_keywords(FLAG_KEYWORDS)
    }

    /// Create an extractor over a custom vocabulary
    pub fn with_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.as_ref())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(Error::config("flag keyword list is empty"));
        }

        let sentence_boundary = Regex::new(r"[.!?]\s+")
            .map_err(|e| Error::config(format!("Failed to compile sentence regex: {}", e)))?;

        let sentence_matcher = AhoCorasick::new(&keywords)
            .map_err(|e| Error::config(format!("Failed to build keyword matcher: {}", e)))?;

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let word_matcher = Regex::new(&format!(r"\b(?:{})\b", alternation))
            .map_err(|e| Error::config(format!("Failed to compile keyword regex: {}", e)))?;

        Ok(Self {
            sentence_boundary,
            sentence_matcher,
            word_matcher,
            keyword_count: keywords.len(),
        })
    }

    /// Number of keywords in the vocabulary
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }

    /// Split text at `.`, `!` or `?` followed by whitespace.
    ///
    /// The punctuation stays with its sentence; the whitespace is dropped.
    /// Abbreviations and decimals are not special-cased.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in self.sentence_boundary.find_iter(text) {
            // Terminal punctuation is a single ASCII byte
            sentences.push(&text[start..boundary.start() + 1]);
            start = boundary.end();
        }
        sentences.push(&text[start..]);
        sentences
    }

    /// Flag risk sentences and count keyword occurrences in lowercased text
    pub fn flag(&self, text: &str) -> FlagReport {
        let sentences = self
            .split_sentences(text)
            .into_iter()
            .filter(|sentence| self.sentence_matcher.is_match(sentence))
            .map(|sentence| sentence.trim().to_string())
            .collect();

        let mut keyword_counts = BTreeMap::new();
        for found in self.word_matcher.find_iter(text) {
            *keyword_counts.entry(found.as_str().to_string()).or_insert(0) += 1;
        }

        FlagReport {
            sentences,
            keyword_counts,
        }
    }
}

impl Default for FlagExtractor {
    fn default() -> Self {
        Self::new().expect("Failed to create flag extractor")
    }
}
