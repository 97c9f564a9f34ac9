//! esgscope Scoring
//!
//! Deterministic, lexicon-driven ESG risk analysis of document text.
//!
//! The pieces, all pure and synchronous:
//! - [`lexicon`]: the Environmental / Social / Governance keyword tables
//! - [`lemmatizer`]: base-form reduction for single-word keyword matching
//! - [`scorer`]: per-category counts, weighted scores, percentages and risk level
//! - [`flags`]: risk sentence flagging and keyword occurrence counts
//! - [`company`]: company name heuristic
//! - [`summary`]: the fixed-template summary report
//! - [`analyzer`]: runs all of the above over one document

pub mod analyzer;
pub mod company;
pub mod flags;
pub mod lemmatizer;
pub mod lexicon;
pub mod scorer;
pub mod summary;

pub use analyzer::Analyzer;
pub use company::{CompanyNameExtractor, UNKNOWN_COMPANY};
pub use flags::FlagExtractor;
pub use lemmatizer::{Lemmatizer, RuleLemmatizer, DEFAULT_MAX_LENGTH};
pub use lexicon::{KeywordMatcher, Lexicon, LexiconEntry, FLAG_KEYWORDS};
pub use scorer::{percentage, RiskScorer};
pub use summary::{build_summary, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::flags::FlagExtractor;
    pub use crate::lemmatizer::{Lemmatizer, RuleLemmatizer};
    pub use crate::lexicon::Lexicon;
    pub use crate::scorer::RiskScorer;
    pub use crate::summary::{Clock, FixedClock, SystemClock};
}
