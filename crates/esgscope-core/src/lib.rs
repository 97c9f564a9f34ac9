//! esgscope Core
//!
//! Core types and error handling shared across esgscope components.
//!
//! This crate provides:
//! - ESG categories, risk levels and the scorecard data model
//! - The per-document analysis result handed to presentation layers
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AnalysisResult, Category, CategoryResult, CategoryRow, FlagReport, KeywordMatch, RiskLevel,
    Scorecard,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{AnalysisResult, Category, CategoryResult, RiskLevel, Scorecard};
}
