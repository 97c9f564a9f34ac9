//! esgscope service
//!
//! HTTP API and command-line front end for ESG risk analysis. Uploaded
//! documents are converted to text, analyzed by [`esgscope_scoring::Analyzer`]
//! and the latest result is served through read-only endpoints.

pub mod cli;
pub mod config;
pub mod export;
pub mod routes;
pub mod source;
pub mod state;

pub use cli::{Cli, Commands};
pub use config::ServerConfig;
pub use export::ReportExporter;
pub use routes::{create_router, AppError};
pub use source::{source_for_path, PdfTextSource, PlainTextSource, TextSource};
pub use state::AppState;

use esgscope_core::{AnalysisResult, Result};
use esgscope_scoring::Analyzer;
use std::path::Path;

/// Analyze a local document, choosing the text source by file extension
pub fn analyze_file(path: &Path, analyzer: &Analyzer) -> Result<AnalysisResult> {
    let bytes = std::fs::read(path)?;
    let text = source_for_path(path).extract_text(&bytes)?;
    analyzer.analyze(&text)
}
