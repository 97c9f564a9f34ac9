//! Report file export
//!
//! Writes the latest analysis to a directory as three files:
//! - `risk_sentences.txt`: flagged sentences separated by blank lines
//! - `esg_scorecard.csv`: one row per category
//! - `esg_summary.txt`: the summary report

use esgscope_core::{AnalysisResult, CategoryRow, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RISK_SENTENCES_FILE: &str = "risk_sentences.txt";
pub const SCORECARD_FILE: &str = "esg_scorecard.csv";
pub const SUMMARY_FILE: &str = "esg_summary.txt";

/// Writes analysis results into a fixed directory, overwriting earlier files
#[derive(Debug, Clone)]
pub struct ReportExporter {
    dir: PathBuf,
}

impl ReportExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all report files for one analysis
    pub fn export(&self, result: &AnalysisResult) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::export(format!(
                "Failed to create export directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        self.write_file(RISK_SENTENCES_FILE, result.flags.sentences.join("\n\n").as_bytes())?;
        self.write_file(SCORECARD_FILE, &scorecard_csv(&result.scorecard.rows())?)?;
        self.write_file(SUMMARY_FILE, result.summary.as_bytes())?;

        debug!(dir = %self.dir.display(), id = %result.id, "Exported analysis reports");
        Ok(())
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents)
            .map_err(|e| Error::export(format!("Failed to write {}: {}", path.display(), e)))
    }
}

/// Render category rows as CSV with a header line
pub fn scorecard_csv(rows: &[CategoryRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| Error::export(format!("Failed to write scorecard row: {}", e)))?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::export(format!("Failed to flush scorecard: {}", e)))
}
