//! Shared service state

use crate::config::ServerConfig;
use crate::export::ReportExporter;
use crate::source::{PdfTextSource, TextSource};
use esgscope_core::{AnalysisResult, Result};
use esgscope_scoring::Analyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Document analyzer with precompiled matchers
    pub analyzer: Arc<Analyzer>,

    /// Upload text extraction
    pub source: Arc<dyn TextSource>,

    /// Optional report file export
    pub exporter: Option<ReportExporter>,

    /// Prometheus metrics handle for rendering, when a recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,

    /// Most recent successful analysis served by the read endpoints
    latest: Arc<RwLock<Option<Arc<AnalysisResult>>>>,
}

impl AppState {
    /// Build state from configuration with PDF extraction
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        let analyzer = Analyzer::with_max_text_chars(config.max_text_chars)?;
        Ok(Self::with_parts(
            config,
            analyzer,
            Arc::new(PdfTextSource),
            metrics_handle,
        ))
    }

    /// Build state from explicit parts
    pub fn with_parts(
        config: ServerConfig,
        analyzer: Analyzer,
        source: Arc<dyn TextSource>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        let exporter = config.export.dir.clone().map(ReportExporter::new);
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            source,
            exporter,
            metrics_handle,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// The most recent successful analysis, if any
    pub fn latest(&self) -> Option<Arc<AnalysisResult>> {
        self.latest.read().clone()
    }

    /// Extract, analyze, export and publish one uploaded document.
    ///
    /// Blocking; run it off the async executor. On failure the previously
    /// published result stays in place.
    pub fn process_document(&self, bytes: &[u8]) -> Result<Arc<AnalysisResult>> {
        let start = Instant::now();
        metrics::counter!("esgscope_analyses_total").increment(1);

        let outcome = self
            .source
            .extract_text(bytes)
            .and_then(|text| self.analyzer.analyze(&text));

        let result = match outcome {
            Ok(result) => Arc::new(result),
            Err(e) => {
                let reason = if e.is_no_content() { "no_content" } else { "error" };
                metrics::counter!("esgscope_analysis_failures_total", "reason" => reason)
                    .increment(1);
                return Err(e);
            }
        };

        if let Some(exporter) = &self.exporter {
            if let Err(e) = exporter.export(&result) {
                warn!("Report export failed: {}", e);
            }
        }

        self.publish(result.clone());

        let latency_us = start.elapsed().as_micros() as f64;
        metrics::histogram!("esgscope_analysis_latency_us").record(latency_us);
        info!(id = %result.id, source = self.source.name(), "Published analysis");

        Ok(result)
    }

    /// Replace the published result; the last writer wins
    pub fn publish(&self, result: Arc<AnalysisResult>) {
        *self.latest.write() = Some(result);
    }
}
