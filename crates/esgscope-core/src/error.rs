//! Error types for esgscope

/// Result type alias using esgscope's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for esgscope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document yielded no text to analyse
    #[error("no text content found in document")]
    NoContent,

    /// Lemmatizer failures (oversized or unprocessable text)
    #[error("lemmatizer error: {0}")]
    Lemmatizer(String),

    /// Failures while running an analysis
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// Text extraction errors from the source document
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Result export errors
    #[error("export error: {0}")]
    Export(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new lemmatizer error
    pub fn lemmatizer(msg: impl Into<String>) -> Self {
        Self::Lemmatizer(msg.into())
    }

    /// Create a new analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    /// Create a new extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new export error
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Whether the document simply had nothing to analyse
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}
