//! Service configuration

use crate::cli::{Cli, Commands};
use esgscope_scoring::DEFAULT_MAX_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted upload body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Maximum document length in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Report file export
    #[serde(default)]
    pub export: ExportConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = Self::from_file(config_path)?;

        // Apply CLI overrides
        if let Commands::Serve {
            listen,
            port,
            export_dir,
        } = &cli.command
        {
            if let Some(listen) = listen {
                config.listen = listen.clone();
            }
            if let Some(port) = port {
                config.port = *port;
            }
            if let Some(dir) = export_dir {
                config.export.dir = Some(dir.clone());
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file, falling back to defaults when it is missing
    pub fn from_file(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_upload_bytes == 0 {
            anyhow::bail!("max_upload_bytes must be greater than zero");
        }
        if self.max_text_chars == 0 {
            anyhow::bail!("max_text_chars must be greater than zero");
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            max_text_chars: default_max_text_chars(),
            cors: CorsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Report file export configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for report files; export is disabled when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_max_text_chars() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_bytes, 32 * 1024 * 1024);
        assert_eq!(config.max_text_chars, 2_000_000);
        assert!(config.cors.allows_any());
        assert!(config.export.dir.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ServerConfig = serde_yaml::from_str(
            "port: 8088\ncors:\n  allowed_origins:\n    - http://localhost:3000\n",
        )
        .unwrap();

        assert_eq!(config.port, 8088);
        assert_eq!(config.listen, "0.0.0.0");
        assert!(!config.cors.allows_any());
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ServerConfig::from_file("/nonexistent/esgscope.yaml").unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen: 10.0.0.1\nport: 7000\nmax_text_chars: 5000").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = ["esgscope", "-c", path.as_str(), "serve", "--port", "9000"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = ServerConfig::load(&cli.config, &cli).unwrap();

        assert_eq!(config.listen, "10.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_text_chars, 5000);
    }

    #[test]
    fn test_rejects_zero_limits() {
        let config = ServerConfig {
            max_upload_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
