use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::service::ServiceConfig;
use self::submission::SubmissionConfig;
use self::ui::UiConfig;

pub mod service;
pub mod submission;
pub mod ui;

pub use self::submission::SubmissionPolicy;
pub use self::ui::OutputFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub ui: UiConfig,
    pub submission: SubmissionConfig,
    /// Capacity of the channels between the event loop and the UI loop
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config {
            channel_capacity: 64,
            ..Default::default()
        };
        config.apply_env();
        config
    }

    /// Load a JSON config file. Sections missing from the file keep their
    /// defaults; environment overrides are applied on top.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::new());
        }

        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: Config =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        if config.channel_capacity == 0 {
            config.channel_capacity = 64;
        }
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.service.apply_env();

        if let Some(format) = env::var("OUTPUT_FORMAT").ok().and_then(|v| v.parse().ok()) {
            self.ui.format = format;
        }

        if let Some(policy) = env::var("SUBMISSION_POLICY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.submission.policy = policy;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "service": {{ "base_url": "http://ocr.local:8080" }}, "ui": {{ "format": "html" }} }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.service.upload_path, "/upload");
        assert_eq!(config.channel_capacity, 64);
        assert!(config.ui.color);
        assert_eq!(config.submission.policy, SubmissionPolicy::Reject);
    }

    #[test]
    fn invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/lexiscan.json")).unwrap();
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn formats_and_policies_parse() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("latest".parse::<SubmissionPolicy>(), Ok(SubmissionPolicy::Latest));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
