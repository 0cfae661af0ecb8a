use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_upload_path() -> String {
    "/upload".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Where the analysis service lives and how long an upload may take
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    /// 0 disables the timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_path: default_upload_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ServiceConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("SERVICE_URL") {
            self.base_url = url;
        }

        if let Ok(path) = env::var("UPLOAD_PATH") {
            self.upload_path = path;
        }

        if let Some(secs) = env::var("UPLOAD_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = secs;
        }
    }

    pub fn upload_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.upload_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}
