use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lexiscan_client::{RawResponse, Transport, TransportError, UploadRequest};
use lexiscan_config::{Config, SubmissionPolicy};
use lexiscan_ui::OutputRegion;
use tokio::sync::oneshot;

use crate::state::AppState;

mod submit_once_tests;

type Reply = Result<RawResponse, TransportError>;

/// Answers each upload through a channel registered for its file name
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    seen: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn expect(&self, file_name: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .unwrap()
            .insert(file_name.to_string(), rx);
        tx
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_image(&self, request: UploadRequest) -> Reply {
        let rx = self.replies.lock().unwrap().remove(&request.file_name);
        self.seen.lock().unwrap().push(request.file_name);

        match rx {
            Some(rx) => rx.await.unwrap_or(Err(TransportError::Timeout)),
            None => Err(TransportError::Connect("no reply scripted".to_string())),
        }
    }
}

/// Keeps every render instead of only the last one
#[derive(Clone, Default)]
pub struct RecordingRegion(Arc<Mutex<Vec<String>>>);

impl RecordingRegion {
    pub fn renders(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// State names of JSON-format renders, in order
    pub fn states(&self) -> Vec<String> {
        self.renders()
            .iter()
            .map(|render| {
                let value: serde_json::Value = serde_json::from_str(render).unwrap();
                value["state"].as_str().unwrap().to_string()
            })
            .collect()
    }
}

impl OutputRegion for RecordingRegion {
    fn replace(&mut self, content: &str) -> io::Result<()> {
        self.0.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

pub fn app_state(transport: Arc<StubTransport>, policy: SubmissionPolicy) -> AppState {
    let mut config = Config::new();
    config.submission.policy = policy;
    AppState::with_transport(config, transport)
}

pub fn ok(body: &str) -> Reply {
    Ok(RawResponse {
        status: 200,
        body: body.to_string(),
    })
}

pub fn image(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"\x89PNG").unwrap();
    path
}

#[test]
fn default_log_filter_covers_every_crate() {
    let filter = tracing_subscriber::EnvFilter::try_new(crate::DEFAULT_LOG_FILTER);
    assert!(filter.is_ok());

    for krate in [
        "lexiscan_app",
        "lexiscan_client",
        "lexiscan_config",
        "lexiscan_core",
        "lexiscan_io",
        "lexiscan_types",
        "lexiscan_ui",
    ] {
        assert!(
            crate::DEFAULT_LOG_FILTER.contains(&format!("{krate}=info")),
            "{krate} missing from default filter"
        );
    }
}
