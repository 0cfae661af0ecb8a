use std::sync::Arc;

use lexiscan_client::{HttpTransport, SubmissionController, Transport};
use lexiscan_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub submissions: SubmissionController,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(&config.service)?;
        tracing::info!("Uploading to {}", transport.upload_url());

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let submissions = SubmissionController::new(transport, config.submission.policy);

        Self {
            config: Arc::new(RwLock::new(config)),
            submissions,
        }
    }
}
