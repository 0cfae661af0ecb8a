use async_trait::async_trait;
use lexiscan_config::service::ServiceConfig;
use reqwest::multipart::{Form, Part};

use crate::request::{IMAGE_FIELD, UploadRequest};

/// Status and body of whatever the service answered
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("The analysis service did not respond in time")]
    Timeout,

    #[error("Could not reach the analysis service: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }
}

/// Sends one upload and hands back the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_image(&self, request: UploadRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    upload_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            upload_url: config.upload_url(),
            client: builder.build().map_err(TransportError::Build)?,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_image(&self, request: UploadRequest) -> Result<RawResponse, TransportError> {
        tracing::debug!(
            "POST {} ({}, {} bytes)",
            self.upload_url,
            request.file_name,
            request.bytes.len()
        );

        let part = Part::bytes(request.bytes).file_name(request.file_name);
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The status alone decides the failure; a broken body must not hide it
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::debug!("Ignoring unreadable body of {} response: {}", status, e);
                String::new()
            });
            return Ok(RawResponse {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
