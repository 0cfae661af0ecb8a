use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lexiscan_config::SubmissionPolicy;
use lexiscan_types::{Failure, RequestOutcome};
use tokio_util::sync::CancellationToken;

use crate::request::UploadRequest;
use crate::transport::{RawResponse, Transport, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum BeginError {
    /// Another submission is in flight and the policy refuses overlap
    #[error("A submission is already in flight")]
    Busy,

    #[error(transparent)]
    Validation(Failure),
}

/// In-flight count and the newest sequence number handed out
#[derive(Default)]
struct Tracker {
    in_flight: AtomicUsize,
    latest: AtomicU64,
}

struct InFlightGuard(Arc<Tracker>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A submission that passed validation and may now go over the wire
pub struct Ticket {
    seq: u64,
    request: UploadRequest,
    cancel: CancellationToken,
    _guard: InFlightGuard,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues uploads and decides which responses still matter.
///
/// `begin` runs on the event loop and is where overlap is resolved; `complete`
/// runs in the submission's own task and performs the request.
pub struct SubmissionController {
    transport: Arc<dyn Transport>,
    policy: SubmissionPolicy,
    tracker: Arc<Tracker>,
    current: Mutex<CancellationToken>,
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn Transport>, policy: SubmissionPolicy) -> Self {
        Self {
            transport,
            policy,
            tracker: Arc::new(Tracker::default()),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.tracker.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn latest_seq(&self) -> u64 {
        self.tracker.latest.load(Ordering::SeqCst)
    }

    /// Claim a slot, supersede whatever is running (under `Latest`) and read
    /// the selected file.
    pub async fn begin(&self, selection: Option<&Path>) -> Result<Ticket, BeginError> {
        let guard = self.claim()?;
        let seq = self.tracker.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = self.replace_token();

        let request = UploadRequest::read(selection)
            .await
            .map_err(BeginError::Validation)?;

        tracing::info!("Submission #{} started: {}", seq, request.file_name);
        Ok(Ticket {
            seq,
            request,
            cancel,
            _guard: guard,
        })
    }

    /// Send the upload. Returns `None` when the submission was cancelled or a
    /// newer one was started while it was in flight.
    pub async fn complete(&self, ticket: Ticket) -> Option<RequestOutcome> {
        let Ticket {
            seq,
            request,
            cancel,
            _guard,
        } = ticket;

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Submission #{} cancelled", seq);
                return None;
            }
            response = self.transport.post_image(request) => response,
        };

        let latest = self.latest_seq();
        if seq != latest {
            tracing::debug!("Discarding response of submission #{} (latest is #{})", seq, latest);
            return None;
        }

        Some(classify(seq, response))
    }

    fn claim(&self) -> Result<InFlightGuard, BeginError> {
        match self.policy {
            SubmissionPolicy::Reject => {
                self.tracker
                    .in_flight
                    .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                    .map_err(|_| BeginError::Busy)?;
            }
            SubmissionPolicy::Latest => {
                self.tracker.in_flight.fetch_add(1, Ordering::SeqCst);
            }
        }
        Ok(InFlightGuard(self.tracker.clone()))
    }

    fn replace_token(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::mem::replace(&mut *current, fresh.clone());
        previous.cancel();
        fresh
    }
}

fn classify(seq: u64, response: Result<RawResponse, TransportError>) -> RequestOutcome {
    match response {
        Ok(raw) if raw.is_success() => {
            tracing::info!("Submission #{} settled with status {}", seq, raw.status);
            RequestOutcome::Delivered {
                status: raw.status,
                body: raw.body,
            }
        }
        Ok(raw) => {
            let reported = serde_json::from_str::<serde_json::Value>(&raw.body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
            tracing::warn!(
                "Submission #{} failed with status {} (service said: {:?})",
                seq,
                raw.status,
                reported
            );
            RequestOutcome::TransportFailure(Failure::Status(raw.status))
        }
        Err(e) => {
            tracing::error!("Submission #{} transport error: {:?}", seq, e);
            RequestOutcome::TransportFailure(Failure::Network(e.to_string()))
        }
    }
}
