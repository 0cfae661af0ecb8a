//! One-shot submissions rendered straight into a region

use std::sync::Arc;

use lexiscan_client::RawResponse;
use lexiscan_config::{OutputFormat, SubmissionPolicy};
use lexiscan_types::{DisplayState, Failure};
use lexiscan_ui::{MemoryRegion, Renderer};

use super::*;
use crate::events::submit::submit_once;

#[tokio::test]
async fn server_error_ends_in_error_state() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(StubTransport::default());
    let state = app_state(transport.clone(), SubmissionPolicy::Reject);
    let region = MemoryRegion::new();
    let mut renderer = Renderer::new(Box::new(region.clone()), OutputFormat::Text, false);

    transport
        .expect("page.png")
        .send(Ok(RawResponse {
            status: 500,
            body: r#"{ "error": "model crashed" }"#.to_string(),
        }))
        .unwrap();

    let terminal = submit_once(&state.submissions, Some(&image(&dir, "page.png")), &mut renderer)
        .await
        .unwrap();

    assert_eq!(terminal, DisplayState::Error(Failure::Status(500)));
    assert_eq!(renderer.current(), &terminal);
    assert!(region.content().contains("HTTP error! status: 500"));
    assert!(!region.content().contains("model crashed"));
}

#[tokio::test]
async fn empty_word_list_ends_in_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(StubTransport::default());
    let state = app_state(transport.clone(), SubmissionPolicy::Reject);
    let region = MemoryRegion::new();
    let mut renderer = Renderer::new(Box::new(region.clone()), OutputFormat::Text, false);

    transport
        .expect("blank.jpg")
        .send(ok(r#"{ "status": "success", "words": [] }"#))
        .unwrap();

    let terminal = submit_once(&state.submissions, Some(&image(&dir, "blank.jpg")), &mut renderer)
        .await
        .unwrap();

    assert_eq!(terminal, DisplayState::EmptyResult);
    assert!(region.content().contains("No underlined words were detected in the image."));
}

#[tokio::test]
async fn missing_file_fails_validation_without_request() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(StubTransport::default());
    let state = app_state(transport.clone(), SubmissionPolicy::Reject);
    let region = MemoryRegion::new();
    let mut renderer = Renderer::new(Box::new(region.clone()), OutputFormat::Html, false);

    let missing = dir.path().join("gone.png");
    let terminal = submit_once(&state.submissions, Some(&missing), &mut renderer)
        .await
        .unwrap();

    assert!(matches!(terminal, DisplayState::Error(Failure::Validation(_))));
    assert!(region.content().contains("class=\"error\""));
    assert!(transport.seen().is_empty());
    assert!(!state.submissions.is_in_flight());
}
