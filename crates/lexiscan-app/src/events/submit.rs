use std::path::{Path, PathBuf};
use std::sync::Arc;

use kanal::AsyncSender;
use lexiscan_client::{BeginError, SubmissionController};
use lexiscan_core::settle;
use lexiscan_types::{AppEvent, DisplayState};
use lexiscan_ui::Renderer;
use tokio::task::JoinSet;

use crate::state::AppState;

/// Start a submission from the event loop.
///
/// `Processing` is sent before the request task exists, so it always
/// reaches the UI ahead of that submission's result.
pub async fn handle_submit(
    state: &Arc<AppState>,
    selection: Option<PathBuf>,
    requests: &mut JoinSet<()>,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ticket = match state.submissions.begin(selection.as_deref()).await {
        Ok(ticket) => ticket,
        Err(BeginError::Busy) => {
            tracing::warn!("Ignoring submission: an upload is still in flight");
            return Ok(());
        }
        Err(BeginError::Validation(failure)) => {
            tracing::info!("Submission rejected: {}", failure);
            app_to_ui_tx.send(AppEvent::Render(DisplayState::Processing)).await?;
            app_to_ui_tx
                .send(AppEvent::Render(DisplayState::Error(failure)))
                .await?;
            return Ok(());
        }
    };

    app_to_ui_tx.send(AppEvent::Render(DisplayState::Processing)).await?;

    let seq = ticket.seq();
    let state = state.clone();
    let tx = ui_to_app_tx.clone();
    requests.spawn(async move {
        let Some(outcome) = state.submissions.complete(ticket).await else {
            return;
        };

        if let Err(e) = tx.send(AppEvent::Settled { seq, state: settle(outcome) }).await {
            tracing::error!("Failed to report result of #{}: {}", seq, e);
        }
    });

    Ok(())
}

/// Run a single submission straight through the renderer and return the
/// state it ended in.
pub async fn submit_once(
    controller: &SubmissionController,
    selection: Option<&Path>,
    renderer: &mut Renderer,
) -> anyhow::Result<DisplayState> {
    let terminal = match controller.begin(selection).await {
        Err(BeginError::Busy) => anyhow::bail!("Another submission is already in flight"),
        Err(BeginError::Validation(failure)) => {
            renderer.render(DisplayState::Processing)?;
            DisplayState::Error(failure)
        }
        Ok(ticket) => {
            renderer.render(DisplayState::Processing)?;
            match controller.complete(ticket).await {
                Some(outcome) => settle(outcome),
                None => anyhow::bail!("Submission was cancelled"),
            }
        }
    };

    renderer.render(terminal.clone())?;
    Ok(terminal)
}
