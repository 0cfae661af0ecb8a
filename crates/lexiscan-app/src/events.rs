use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexiscan_types::AppEvent;
use tokio::task::JoinSet;

use crate::state::AppState;

pub mod submit;

use submit::handle_submit;

/// App's main loop.
///
/// All submission bookkeeping happens here, one event at a time; requests
/// themselves run in their own tasks and report back with `Settled`.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut requests = JoinSet::new();
    let mut input_closed = false;

    tracing::info!("[EVENT_LOOP] Waiting for submissions");
    loop {
        // Events first: a request's `Settled` is queued before its task ends
        tokio::select! {
            biased;

            event = ui_to_app_rx.recv() => {
                let event = event?;
                tracing::debug!("[EVENT_LOOP] Event: {:?}", std::mem::discriminant(&event));

                match event {
                    AppEvent::Submit(selection) => {
                        handle_submit(&state, selection, &mut requests, &ui_to_app_tx, &app_to_ui_tx).await?;
                    }
                    AppEvent::Settled { seq, state: display } => {
                        let latest = state.submissions.latest_seq();
                        if seq == latest {
                            app_to_ui_tx.send(AppEvent::Render(display)).await?;
                        } else {
                            tracing::debug!("[EVENT_LOOP] Dropping result of #{} (latest is #{})", seq, latest);
                        }
                    }
                    AppEvent::InputClosed => {
                        tracing::info!("[EVENT_LOOP] Input closed");
                        input_closed = true;
                    }
                    AppEvent::Shutdown => break,
                    AppEvent::Render(_) => {
                        // UI-only event
                    }
                }
            }
            // Cancelled or superseded requests finish without reporting back
            Some(finished) = requests.join_next(), if !requests.is_empty() => {
                if let Err(e) = finished {
                    tracing::error!("[EVENT_LOOP] Request task failed: {}", e);
                }
            }
        }

        if input_closed && requests.is_empty() {
            tracing::debug!("[EVENT_LOOP] Nothing left in flight");
            break;
        }
    }

    requests.abort_all();
    app_to_ui_tx.send(AppEvent::Shutdown).await?;
    Ok(())
}
