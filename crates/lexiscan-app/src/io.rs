use kanal::AsyncSender;
use lexiscan_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Feed file selections typed on stdin to the event loop.
///
/// The blocking read runs on its own thread so shutdown never waits on it.
pub async fn watcher_io(cancel: CancellationToken, event_tx: AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let tx = event_tx.clone_sync();

    std::thread::Builder::new()
        .name("stdin-watcher".to_string())
        .spawn(move || {
            let result = lexiscan_io::stdin::watch_stdin(|selection| {
                if let Err(e) = tx.send(AppEvent::Submit(selection)) {
                    tracing::error!("Failed to send selection to app: {}", e);
                }
            });

            if let Err(e) = result {
                tracing::error!("stdin watcher error: {}", e);
            }

            let _ = tx.send(AppEvent::InputClosed);
        })?;

    tracing::info!("Reading image paths from stdin (blank line = no file, EOF to quit)");
    cancel.cancelled().await;
    tracing::info!("stdin watcher stopping");

    Ok(())
}
