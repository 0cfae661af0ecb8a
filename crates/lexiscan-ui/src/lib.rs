use kanal::AsyncReceiver;
use lexiscan_types::AppEvent;

pub mod html;
pub mod region;
pub mod renderer;
pub mod text;
pub mod view;

pub use region::{FileRegion, MemoryRegion, OutputRegion, TerminalRegion};
pub use renderer::{RenderError, Renderer};

/// Paint every state the app sends until it shuts down
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, mut renderer: Renderer) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::Render(state) => match renderer.render(state) {
                Ok(()) => {}
                Err(e @ RenderError::IllegalTransition { .. }) => {
                    tracing::warn!("[UI] {}", e);
                }
                Err(e) => return Err(e.into()),
            },
            AppEvent::Shutdown => {
                tracing::debug!("[UI] Shutdown received");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
