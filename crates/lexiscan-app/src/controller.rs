use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexiscan_types::AppEvent;
use lexiscan_ui::Renderer;
use tokio::task::{Id, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

pub struct AppTasks {
    pub set: JoinSet<anyhow::Result<()>>,
    /// The UI loop is the last task to finish on a clean exit
    pub ui: Id,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity.max(1)),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender input sources use to reach the event loop
    pub fn sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Event loop and UI loop only; input comes through [`Self::sender`].
    pub fn spawn_core(&self, renderer: Renderer) -> AppTasks {
        let mut set = JoinSet::new();

        set.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        let ui = set
            .spawn(ui_loop(self.channels.app_to_ui.1.clone(), renderer))
            .id();

        AppTasks { set, ui }
    }

    pub fn spawn_tasks(&self, renderer: Renderer) -> AppTasks {
        let mut tasks = self.spawn_core(renderer);

        tasks.set.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        if let Err(e) = self.channels.ui_to_app.0.try_send(AppEvent::Shutdown) {
            tracing::warn!("Could not deliver shutdown to event loop: {}", e);
        }
    }
}
