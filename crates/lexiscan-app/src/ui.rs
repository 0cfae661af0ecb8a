use kanal::AsyncReceiver;
use lexiscan_config::OutputFormat;
use lexiscan_config::ui::UiConfig;
use lexiscan_types::AppEvent;
use lexiscan_ui::{FileRegion, OutputRegion, Renderer, TerminalRegion};

/// Pick the output region and styling for this run
pub fn build_renderer(config: &UiConfig, interactive: bool) -> Renderer {
    let stdout_is_tty = atty::is(atty::Stream::Stdout);

    let region: Box<dyn OutputRegion> = match &config.output {
        Some(path) => Box::new(FileRegion::new(path.clone())),
        // Only an interactive session on a real terminal gets a full repaint
        None => Box::new(TerminalRegion::new(interactive && stdout_is_tty)),
    };

    let styled = config.color
        && config.format == OutputFormat::Text
        && config.output.is_none()
        && stdout_is_tty;
    colored::control::set_override(styled);

    Renderer::new(region, config.format, styled)
}

pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, renderer: Renderer) -> anyhow::Result<()> {
    lexiscan_ui::ui_loop(app_to_ui_rx, renderer).await
}
