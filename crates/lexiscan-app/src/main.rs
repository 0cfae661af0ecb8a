use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lexiscan_types::DisplayState;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod controller;
mod events;
mod io;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::controller::{AppController, AppTasks};
use self::state::AppState;

/// Used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "lexiscan_app=info,lexiscan_client=info,lexiscan_core=info,\
lexiscan_ui=info,lexiscan_config=info,lexiscan_io=info,lexiscan_types=info";

/// Logs go to stderr so they never interleave with rendered results
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match start(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config()?;
    let state = Arc::new(AppState::new(config)?);

    match &cli.command {
        Command::Submit { file } => {
            let mut renderer = {
                let config = state.config.read().await;
                ui::build_renderer(&config.ui, false)
            };

            let terminal =
                events::submit::submit_once(&state.submissions, file.as_deref(), &mut renderer).await?;

            Ok(match terminal {
                DisplayState::Error(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Command::Watch => {
            let (renderer, capacity) = {
                let config = state.config.read().await;
                (ui::build_renderer(&config.ui, true), config.channel_capacity)
            };

            let app = AppController::new(state, capacity);
            let tasks = app.spawn_tasks(renderer);

            // Shutdown future (Ctrl+C)
            let shutdown = async {
                if let Err(e) = signal::ctrl_c().await {
                    tracing::error!("failed to listen for ctrl+c: {e}");
                    std::future::pending::<()>().await;
                }
            };

            run(&app, tasks, shutdown).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Drive the spawned tasks until the UI loop finishes, a task fails or
/// `shutdown` resolves.
pub async fn run(
    app: &AppController,
    mut tasks: AppTasks,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    tokio::pin!(shutdown);
    let mut shutting_down = false;

    loop {
        tokio::select! {
            _ = &mut shutdown, if !shutting_down => {
                tracing::info!("Shutdown requested");
                shutting_down = true;
                app.shutdown();
            }
            joined = tasks.set.join_next_with_id() => match joined {
                None => break,
                Some(Ok((id, Ok(())))) => {
                    if id == tasks.ui {
                        break;
                    }
                }
                Some(Ok((_, Err(e)))) => {
                    app.shutdown();
                    tasks.set.shutdown().await;
                    return Err(e);
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    app.shutdown();
                    tasks.set.shutdown().await;
                    return Err(e.into());
                }
            }
        }
    }

    app.shutdown();
    tasks.set.shutdown().await;
    Ok(())
}
