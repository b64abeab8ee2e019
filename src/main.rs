use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{error, info};

use tickwatch::config::{AppConfig, fetch_config};
use tickwatch::connection::ChannelHandle;
use tickwatch::fallback;
use tickwatch::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use tickwatch::tui::{Action, App, Message, Tui, render, restore_terminal, setup_terminal};
use tickwatch::{Result, TickwatchError};

/// UI refresh interval; also drives the spinner.
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let config = fetch_config()?;
    init_tracing(&config.log_file)?;
    info!(
        websocket_url = %config.relay.websocket_url,
        api_url = %config.relay.api_url,
        "Starting dashboard"
    );

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &config).await;
    let restored = restore_terminal(&mut terminal);

    if let Err(ref e) = result {
        error!(error = %e, "Dashboard exited with error");
    }
    result.and(restored)
}

/// Sends tracing output to `path`, since the TUI owns stdout.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TickwatchError::Io(format!("failed to open {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Opens the channel, runs the event loop, and closes the channel on every
/// exit path.
async fn run(terminal: &mut Tui, config: &AppConfig) -> Result<()> {
    let client = fallback::build_client()?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);
    spawn_ctrl_c(tx.clone());

    let channel = ChannelHandle::open(
        config.relay.websocket_url.clone(),
        config.reconnect,
        tx.clone(),
    );
    fallback::spawn_fetch(client.clone(), config.relay.api_url.clone(), tx.clone());

    let mut app = App::new();
    let result = event_loop(terminal, &mut app, &mut rx, |action| match action {
        Action::Retry => {
            info!("Manual retry requested");
            channel.retry();
        }
        Action::Disconnect => {
            info!("Manual disconnect requested");
            channel.disconnect();
        }
        Action::FetchFallback => {
            fallback::spawn_fetch(client.clone(), config.relay.api_url.clone(), tx.clone());
        }
    })
    .await;

    channel.close().await;
    info!("Channel closed");
    result
}

async fn event_loop<F>(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    mut dispatch: F,
) -> Result<()>
where
    F: FnMut(Action),
{
    loop {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| TickwatchError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            return Ok(());
        };
        if let Some(action) = update(app, message) {
            dispatch(action);
        }

        // Drain whatever queued up while drawing before the next frame.
        while let Ok(message) = rx.try_recv() {
            if let Some(action) = update(app, message) {
                dispatch(action);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn spawn_ctrl_c(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Quit);
        }
    });
}
