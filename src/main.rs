use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod handler;
mod message;
mod speech;
mod theme;
mod translate;
mod tui;
mod ui;

use app::App;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let mut app = App::new(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    let result = run(&mut app, &mut terminal, &mut events).await;

    tui::restore()?;
    result
}

async fn run(app: &mut App, terminal: &mut tui::Tui, events: &mut tui::EventHandler) -> Result<()> {
    while !app.should_quit {
        // Collect a finished submission before drawing so the new chat pair
        // and the cleared inputs land in the same frame
        if app
            .submit_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false)
        {
            if let Some(task) = app.submit_task.take() {
                match task.await {
                    Ok(result) => app.finish_submission(result),
                    Err(e) => tracing::error!(error = %e, "submission task failed to join"),
                }
            }
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}

/// Logs go to a file so they never fight the alternate screen.
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
