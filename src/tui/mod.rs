//! Terminal UI for checkmate

mod app;
mod layout;
mod ui;

pub use ui::render_text;

use anyhow::{Context, Result};
use app::App;
use checkmate_client::{ClientConfig, Preferences, RemoteDriver};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Run the TUI client
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(host = %config.host(), port = config.port(), revision = %config.protocol(), "Starting checkmate TUI");

    // Connect before touching the terminal so failures print normally.
    let driver = RemoteDriver::connect(&config.connect_params(), config.driver_options())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to connect");
            e
        })
        .context("server not ready, check host and port and try again")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(driver, Preferences::new(*config.theme()));
    let res = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, wait for input, dispatch.
#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let mut layout = None;
        terminal.draw(|frame| layout = Some(ui::draw(frame, app)))?;
        if let Some(layout) = layout {
            app.set_layout(layout);
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key).await,
            Event::Mouse(mouse) => app.handle_mouse(mouse).await,
            _ => {}
        }
        if app.should_quit() {
            info!("Quit requested");
            return Ok(());
        }
    }
}
