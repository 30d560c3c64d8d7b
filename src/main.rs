mod animation;
mod app;
mod config;
mod error;
mod event;
mod renderer;
mod surface;
mod tick;
mod ui;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::App;
use crate::config::CliArgs;
use crate::error::TickError;
use crate::event::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config = config::load(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(config.log_file.as_deref(), &config.general.log_level)?;

    info!(
        frame_ms = config.animation.frame_ms,
        mouse = config.mouse_support,
        "tickrow starting"
    );

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| TickError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse_support {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new();
    let mut app = App::new(event_handler.redraw_handle(), &config);

    // ── Main event loop ───────────────────────────────────────────────
    loop {
        if app.take_redraw() {
            terminal.draw(|f| ui::draw(f, &mut app))?;
        }

        match event_handler.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("tickrow exiting");
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file.
///
/// RUST_LOG wins over the configured level. Without a log file nothing is
/// recorded, since stdout belongs to the TUI.
fn init_logging(log_path: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_path else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| TickError::Config(format!("invalid log path: {}", path.display())))?;
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
